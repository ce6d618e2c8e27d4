// Copyright (C) 2020-2026 Andy Kurnia.

// Rooms are shared between commands, their timer task, and virtual player
// turns. Every one of those locks the room's mutex for the whole of its
// read-modify-write, so a room only ever has one writer at a time.

use super::error::{self, RoomError};
use super::{command, dictionary, events, game_config, room, virtual_player};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, RwLock};

type SharedRoom = Arc<Mutex<room::Room>>;
type SnapshotSink = Box<dyn Fn(&room::RoomSnapshot) + Send + Sync>;

// The paused test clock moves tokio's Instant but not std's.
#[inline(always)]
fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

struct Inner {
    rooms: RwLock<HashMap<String, SharedRoom>>,
    dictionary: Arc<dyn dictionary::Dictionary>,
    config: game_config::ManagerConfig,
    snapshot_sink: std::sync::RwLock<Option<SnapshotSink>>,
}

#[derive(Clone)]
pub struct RoomManager {
    inner: Arc<Inner>,
}

impl RoomManager {
    pub fn new(
        dictionary: Arc<dyn dictionary::Dictionary>,
        config: game_config::ManagerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                rooms: RwLock::new(HashMap::new()),
                dictionary,
                config,
                snapshot_sink: std::sync::RwLock::new(None),
            }),
        }
    }

    // Receives every room's final snapshot once its game is over.
    pub fn set_snapshot_sink<F: Fn(&room::RoomSnapshot) + Send + Sync + 'static>(&self, sink: F) {
        if let Ok(mut snapshot_sink) = self.inner.snapshot_sink.write() {
            *snapshot_sink = Some(Box::new(sink));
        }
    }

    async fn get(&self, id: &str) -> Result<SharedRoom, RoomError> {
        self.inner
            .rooms
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RoomError::RoomNotFound(id.into()))
    }

    pub async fn create_room(
        &self,
        id: &str,
        host: &str,
        options: game_config::RoomOptions,
    ) -> error::Returns<()> {
        let mut rooms = self.inner.rooms.write().await;
        if rooms.contains_key(id) {
            return_error!(format!("room {:?} already exists", id));
        }
        let mut new_room = room::Room::new(
            id,
            host,
            options,
            Arc::clone(&self.inner.dictionary),
            ChaCha20Rng::from_os_rng(),
        )?;
        new_room.set_search_budget(self.inner.config.search_budget);
        rooms.insert(id.into(), Arc::new(Mutex::new(new_room)));
        Ok(())
    }

    pub async fn remove_room(&self, id: &str) -> Result<(), RoomError> {
        match self.inner.rooms.write().await.remove(id) {
            Some(_) => {
                log::info!("room {} removed", id);
                Ok(())
            }
            None => Err(RoomError::RoomNotFound(id.into())),
        }
    }

    pub async fn room_ids(&self) -> Vec<String> {
        let mut ids = self
            .inner
            .rooms
            .read()
            .await
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        ids.sort();
        ids
    }

    // Attach event observers, typically right after creating the room.
    pub async fn subscribe<F: FnOnce(&mut events::RoomEvents)>(
        &self,
        id: &str,
        f: F,
    ) -> Result<(), RoomError> {
        let shared_room = self.get(id).await?;
        f(&mut shared_room.lock().await.events);
        Ok(())
    }

    pub async fn with_room<T, F: FnOnce(&room::Room) -> T>(
        &self,
        id: &str,
        f: F,
    ) -> Result<T, RoomError> {
        let shared_room = self.get(id).await?;
        let room = shared_room.lock().await;
        Ok(f(&room))
    }

    pub async fn snapshot(&self, id: &str) -> Result<room::RoomSnapshot, RoomError> {
        self.with_room(id, |room| room.snapshot()).await
    }

    pub async fn join(&self, id: &str, guest: &str) -> Result<(), RoomError> {
        self.get(id).await?.lock().await.join(guest)
    }

    pub async fn refuse(&self, id: &str, host: &str) -> Result<(), RoomError> {
        self.get(id).await?.lock().await.refuse(host)
    }

    pub async fn accept(&self, id: &str, host: &str) -> Result<(), RoomError> {
        let shared_room = self.get(id).await?;
        {
            let mut room = shared_room.lock().await;
            room.accept(host, now())?;
        }
        spawn_timer(Arc::clone(&self.inner), Arc::downgrade(&shared_room));
        Ok(())
    }

    pub async fn leave(&self, id: &str, name: &str) -> Result<room::GameState, RoomError> {
        let shared_room = self.get(id).await?;
        let mut room = shared_room.lock().await;
        let previous_state = room.state();
        let state = room.leave(name)?;
        after_change(&self.inner, &shared_room, &room, previous_state);
        Ok(state)
    }

    pub async fn handle_command(
        &self,
        id: &str,
        command: &command::Command,
    ) -> Result<room::TurnOutcome, RoomError> {
        let shared_room = self.get(id).await?;
        if let command::Action::Hint = command.action {
            return self.hints(id, &shared_room, &command.sender).await;
        }
        let mut room = shared_room.lock().await;
        let previous_state = room.state();
        let outcome = room.handle_command(command, now());
        match &outcome {
            Ok(_) => after_change(&self.inner, &shared_room, &room, previous_state),
            Err(err) => log::debug!("room {}: rejected {:?}: {}", id, command, err),
        }
        outcome
    }

    // The search runs off the lock, so the room keeps taking commands.
    async fn hints(
        &self,
        id: &str,
        shared_room: &SharedRoom,
        name: &str,
    ) -> Result<room::TurnOutcome, RoomError> {
        let hint_search = shared_room.lock().await.hint_search(name);
        let hint_search = match hint_search {
            Ok(hint_search) => hint_search,
            Err(err) => {
                log::debug!("room {}: rejected hint for {}: {}", id, name, err);
                return Err(err);
            }
        };
        let hints = match tokio::task::spawn_blocking(move || hint_search.run()).await {
            Ok(hints) => hints,
            Err(err) => {
                log::warn!("room {}: hint search failed: {}", id, err);
                vec![virtual_player::NO_HINT_AVAILABLE.into()]
            }
        };
        Ok(room::TurnOutcome::Hints(hints))
    }
}

// Hands the snapshot over when a game has just ended, or lines up the
// virtual player when it is its turn.
fn after_change(
    inner: &Arc<Inner>,
    shared_room: &SharedRoom,
    room: &room::Room,
    previous_state: room::GameState,
) {
    if room.state() == room::GameState::GameOver {
        if previous_state != room::GameState::GameOver {
            let snapshot = room.snapshot();
            if let Ok(snapshot_sink) = inner.snapshot_sink.read() {
                if let Some(sink) = snapshot_sink.as_ref() {
                    sink(&snapshot);
                }
            }
        }
    } else if room.mover().is_some_and(|player| player.is_virtual) {
        schedule_virtual_turn(Arc::clone(inner), Arc::clone(shared_room));
    }
}

// The virtual player moves after a pause, searching without the lock. Its
// move is dropped if the turn moved on meanwhile.
fn schedule_virtual_turn(inner: Arc<Inner>, shared_room: SharedRoom) {
    tokio::spawn(async move {
        tokio::time::sleep(inner.config.virtual_player_delay).await;
        let Some(virtual_turn) = shared_room.lock().await.virtual_turn() else {
            return;
        };
        let budget = inner.config.search_budget;
        let (turn, action) =
            match tokio::task::spawn_blocking(move || virtual_turn.decide(budget)).await {
                Ok(decision) => decision,
                Err(err) => {
                    log::warn!("virtual player search failed: {}", err);
                    return;
                }
            };
        let mut room = shared_room.lock().await;
        let previous_state = room.state();
        match room.apply_virtual_turn(turn, &action, now()) {
            Some(outcome) => {
                log::debug!("room {}: virtual player {:?}", room.id(), outcome);
                after_change(&inner, &shared_room, &room, previous_state);
            }
            None => log::debug!("room {}: stale virtual player move dropped", room.id()),
        }
    });
}

// Ticks until the game ends or the room goes away.
fn spawn_timer(inner: Arc<Inner>, weak_room: Weak<Mutex<room::Room>>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(inner.config.tick_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let Some(shared_room) = weak_room.upgrade() else {
                break;
            };
            let mut room = shared_room.lock().await;
            if room.state() != room::GameState::GameAccepted {
                break;
            }
            let previous_state = room.state();
            if room.tick(now()).is_some() {
                after_change(&inner, &shared_room, &room, previous_state);
            }
        }
    });
}

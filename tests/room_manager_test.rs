// Copyright (C) 2020-2026 Andy Kurnia.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossroom::command::{Action, Command};
use crossroom::dictionary::{Dictionary, WordListDictionary};
use crossroom::error::RoomError;
use crossroom::events;
use crossroom::game_config::{Difficulty, ManagerConfig, RoomOptions};
use crossroom::room::{GameState, RoomSnapshot, TurnOutcome, VIRTUAL_PLAYER_NAME};
use crossroom::room_manager::RoomManager;

const WORDS: &str = "cat\ncats\nat\nta\nact\nscat\ntea\neat\nate\n";

fn manager_with(dictionary: Arc<dyn Dictionary>, search_budget: Duration) -> RoomManager {
    RoomManager::new(
        dictionary,
        ManagerConfig {
            virtual_player_delay: Duration::from_millis(20),
            search_budget,
            tick_interval: Duration::from_millis(1000),
        },
    )
}

fn manager() -> RoomManager {
    let mut dictionary = WordListDictionary::new();
    dictionary.load_str("default", WORDS).unwrap();
    manager_with(Arc::new(dictionary), Duration::from_secs(5))
}

// Every lookup takes a while, so a full search runs into its budget.
struct SlowDictionary(WordListDictionary);

impl Dictionary for SlowDictionary {
    fn in_dictionary(&self, dictionary_id: &str, word: &str) -> bool {
        std::thread::sleep(Duration::from_micros(200));
        self.0.in_dictionary(dictionary_id, word)
    }
}

async fn mover(manager: &RoomManager, id: &str) -> Option<String> {
    manager
        .with_room(id, |room| room.mover().map(|player| player.name.clone()))
        .await
        .unwrap()
}

// Waits for the virtual player to hand the turn back.
async fn wait_for_mover(manager: &RoomManager, id: &str, name: &str) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while mover(manager, id).await.as_deref() != Some(name) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("virtual player did not move");
}

fn pass(sender: &str) -> Command {
    Command::new(sender, Action::Pass)
}

#[tokio::test]
async fn virtual_player_answers_after_a_delay() {
    let manager = manager();
    let options = RoomOptions {
        single_player: true,
        difficulty: Difficulty::Expert,
        ..RoomOptions::default()
    };
    manager.create_room("solo", "ann", options).await.unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        manager
            .subscribe("solo", move |events: &mut events::RoomEvents| {
                let skipped = Arc::clone(&seen);
                events.turn_skipped.subscribe(move |event: &events::TurnSkipped| {
                    skipped.lock().unwrap().push(format!("skipped {}", event.player));
                });
                let changed = Arc::clone(&seen);
                events.turn_changed.subscribe(move |event: &events::TurnChanged| {
                    changed.lock().unwrap().push(format!("turn {}", event.player));
                });
            })
            .await
            .unwrap();
    }
    manager.accept("solo", "ann").await.unwrap();
    assert_eq!(mover(&manager, "solo").await.as_deref(), Some("ann"));

    let outcome = manager.handle_command("solo", &pass("ann")).await.unwrap();
    assert_eq!(outcome, TurnOutcome::Passed);
    wait_for_mover(&manager, "solo", "ann").await;

    let seen = seen.lock().unwrap().clone();
    // command outcome, then the turn change, then the virtual player
    assert_eq!(seen[..3], ["turn ann", "skipped ann", format!("turn {}", VIRTUAL_PLAYER_NAME).as_str()]);
    assert_eq!(seen.last().map(String::as_str), Some("turn ann"));
    assert_eq!(manager.with_room("solo", |room| room.turn()).await, Ok(2));
}

#[tokio::test]
async fn finished_games_are_handed_to_persistence() {
    let manager = manager();
    let snapshots = Arc::new(Mutex::new(Vec::<RoomSnapshot>::new()));
    {
        let snapshots = Arc::clone(&snapshots);
        manager.set_snapshot_sink(move |snapshot| snapshots.lock().unwrap().push(snapshot.clone()));
    }
    manager
        .create_room("duo", "ann", RoomOptions::default())
        .await
        .unwrap();
    manager.join("duo", "bob").await.unwrap();
    manager.accept("duo", "ann").await.unwrap();
    assert_eq!(
        manager.handle_command("duo", &pass("bob")).await,
        Err(RoomError::NotYourTurn("bob".into()))
    );
    for i in 0..6 {
        let sender = if i % 2 == 0 { "ann" } else { "bob" };
        manager.handle_command("duo", &pass(sender)).await.unwrap();
    }
    let snapshots = snapshots.lock().unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].state, GameState::GameOver);
    assert_eq!(snapshots[0].players.len(), 2);
    assert!(snapshots[0].players.iter().all(|player| player.score <= 0));
}

#[tokio::test]
async fn a_departing_human_is_replaced() {
    let manager = manager();
    manager
        .create_room("duo", "ann", RoomOptions::default())
        .await
        .unwrap();
    manager.join("duo", "bob").await.unwrap();
    manager.accept("duo", "ann").await.unwrap();
    assert_eq!(manager.leave("duo", "bob").await, Ok(GameState::GameAccepted));
    manager.handle_command("duo", &pass("ann")).await.unwrap();
    wait_for_mover(&manager, "duo", "ann").await;
    let snapshot = manager.snapshot("duo").await.unwrap();
    assert_eq!(snapshot.players[1].name, VIRTUAL_PLAYER_NAME);
    assert!(snapshot.options.single_player);
    assert_eq!(snapshot.options.difficulty, Difficulty::Beginner);

    assert_eq!(manager.leave("duo", "ann").await, Ok(GameState::GameOver));
}

#[tokio::test]
async fn a_host_leaving_on_their_turn_is_replaced() {
    let manager = manager();
    manager
        .create_room("duo", "ann", RoomOptions::default())
        .await
        .unwrap();
    manager.join("duo", "bob").await.unwrap();
    manager.accept("duo", "ann").await.unwrap();
    assert_eq!(manager.leave("duo", "ann").await, Ok(GameState::GameAccepted));
    // nobody else acts: the virtual player picks up the host's move by itself
    wait_for_mover(&manager, "duo", "bob").await;
    assert_eq!(manager.with_room("duo", |room| room.turn()).await, Ok(1));
    assert_eq!(
        manager.leave("duo", VIRTUAL_PLAYER_NAME).await,
        Err(RoomError::InvalidState("GameAccepted"))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn hints_do_not_hold_up_the_room() {
    let mut word_lists = WordListDictionary::new();
    word_lists.load_str("default", WORDS).unwrap();
    let manager = manager_with(
        Arc::new(SlowDictionary(word_lists)),
        Duration::from_secs(2),
    );
    manager
        .create_room("duo", "ann", RoomOptions::default())
        .await
        .unwrap();
    manager.join("duo", "bob").await.unwrap();
    manager.accept("duo", "ann").await.unwrap();

    let hint = {
        let manager = manager.clone();
        tokio::spawn(async move {
            manager
                .handle_command("duo", &Command::new("ann", Action::Hint))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    let started = Instant::now();
    let outcome = manager.handle_command("duo", &pass("ann")).await;
    assert!(
        started.elapsed() < Duration::from_millis(1000),
        "pass waited {:?}",
        started.elapsed()
    );
    assert_eq!(outcome, Ok(TurnOutcome::Passed));
    assert!(matches!(
        hint.await.unwrap(),
        Ok(TurnOutcome::Hints(hints)) if !hints.is_empty()
    ));
}

#[tokio::test]
async fn refused_guests_make_room_for_others() {
    let manager = manager();
    manager
        .create_room("duo", "ann", RoomOptions::default())
        .await
        .unwrap();
    manager.join("duo", "bob").await.unwrap();
    assert_eq!(manager.join("duo", "cy").await, Err(RoomError::RoomFull));
    assert_eq!(
        manager.refuse("duo", "bob").await,
        Err(RoomError::NotHost("bob".into()))
    );
    manager.refuse("duo", "ann").await.unwrap();
    manager.join("duo", "cy").await.unwrap();
    assert_eq!(
        manager.with_room("duo", |room| room.state()).await,
        Ok(GameState::GuestJoined)
    );
}

#[tokio::test(start_paused = true)]
async fn slow_players_lose_their_turn() {
    let manager = manager();
    manager
        .create_room("duo", "ann", RoomOptions::default())
        .await
        .unwrap();
    manager.join("duo", "bob").await.unwrap();
    manager.accept("duo", "ann").await.unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(mover(&manager, "duo").await.as_deref(), Some("ann"));
    tokio::time::sleep(Duration::from_millis(30_500)).await;
    assert_eq!(mover(&manager, "duo").await.as_deref(), Some("bob"));
    assert_eq!(manager.with_room("duo", |room| room.num_zeros()).await, Ok(1));
}

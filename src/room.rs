// Copyright (C) 2020-2026 Andy Kurnia.

use super::error::RoomError;
use super::{
    bag, board, command, dictionary, display, events, game_config, game_timers, objectives,
    play_scorer, rack, validator, virtual_player,
};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

pub const VIRTUAL_PLAYER_NAME: &str = "virtual";

const HOST: usize = 0;
const GUEST: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum GameState {
    WaitingForGuest,
    GuestJoined,
    GameAccepted,
    // host turned the guest down; another guest may join
    GameRefused,
    // someone left before the game started
    GameAbandoned,
    GameOver,
}

impl GameState {
    pub fn name(self) -> &'static str {
        match self {
            GameState::WaitingForGuest => "WaitingForGuest",
            GameState::GuestJoined => "GuestJoined",
            GameState::GameAccepted => "GameAccepted",
            GameState::GameRefused => "GameRefused",
            GameState::GameAbandoned => "GameAbandoned",
            GameState::GameOver => "GameOver",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub rack: rack::Rack,
    pub score: i32,
    pub is_turn: bool,
    pub abandoned: bool,
    pub is_virtual: bool,
}

impl Player {
    fn new(name: &str, is_virtual: bool) -> Self {
        Self {
            name: name.into(),
            rack: rack::Rack::new(),
            score: 0,
            is_turn: false,
            abandoned: false,
            is_virtual,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Placed { points: u32, words: Vec<String> },
    PlacementFailed(String),
    Exchanged { count: usize },
    ExchangeRefused,
    Passed,
    Hints(Vec<String>),
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub score: i32,
    pub rack: String,
    pub abandoned: bool,
    pub is_virtual: bool,
}

// What persistence gets once a game is over.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RoomSnapshot {
    pub id: String,
    pub state: GameState,
    pub options: game_config::RoomOptions,
    pub players: Vec<PlayerSnapshot>,
    pub turn: u32,
    pub board: Vec<String>,
    pub words: Vec<String>,
    pub reserve: String,
    pub objectives: Vec<objectives::Objective>,
    pub created_at_unix_secs: u64,
    pub started_at_unix_secs: Option<u64>,
    pub winner: Option<String>,
}

// A copy of the position, detached from the room so a search can run
// without holding it.
struct Position {
    board: board::Board,
    rack: Vec<u8>,
    game_config: Arc<game_config::GameConfig>,
    dictionary: Arc<dyn dictionary::Dictionary>,
    dictionary_id: String,
}

impl Position {
    fn with_snapshot<T>(&self, f: impl FnOnce(&validator::BoardSnapshot) -> T) -> T {
        f(&validator::BoardSnapshot {
            board: &self.board,
            game_config: &self.game_config,
            dictionary: &*self.dictionary,
            dictionary_id: &self.dictionary_id,
        })
    }
}

pub struct VirtualTurn {
    pub turn: u32,
    position: Position,
    difficulty: game_config::Difficulty,
    reserve_size: usize,
    rng: ChaCha20Rng,
}

impl VirtualTurn {
    pub fn decide(mut self, budget: Duration) -> (u32, command::Action) {
        let rng = &mut self.rng;
        let action = self.position.with_snapshot(|board_snapshot| {
            virtual_player::get_command(
                board_snapshot,
                &self.position.rack,
                self.difficulty,
                self.reserve_size,
                budget,
                rng,
            )
        });
        (self.turn, action)
    }
}

pub struct HintSearch {
    position: Position,
    budget: Duration,
}

impl HintSearch {
    pub fn run(self) -> Vec<String> {
        self.position.with_snapshot(|board_snapshot| {
            virtual_player::generate_hints(board_snapshot, &self.position.rack, self.budget)
        })
    }
}

fn unix_secs(t: SystemTime) -> u64 {
    t.duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

pub struct Room {
    id: String,
    options: game_config::RoomOptions,
    game_config: Arc<game_config::GameConfig>,
    dictionary: Arc<dyn dictionary::Dictionary>,
    state: GameState,
    board: board::Board,
    bag: bag::Bag,
    // host first
    players: Vec<Player>,
    turn: u32,
    // consecutive turns without a placement or exchange
    num_zeros: u8,
    timer: game_timers::TurnTimer,
    any_letter_placed: bool,
    objectives: objectives::Objectives,
    search_budget: Duration,
    created_at: SystemTime,
    started_at: Option<SystemTime>,
    rng: ChaCha20Rng,
    pub events: events::RoomEvents,
}

impl Room {
    // Single-player rooms start with the virtual guest seated.
    pub fn new(
        id: &str,
        host: &str,
        options: game_config::RoomOptions,
        dictionary: Arc<dyn dictionary::Dictionary>,
        rng: ChaCha20Rng,
    ) -> crate::error::Returns<Self> {
        options.validate()?;
        if host == VIRTUAL_PLAYER_NAME {
            return_error!(format!("{:?} is reserved", host));
        }
        let game_config = Arc::new(options.game_config());
        let mut players = vec![Player::new(host, false)];
        let mut state = GameState::WaitingForGuest;
        if options.single_player {
            players.push(Player::new(VIRTUAL_PLAYER_NAME, true));
            state = GameState::GuestJoined;
        }
        log::info!("room {} created by {}", id, host);
        Ok(Self {
            id: id.into(),
            board: board::Board::new(game_config.board_layout()),
            bag: bag::Bag::new(game_config.alphabet()),
            timer: game_timers::TurnTimer::new(Duration::from_secs(
                options.turn_duration_secs as u64,
            )),
            options,
            game_config,
            dictionary,
            state,
            players,
            turn: 0,
            num_zeros: 0,
            any_letter_placed: false,
            objectives: objectives::Objectives::default(),
            search_budget: Duration::from_secs(3),
            created_at: SystemTime::now(),
            started_at: None,
            rng,
            events: events::RoomEvents::default(),
        })
    }

    pub fn set_search_budget(&mut self, search_budget: Duration) {
        self.search_budget = search_budget;
    }

    #[inline(always)]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline(always)]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline(always)]
    pub fn options(&self) -> &game_config::RoomOptions {
        &self.options
    }

    #[inline(always)]
    pub fn game_config(&self) -> &game_config::GameConfig {
        &self.game_config
    }

    #[inline(always)]
    pub fn board(&self) -> &board::Board {
        &self.board
    }

    #[inline(always)]
    pub fn reserve(&self) -> &bag::Bag {
        &self.bag
    }

    #[inline(always)]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline(always)]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[inline(always)]
    pub fn num_zeros(&self) -> u8 {
        self.num_zeros
    }

    #[inline(always)]
    pub fn any_letter_placed(&self) -> bool {
        self.any_letter_placed
    }

    #[inline(always)]
    pub fn objectives(&self) -> &objectives::Objectives {
        &self.objectives
    }

    #[inline(always)]
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn remaining_ms_as_at(&self, now: Instant) -> i64 {
        self.timer.remaining_ms_as_at(now)
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }

    // The player to move, while a game is on.
    pub fn mover(&self) -> Option<&Player> {
        self.mover_seat().map(|seat| &self.players[seat])
    }

    fn mover_seat(&self) -> Option<usize> {
        if self.state != GameState::GameAccepted {
            return None;
        }
        self.players.iter().position(|player| player.is_turn)
    }

    fn seat_of(&self, name: &str) -> Result<usize, RoomError> {
        self.players
            .iter()
            .position(|player| player.name == name)
            .ok_or_else(|| RoomError::PlayerNotInRoom(name.into()))
    }

    fn expect_state(&self, allowed: &[GameState]) -> Result<(), RoomError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(RoomError::InvalidState(self.state.name()))
        }
    }

    fn expect_host(&self, name: &str) -> Result<(), RoomError> {
        if self.seat_of(name)? != HOST {
            return Err(RoomError::NotHost(name.into()));
        }
        Ok(())
    }

    pub fn join(&mut self, guest: &str) -> Result<(), RoomError> {
        if guest == VIRTUAL_PLAYER_NAME || self.player(guest).is_some() {
            return Err(RoomError::NameTaken(guest.into()));
        }
        if self.players.len() > GUEST {
            return Err(RoomError::RoomFull);
        }
        self.expect_state(&[GameState::WaitingForGuest, GameState::GameRefused])?;
        self.players.push(Player::new(guest, false));
        self.state = GameState::GuestJoined;
        log::info!("room {}: {} joined", self.id, guest);
        Ok(())
    }

    pub fn accept(&mut self, host: &str, now: Instant) -> Result<(), RoomError> {
        self.expect_host(host)?;
        self.expect_state(&[GameState::GuestJoined])?;
        self.start_game(now);
        Ok(())
    }

    pub fn refuse(&mut self, host: &str) -> Result<(), RoomError> {
        self.expect_host(host)?;
        self.expect_state(&[GameState::GuestJoined])?;
        self.players.truncate(GUEST);
        self.state = GameState::GameRefused;
        log::info!("room {}: guest refused", self.id);
        Ok(())
    }

    fn start_game(&mut self, now: Instant) {
        let game_config = Arc::clone(&self.game_config);
        self.turn = 0;
        self.num_zeros = 0;
        self.any_letter_placed = false;
        self.board = board::Board::new(game_config.board_layout());
        self.bag = bag::Bag::new(game_config.alphabet());
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.score = 0;
            player.rack = rack::Rack::new();
            player.is_turn = seat == HOST;
            player.abandoned = false;
        }
        for seat in 0..self.players.len() {
            self.refill(seat);
        }
        self.started_at = Some(SystemTime::now());
        self.objectives = match game_config.game_rules() {
            game_config::GameRules::Objectives => objectives::Objectives::generate(
                &mut self.rng,
                [
                    self.players[HOST].name.as_str(),
                    self.players[GUEST].name.as_str(),
                ],
            ),
            game_config::GameRules::Classic => objectives::Objectives::default(),
        };
        self.state = GameState::GameAccepted;
        self.timer.restart(now);
        log::info!(
            "room {}: {} vs {} started",
            self.id,
            self.players[HOST].name,
            self.players[GUEST].name
        );
        let player = self.players[HOST].name.clone();
        self.events
            .turn_changed
            .emit_with(|| events::TurnChanged { player, turn: 0 });
    }

    fn refill(&mut self, seat: usize) {
        let rack_size = self.game_config.rack_size() as usize;
        let drawn = self
            .bag
            .replenish(&mut self.rng, &mut self.players[seat].rack, rack_size);
        if !drawn.is_empty() {
            let player = &self.players[seat].name;
            self.events.tile_drawn.emit_with(|| events::TileDrawn {
                player: player.clone(),
                count: drawn.len(),
            });
        }
    }

    // Leaving ends a game against the virtual player. Between two humans,
    // the virtual player takes over the departing seat instead.
    pub fn leave(&mut self, name: &str) -> Result<GameState, RoomError> {
        let seat = self.seat_of(name)?;
        if self.players[seat].is_virtual
            || matches!(self.state, GameState::GameAbandoned | GameState::GameOver)
        {
            return Err(RoomError::InvalidState(self.state.name()));
        }
        self.players[seat].abandoned = true;
        match self.state {
            GameState::WaitingForGuest | GameState::GuestJoined | GameState::GameRefused => {
                self.state = GameState::GameAbandoned;
                self.timer.stop();
                log::info!("room {}: {} left before the game started", self.id, name);
            }
            GameState::GameAccepted => {
                if self.players[1 - seat].is_virtual {
                    log::info!("room {}: {} left, game over", self.id, name);
                    self.finish_game();
                } else {
                    self.convert_to_solo(seat);
                }
            }
            GameState::GameAbandoned | GameState::GameOver => {}
        }
        Ok(self.state)
    }

    fn convert_to_solo(&mut self, seat: usize) {
        let departed = std::mem::replace(&mut self.players[seat].name, VIRTUAL_PLAYER_NAME.into());
        self.players[seat].is_virtual = true;
        self.players[seat].abandoned = false;
        self.options.single_player = true;
        self.options.difficulty = game_config::Difficulty::Beginner;
        self.objectives.rebind(&departed, VIRTUAL_PLAYER_NAME);
        log::info!(
            "room {}: {} left, the virtual player takes over",
            self.id,
            departed
        );
    }

    pub fn game_has_to_end(&self) -> bool {
        (self.bag.is_empty() && self.players.iter().any(|player| player.rack.is_empty()))
            || self.num_zeros >= self.game_config.num_zeros_to_end()
    }

    // Leftover tiles count against their holder; going out collects them.
    pub fn end_game_adjustment(&mut self) {
        let alphabet = self.game_config.alphabet();
        let rack_values = self
            .players
            .iter()
            .map(|player| player.rack.value(alphabet))
            .collect::<Vec<_>>();
        let total = rack_values.iter().sum::<i32>();
        for (player, &value) in self.players.iter_mut().zip(rack_values.iter()) {
            if player.rack.is_empty() {
                player.score += total;
            } else {
                player.score -= value;
            }
        }
    }

    fn finish_game(&mut self) {
        self.end_game_adjustment();
        self.state = GameState::GameOver;
        self.timer.stop();
        self.players.iter_mut().for_each(|player| player.is_turn = false);
        let winner = self.winner();
        log::info!(
            "room {}: game over, {:?} wins",
            self.id,
            winner.as_deref().unwrap_or("nobody")
        );
        let host_score = self.players[HOST].score;
        let guest_score = self.players.get(GUEST).map_or(0, |player| player.score);
        self.events.game_over.emit_with(|| events::GameOver {
            host_score,
            guest_score,
            winner,
        });
    }

    fn winner(&self) -> Option<String> {
        let best = self.players.iter().map(|player| player.score).max()?;
        let mut leaders = self.players.iter().filter(|player| player.score == best);
        match (leaders.next(), leaders.next()) {
            (Some(player), None) => Some(player.name.clone()),
            _ => None,
        }
    }

    // Ends the game or hands the turn over.
    pub fn next_turn_initialization(&mut self, now: Instant) {
        if self.state != GameState::GameAccepted {
            return;
        }
        if self.game_has_to_end() {
            self.finish_game();
            return;
        }
        if let Some(seat) = self.mover_seat() {
            self.refill(seat);
        }
        self.turn += 1;
        self.players
            .iter_mut()
            .for_each(|player| player.is_turn = !player.is_turn);
        self.timer.restart(now);
        self.board.clear_placed_flags();
        if let Some(seat) = self.mover_seat() {
            let player = self.players[seat].name.clone();
            let turn = self.turn;
            self.events
                .turn_changed
                .emit_with(|| events::TurnChanged { player, turn });
        }
    }

    fn record_objectives(&mut self, turn: &objectives::TurnRecord) {
        if self.objectives.is_empty() {
            return;
        }
        for completion in self.objectives.record_turn(turn) {
            if let Some(player) = self
                .players
                .iter_mut()
                .find(|player| player.name == completion.player)
            {
                player.score += completion.bonus;
            }
            self.events
                .objective_completed
                .emit_with(|| events::ObjectiveCompleted {
                    player: completion.player,
                    description: completion.kind.description().into(),
                    bonus: completion.bonus,
                });
        }
    }

    fn record_scoreless_turn(&mut self, seat: usize) {
        let player = self.players[seat].name.clone();
        self.record_objectives(&objectives::TurnRecord {
            player: &player,
            main_word: &[],
            num_words: 0,
            num_word_bonuses: 0,
            points: 0,
        });
    }

    fn placement_failed(&mut self, seat: usize, reason: String) -> TurnOutcome {
        log::debug!(
            "room {}: placement by {} failed: {}",
            self.id,
            self.players[seat].name,
            reason
        );
        self.num_zeros += 1;
        let player = &self.players[seat].name;
        self.events
            .placement_failed
            .emit_with(|| events::PlacementFailed {
                player: player.clone(),
                reason: reason.clone(),
            });
        self.record_scoreless_turn(seat);
        TurnOutcome::PlacementFailed(reason)
    }

    // Validates and applies a placement. A failure leaves board, rack and
    // score as they were. Does not advance the turn.
    pub fn play_turn(&mut self, seat: usize, placement: &command::Placement) -> TurnOutcome {
        let alphabet = self.game_config.alphabet();
        let needed = placement
            .squares()
            .filter(|&((row, col), _)| self.board.tile_at(row, col) == 0)
            .map(|(_, tile)| tile)
            .collect::<Vec<_>>();
        if !self.players[seat].rack.contains_tiles(&needed) {
            return self.placement_failed(
                seat,
                format!("rack does not hold {}", alphabet.fmt_word(&needed)),
            );
        }
        let checked = {
            let board_snapshot = validator::BoardSnapshot {
                board: &self.board,
                game_config: &self.game_config,
                dictionary: &*self.dictionary,
                dictionary_id: &self.options.dictionary_id,
            };
            validator::check_placement(!self.any_letter_placed, placement, &board_snapshot)
        };
        let planned = match checked {
            Ok(planned) => planned,
            Err(err) => return self.placement_failed(seat, err.to_string()),
        };
        if let Err(err) = self.players[seat].rack.remove_tiles(&planned.placed_tiles()) {
            return self.placement_failed(seat, err.to_string());
        }

        let points = play_scorer::calculate_points(&self.game_config, placement, &planned.board);
        let words = planned
            .formed_words()
            .map(|word| alphabet.fmt_lookup(&word.tiles))
            .collect::<Vec<_>>();
        let main_word = planned
            .main_word
            .tiles
            .iter()
            .map(|&tile| crate::alphabet::letter_of(tile))
            .collect::<Vec<_>>();
        let num_word_bonuses = planned
            .placed
            .iter()
            .filter(|&&(row, col, _)| self.board.bonus_at(row, col).is_word_bonus())
            .count();
        self.board = planned.board;
        self.any_letter_placed = true;
        self.num_zeros = 0;
        self.players[seat].score += points as i32;

        let player = self.players[seat].name.clone();
        log::debug!("room {}: {} placed {:?} for {}", self.id, player, words, points);
        self.events.word_placed.emit_with(|| events::WordPlaced {
            player: player.clone(),
            command: command::Action::Place(placement.clone()).fmt(alphabet),
            points,
        });
        let board = &self.board;
        self.events.cross_words_changed.emit_with(|| {
            board
                .words()
                .iter()
                .map(|word| alphabet.fmt_lookup(&word.tiles))
                .collect()
        });
        self.record_objectives(&objectives::TurnRecord {
            player: &player,
            main_word: &main_word,
            num_words: words.len(),
            num_word_bonuses,
            points,
        });
        TurnOutcome::Placed { points, words }
    }

    // The reserve must hold at least the exchange limit, or for a
    // privileged exchange at least as many tiles as are returned.
    pub fn exchange(&mut self, seat: usize, tiles: &[u8], privileged: bool) -> TurnOutcome {
        let limit = self.game_config.exchange_tile_limit() as usize;
        let allowed = !tiles.is_empty()
            && tiles.len() <= self.game_config.rack_size() as usize
            && self.players[seat].rack.contains_tiles(tiles)
            && (self.bag.len() >= limit || (privileged && self.bag.len() >= tiles.len()));
        if !allowed || self.players[seat].rack.remove_tiles(tiles).is_err() {
            log::debug!(
                "room {}: exchange by {} refused with {} in reserve",
                self.id,
                self.players[seat].name,
                self.bag.len()
            );
            self.num_zeros += 1;
            let player = &self.players[seat].name;
            self.events.turn_skipped.emit_with(|| events::TurnSkipped {
                player: player.clone(),
            });
            self.record_scoreless_turn(seat);
            return TurnOutcome::ExchangeRefused;
        }
        self.bag.put_back(tiles);
        self.num_zeros = 0;
        let player = &self.players[seat].name;
        self.events
            .letters_exchanged
            .emit_with(|| events::LettersExchanged {
                player: player.clone(),
                count: tiles.len(),
            });
        self.record_scoreless_turn(seat);
        TurnOutcome::Exchanged { count: tiles.len() }
    }

    pub fn pass(&mut self, seat: usize) -> TurnOutcome {
        self.num_zeros += 1;
        let player = &self.players[seat].name;
        self.events.turn_skipped.emit_with(|| events::TurnSkipped {
            player: player.clone(),
        });
        self.record_scoreless_turn(seat);
        TurnOutcome::Passed
    }

    fn position(&self, seat: usize) -> Position {
        Position {
            board: self.board.clone(),
            rack: self.players[seat].rack.tiles().to_vec(),
            game_config: Arc::clone(&self.game_config),
            dictionary: Arc::clone(&self.dictionary),
            dictionary_id: self.options.dictionary_id.clone(),
        }
    }

    // Detaches a hint search for this player's rack.
    pub fn hint_search(&self, name: &str) -> Result<HintSearch, RoomError> {
        self.expect_state(&[GameState::GameAccepted])?;
        let seat = self.seat_of(name)?;
        Ok(HintSearch {
            position: self.position(seat),
            budget: self.search_budget,
        })
    }

    pub fn hints(&self, name: &str) -> Result<Vec<String>, RoomError> {
        Ok(self.hint_search(name)?.run())
    }

    fn apply_action(&mut self, seat: usize, action: &command::Action, privileged: bool) -> TurnOutcome {
        match action {
            command::Action::Place(placement) => self.play_turn(seat, placement),
            command::Action::Exchange { tiles } => self.exchange(seat, tiles, privileged),
            command::Action::Pass | command::Action::Hint => self.pass(seat),
        }
    }

    // A human command. Everything but a hint uses up the turn.
    pub fn handle_command(
        &mut self,
        command: &command::Command,
        now: Instant,
    ) -> Result<TurnOutcome, RoomError> {
        self.expect_state(&[GameState::GameAccepted])?;
        let seat = self.seat_of(&command.sender)?;
        if let command::Action::Hint = command.action {
            return Ok(TurnOutcome::Hints(self.hints(&command.sender)?));
        }
        if !self.players[seat].is_turn {
            return Err(RoomError::NotYourTurn(command.sender.clone()));
        }
        let outcome = self.apply_action(seat, &command.action, false);
        self.next_turn_initialization(now);
        Ok(outcome)
    }

    // Detaches what the virtual player needs, if it is to move.
    pub fn virtual_turn(&mut self) -> Option<VirtualTurn> {
        let seat = self.mover_seat()?;
        if !self.players[seat].is_virtual {
            return None;
        }
        Some(VirtualTurn {
            turn: self.turn,
            position: self.position(seat),
            difficulty: self.options.difficulty,
            reserve_size: self.bag.len(),
            rng: ChaCha20Rng::seed_from_u64(self.rng.next_u64()),
        })
    }

    // Applies the virtual player's decision unless the turn moved on since.
    pub fn apply_virtual_turn(
        &mut self,
        turn: u32,
        action: &command::Action,
        now: Instant,
    ) -> Option<TurnOutcome> {
        let seat = self.mover_seat()?;
        if self.turn != turn || !self.players[seat].is_virtual {
            return None;
        }
        let privileged = self.options.difficulty == game_config::Difficulty::Expert;
        let outcome = self.apply_action(seat, action, privileged);
        self.next_turn_initialization(now);
        Some(outcome)
    }

    // Skips the mover once their time is up.
    pub fn tick(&mut self, now: Instant) -> Option<TurnOutcome> {
        let seat = self.mover_seat()?;
        if !self.timer.is_expired_as_at(now) {
            return None;
        }
        log::info!("room {}: {} ran out of time", self.id, self.players[seat].name);
        let outcome = self.pass(seat);
        self.next_turn_initialization(now);
        Some(outcome)
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        let alphabet = self.game_config.alphabet();
        RoomSnapshot {
            id: self.id.clone(),
            state: self.state,
            options: self.options.clone(),
            players: self
                .players
                .iter()
                .map(|player| PlayerSnapshot {
                    name: player.name.clone(),
                    score: player.score,
                    rack: alphabet.fmt_rack(player.rack.tiles()),
                    abandoned: player.abandoned,
                    is_virtual: player.is_virtual,
                })
                .collect(),
            turn: self.turn,
            board: display::fmt_board(alphabet, &self.board),
            words: self
                .board
                .words()
                .iter()
                .map(|word| alphabet.fmt_lookup(&word.tiles))
                .collect(),
            reserve: self.bag.summary(alphabet),
            objectives: self.objectives.iter().cloned().collect(),
            created_at_unix_secs: unix_secs(self.created_at),
            started_at_unix_secs: self.started_at.map(unix_secs),
            winner: if self.state == GameState::GameOver {
                self.winner()
            } else {
                None
            },
        }
    }
}

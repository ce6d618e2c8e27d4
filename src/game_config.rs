// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameRules {
    Classic,
    // Classic plus bonus objectives.
    Objectives,
}

pub struct StaticGameConfig {
    game_rules: GameRules,
    alphabet: &'static alphabet::Alphabet<'static>,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    num_zeros_to_end: u8,
    exchange_tile_limit: i16, // >= 1
    bingo_bonus: i16,
}

pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn alphabet(&self) -> &'static alphabet::Alphabet<'static> {
        match self {
            GameConfig::Static(x) => x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        match self {
            GameConfig::Static(x) => &x.board_layout,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    // Consecutive scoreless turns that end the game.
    #[inline(always)]
    pub fn num_zeros_to_end(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_zeros_to_end,
        }
    }

    // Exchanging needs at least this many tiles in the bag.
    #[inline(always)]
    pub fn exchange_tile_limit(&self) -> i16 {
        match self {
            GameConfig::Static(x) => x.exchange_tile_limit,
        }
    }

    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: i8) -> i16 {
        match self {
            GameConfig::Static(x) => {
                // branchless
                x.bingo_bonus & -((num_played >= x.rack_size) as i16)
            }
        }
    }

    #[inline(always)]
    pub fn game_rules(&self) -> GameRules {
        match self {
            GameConfig::Static(x) => x.game_rules,
        }
    }
}

fn make_english_game_config(game_rules: GameRules) -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        game_rules,
        alphabet: alphabet::make_english_alphabet(),
        board_layout: board_layout::make_standard_board_layout(),
        rack_size: 7,
        num_zeros_to_end: 6,
        exchange_tile_limit: 7,
        bingo_bonus: 50,
    })
}

pub fn make_classic_game_config() -> GameConfig {
    make_english_game_config(GameRules::Classic)
}

pub fn make_objectives_game_config() -> GameConfig {
    make_english_game_config(GameRules::Objectives)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    Beginner,
    Expert,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameType {
    Classic,
    Objectives,
}

// What a host chooses when creating a room.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RoomOptions {
    pub turn_duration_secs: u32,
    pub single_player: bool,
    pub difficulty: Difficulty,
    pub dictionary_id: String,
    pub game_type: GameType,
}

impl Default for RoomOptions {
    fn default() -> Self {
        Self {
            turn_duration_secs: 60,
            single_player: false,
            difficulty: Difficulty::Beginner,
            dictionary_id: "default".into(),
            game_type: GameType::Classic,
        }
    }
}

impl RoomOptions {
    pub fn from_json(s: &str) -> error::Returns<Self> {
        let options = serde_json::from_str::<RoomOptions>(s)?;
        options.validate()?;
        Ok(options)
    }

    // Turns last 30 seconds to 5 minutes, in 30 second steps.
    pub fn validate(&self) -> error::Returns<()> {
        if !(30..=300).contains(&self.turn_duration_secs) || self.turn_duration_secs % 30 != 0 {
            return_error!(format!(
                "turn duration {}s is not one of 30s, 60s, ..., 300s",
                self.turn_duration_secs
            ));
        }
        if self.dictionary_id.is_empty() {
            return_error!("dictionary id is empty".into());
        }
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        match self.game_type {
            GameType::Classic => make_classic_game_config(),
            GameType::Objectives => make_objectives_game_config(),
        }
    }
}

// Knobs for the room manager's background work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagerConfig {
    // Pause before a virtual player acts, so its move is perceptible.
    pub virtual_player_delay: std::time::Duration,
    // Expert search budget.
    pub search_budget: std::time::Duration,
    pub tick_interval: std::time::Duration,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            virtual_player_delay: std::time::Duration::from_millis(3000),
            search_budget: std::time::Duration::from_millis(3000),
            tick_interval: std::time::Duration::from_millis(1000),
        }
    }
}

impl ManagerConfig {
    pub fn from_env() -> Self {
        fn millis(name: &str, default: std::time::Duration) -> std::time::Duration {
            std::env::var(name)
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map_or(default, std::time::Duration::from_millis)
        }
        let defaults = Self::default();
        Self {
            virtual_player_delay: millis("CROSSROOM_AI_DELAY_MS", defaults.virtual_player_delay),
            search_budget: millis("CROSSROOM_AI_BUDGET_MS", defaults.search_budget),
            tick_interval: millis("CROSSROOM_TICK_MS", defaults.tick_interval),
        }
    }
}

// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod command;
pub mod dictionary;
pub mod display;
pub mod events;
pub mod game_config;
pub mod game_timers;
pub mod matrix;
pub mod movegen;
pub mod objectives;
pub mod play_scorer;
pub mod rack;
pub mod room;
pub mod room_manager;
pub mod validator;
pub mod virtual_player;

// Copyright (C) 2020-2026 Andy Kurnia.

use super::{command, game_config, movegen, validator};
use rand::prelude::*;
use std::time::{Duration, Instant};

pub const NO_HINT_AVAILABLE: &str = "no hint available";
const MAX_HINTS: usize = 3;

// Beginner roll out of 100: pass, exchange, then low or mid scoring words.
const BEGINNER_PASS_BELOW: u32 = 10;
const BEGINNER_EXCHANGE_BELOW: u32 = 20;
const BEGINNER_LOW_BELOW: u32 = 60;
const LOW_POINTS: std::ops::RangeInclusive<u32> = 0..=6;
const MID_POINTS: std::ops::RangeInclusive<u32> = 7..=12;

// Picks from candidates sorted ascending by points: a random one inside the
// bracket, else the weakest above it, else the strongest below it.
fn pick_in_bracket<'a>(
    rng: &mut dyn RngCore,
    sorted: &'a [movegen::Candidate],
    bracket: &std::ops::RangeInclusive<u32>,
) -> Option<&'a movegen::Candidate> {
    let lo = sorted.partition_point(|c| c.points < *bracket.start());
    let hi = sorted.partition_point(|c| c.points <= *bracket.end());
    if lo < hi {
        Some(&sorted[rng.random_range(lo..hi)])
    } else if hi < sorted.len() {
        Some(&sorted[hi])
    } else {
        lo.checked_sub(1).map(|i| &sorted[i])
    }
}

fn exchange_everything(rack: &[u8]) -> command::Action {
    command::Action::Exchange {
        tiles: rack.into(),
    }
}

fn random_exchange(rng: &mut dyn RngCore, rack: &[u8]) -> command::Action {
    let mut tiles = rack.to_vec();
    tiles.shuffle(rng);
    tiles.truncate(rng.random_range(1..=rack.len()));
    command::Action::Exchange {
        tiles: tiles.into_boxed_slice(),
    }
}

fn beginner_action(
    board_snapshot: &validator::BoardSnapshot,
    rack: &[u8],
    reserve_size: usize,
    deadline: Instant,
    rng: &mut dyn RngCore,
) -> command::Action {
    let can_exchange = reserve_size >= board_snapshot.game_config.exchange_tile_limit() as usize;
    let roll = rng.random_range(0..100);
    let bracket = if roll < BEGINNER_PASS_BELOW {
        return command::Action::Pass;
    } else if roll < BEGINNER_EXCHANGE_BELOW {
        if can_exchange {
            return random_exchange(rng, rack);
        }
        return command::Action::Pass;
    } else if roll < BEGINNER_LOW_BELOW {
        LOW_POINTS
    } else {
        MID_POINTS
    };

    let mut candidates = movegen::generate_placements(board_snapshot, rack, Some(deadline)).candidates;
    candidates.sort_by_key(|candidate| candidate.points);
    match pick_in_bracket(rng, &candidates, &bracket) {
        Some(candidate) => command::Action::Place(candidate.placement.clone()),
        None if can_exchange => exchange_everything(rack),
        None => command::Action::Pass,
    }
}

fn expert_action(
    board_snapshot: &validator::BoardSnapshot,
    rack: &[u8],
    reserve_size: usize,
    deadline: Instant,
) -> command::Action {
    let search = movegen::generate_placements(board_snapshot, rack, Some(deadline));
    if search.timed_out {
        log::warn!("expert search ran out of time, passing");
        return command::Action::Pass;
    }
    // first of the best
    let best = search
        .candidates
        .iter()
        .rev()
        .max_by_key(|candidate| candidate.points);
    if let Some(candidate) = best {
        return command::Action::Place(candidate.placement.clone());
    }
    // Nothing fits: throw back what the reserve can take, heaviest first.
    let num_to_exchange = rack.len().min(reserve_size);
    if num_to_exchange == 0 {
        return command::Action::Pass;
    }
    let alphabet = board_snapshot.alphabet();
    let mut tiles = rack.to_vec();
    tiles.sort_by_key(|&tile| std::cmp::Reverse(alphabet.score(tile)));
    tiles.truncate(num_to_exchange);
    command::Action::Exchange {
        tiles: tiles.into_boxed_slice(),
    }
}

// The virtual player's move for its rack. Never returns Hint.
pub fn get_command(
    board_snapshot: &validator::BoardSnapshot,
    rack: &[u8],
    difficulty: game_config::Difficulty,
    reserve_size: usize,
    budget: Duration,
    rng: &mut dyn RngCore,
) -> command::Action {
    if rack.is_empty() {
        return command::Action::Pass;
    }
    let deadline = Instant::now() + budget;
    match difficulty {
        game_config::Difficulty::Beginner => {
            beginner_action(board_snapshot, rack, reserve_size, deadline, rng)
        }
        game_config::Difficulty::Expert => {
            expert_action(board_snapshot, rack, reserve_size, deadline)
        }
    }
}

// Up to three best placements as "!place h8h word (points)".
pub fn generate_hints(
    board_snapshot: &validator::BoardSnapshot,
    rack: &[u8],
    budget: Duration,
) -> Vec<String> {
    let alphabet = board_snapshot.alphabet();
    let mut candidates =
        movegen::generate_placements(board_snapshot, rack, Some(Instant::now() + budget))
            .candidates;
    candidates.sort_by(|a, b| b.points.cmp(&a.points));
    let mut hints = Vec::<String>::with_capacity(MAX_HINTS);
    for candidate in candidates.iter() {
        let hint = format!(
            "{} ({})",
            command::Action::Place(candidate.placement.clone()).fmt(alphabet),
            candidate.points
        );
        if !hints.contains(&hint) {
            hints.push(hint);
            if hints.len() >= MAX_HINTS {
                break;
            }
        }
    }
    if hints.is_empty() {
        hints.push(NO_HINT_AVAILABLE.into());
    }
    hints
}

// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, command, matrix, validator};
use std::time::Instant;

#[derive(Clone, Copy)]
struct CrossSet {
    // bit t is set when letter t may be laid here
    bits: u32,
    // face value of the perpendicular tiles already on the board
    score: i16,
    has_cross_word: bool,
}

const ANY_LETTER: u32 = !1;

const UNCONSTRAINED: CrossSet = CrossSet {
    bits: ANY_LETTER,
    score: 0,
    has_cross_word: false,
};

// How many recursion steps between deadline checks.
const DEADLINE_CHECK_INTERVAL: u32 = 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub placement: command::Placement,
    pub points: u32,
}

pub struct Search {
    pub candidates: Vec<Candidate>,
    // When set, candidates holds only what was found before the deadline.
    pub timed_out: bool,
}

// Cross-sets for plays in the `down` direction; their cross-words run the
// other way. Indexed like board cells; occupied cells get no letters.
fn gen_cross_sets(board_snapshot: &validator::BoardSnapshot, down: bool) -> Box<[CrossSet]> {
    let board = board_snapshot.board;
    let dim = board.dim();
    let (dr, dc) = if down { (0, 1) } else { (1, 0) };
    let mut cross_sets = vec![UNCONSTRAINED; dim.num_cells()].into_boxed_slice();
    let mut word_buffer = Vec::with_capacity(std::cmp::max(dim.rows, dim.cols) as usize);
    for row in 0..dim.rows {
        for col in 0..dim.cols {
            let cell_idx = dim.at_row_col(row, col);
            if board.tile_at(row, col) != 0 {
                cross_sets[cell_idx] = CrossSet {
                    bits: 0,
                    score: 0,
                    has_cross_word: false,
                };
                continue;
            }
            if board.tile_at(row - dr, col - dc) == 0 && board.tile_at(row + dr, col + dc) == 0 {
                continue;
            }
            let before = board.word_at(row - dr, col - dc, !down);
            let after = board.word_at(row + dr, col + dc, !down);
            // word_at on an empty square is empty, so only adjacent runs count
            word_buffer.clear();
            if board.tile_at(row - dr, col - dc) != 0 {
                word_buffer.extend_from_slice(&before.tiles);
            }
            let pos = word_buffer.len();
            word_buffer.push(0);
            if board.tile_at(row + dr, col + dc) != 0 {
                word_buffer.extend_from_slice(&after.tiles);
            }
            let alphabet = board_snapshot.alphabet();
            let score = word_buffer
                .iter()
                .map(|&tile| alphabet.score(tile) as i16)
                .sum::<i16>();
            let mut bits = 0u32;
            for letter in 1..alphabet.len() {
                word_buffer[pos] = letter;
                if board_snapshot.accepts(&word_buffer) {
                    bits |= 1 << letter;
                }
            }
            cross_sets[cell_idx] = CrossSet {
                bits,
                score,
                has_cross_word: true,
            };
        }
    }
    cross_sets
}

struct Env<'a> {
    board_snapshot: &'a validator::BoardSnapshot<'a>,
    alphabet: &'static alphabet::Alphabet<'static>,
    cross_sets: &'a [CrossSet],
    rack_tally: Box<[u8]>,
    strider: matrix::Strider,
    down: bool,
    lane: i8,
    // squares a word may hook onto: occupied, next to a tile, or the star
    is_anchor: Vec<bool>,
    word_buffer: Vec<u8>,
    start: i8,
    num_played: i8,
    first_played_idx: i8,
    deadline: Option<Instant>,
    steps: u32,
    timed_out: bool,
    found: Vec<Candidate>,
}

impl Env<'_> {
    #[inline(always)]
    fn tile_at(&self, idx: i8) -> u8 {
        self.board_snapshot.board.cells()[self.strider.at(idx)].tile
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn has_prefix(&self) -> bool {
        self.board_snapshot.dictionary.has_prefix(
            self.board_snapshot.dictionary_id,
            &self.alphabet.fmt_lookup(&self.word_buffer),
        )
    }

    // Some start within reach of the rack must touch an anchor.
    fn can_start_at(&self, start: i8) -> bool {
        if start > 0 && self.tile_at(start - 1) != 0 {
            return false;
        }
        let rack_len = self.rack_tally.iter().map(|&n| n as i32).sum::<i32>();
        let mut empties = 0;
        for idx in start..self.strider.len() {
            if self.tile_at(idx) == 0 {
                if empties == rack_len {
                    break;
                }
                empties += 1;
            }
            if self.is_anchor[idx as usize] {
                return true;
            }
        }
        false
    }
}

fn record(env: &mut Env, main_score: i16, cross_score: i16, word_multiplier: i16) {
    // A lone tile forming words both ways is already found across.
    if env.down
        && env.num_played == 1
        && env.cross_sets[env.strider.at(env.first_played_idx)].has_cross_word
    {
        return;
    }
    let game_config = env.board_snapshot.game_config;
    let points = main_score * word_multiplier
        + cross_score
        + game_config.num_played_bonus(env.num_played);
    let (row, col) = env
        .board_snapshot
        .board
        .dim()
        .row_col(env.down, env.lane, env.start);
    env.found.push(Candidate {
        placement: command::Placement {
            row,
            col,
            down: env.down,
            word: env.word_buffer.clone().into_boxed_slice(),
        },
        points: points.max(0) as u32,
    });
}

fn extend(
    env: &mut Env,
    mut idx: i8,
    mut main_score: i16,
    cross_score: i16,
    word_multiplier: i16,
    mut touched: bool,
) {
    env.steps += 1;
    if env.steps % DEADLINE_CHECK_INTERVAL == 0 && env.deadline_passed() {
        env.timed_out = true;
    }
    if env.timed_out {
        return;
    }

    let len = env.strider.len();
    let word_len_on_entry = env.word_buffer.len();
    // tiles already on the board are part of the word
    while idx < len {
        let tile = env.tile_at(idx);
        if tile == 0 {
            break;
        }
        env.word_buffer.push(tile);
        main_score += env.alphabet.score(tile) as i16;
        touched = true;
        idx += 1;
    }
    if env.word_buffer.len() > word_len_on_entry && !env.has_prefix() {
        env.word_buffer.truncate(word_len_on_entry);
        return;
    }

    if env.num_played > 0
        && touched
        && env.word_buffer.len() >= 2
        && env.board_snapshot.accepts(&env.word_buffer)
    {
        record(env, main_score, cross_score, word_multiplier);
    }

    if idx < len {
        let cell_idx = env.strider.at(idx);
        let cross_set = env.cross_sets[cell_idx];
        let premium = env.board_snapshot.board.cells()[cell_idx].bonus.premium();
        let touched = touched || env.is_anchor[idx as usize];
        for rack_tile in 0..env.rack_tally.len() {
            if env.rack_tally[rack_tile] == 0 {
                continue;
            }
            env.rack_tally[rack_tile] -= 1;
            env.num_played += 1;
            if env.num_played == 1 {
                env.first_played_idx = idx;
            }
            if rack_tile as u8 == alphabet::BLANK {
                for letter in 1..env.alphabet.len() {
                    if cross_set.bits & (1 << letter) != 0 {
                        lay_tile(
                            env,
                            idx,
                            letter | alphabet::BLANK_FLAG,
                            cross_set,
                            premium,
                            (main_score, cross_score, word_multiplier),
                            touched,
                        );
                    }
                }
            } else if cross_set.bits & (1 << rack_tile) != 0 {
                lay_tile(
                    env,
                    idx,
                    rack_tile as u8,
                    cross_set,
                    premium,
                    (main_score, cross_score, word_multiplier),
                    touched,
                );
            }
            env.num_played -= 1;
            env.rack_tally[rack_tile] += 1;
        }
    }

    env.word_buffer.truncate(word_len_on_entry);
}

fn lay_tile(
    env: &mut Env,
    idx: i8,
    tile: u8,
    cross_set: CrossSet,
    premium: board_layout::Premium,
    (main_score, cross_score, word_multiplier): (i16, i16, i16),
    touched: bool,
) {
    env.word_buffer.push(tile);
    if env.has_prefix() {
        let tile_value = env.alphabet.score(tile) as i16 * premium.tile_multiplier as i16;
        let cross_score = if cross_set.has_cross_word {
            cross_score + (cross_set.score + tile_value) * premium.word_multiplier as i16
        } else {
            cross_score
        };
        extend(
            env,
            idx + 1,
            main_score + tile_value,
            cross_score,
            word_multiplier * premium.word_multiplier as i16,
            touched,
        );
    }
    env.word_buffer.pop();
}

// Every legal placement of rack tiles, each scored as calculate_points
// would. Stops early once the deadline passes.
pub fn generate_placements(
    board_snapshot: &validator::BoardSnapshot,
    rack: &[u8],
    deadline: Option<Instant>,
) -> Search {
    let alphabet = board_snapshot.alphabet();
    let board = board_snapshot.board;
    let dim = board.dim();
    let is_first_turn = board.is_empty();
    let mut search = Search {
        candidates: Vec::new(),
        timed_out: false,
    };
    if rack.is_empty() {
        return search;
    }
    let mut rack_tally = vec![0u8; alphabet.len() as usize].into_boxed_slice();
    for &tile in rack {
        rack_tally[alphabet::rack_tile_of(tile) as usize] += 1;
    }

    for down in [false, true] {
        let cross_sets = gen_cross_sets(board_snapshot, down);
        let mut env = Env {
            board_snapshot,
            alphabet,
            cross_sets: &cross_sets,
            rack_tally: rack_tally.clone(),
            strider: dim.lane(down, 0),
            down,
            lane: 0,
            is_anchor: Vec::new(),
            word_buffer: Vec::new(),
            start: 0,
            num_played: 0,
            first_played_idx: 0,
            deadline,
            steps: 0,
            timed_out: false,
            found: std::mem::take(&mut search.candidates),
        };
        for lane in 0..dim.num_lanes(down) {
            env.lane = lane;
            env.strider = dim.lane(down, lane);
            env.is_anchor.clear();
            for idx in 0..env.strider.len() {
                let (row, col) = dim.row_col(down, lane, idx);
                env.is_anchor.push(if is_first_turn {
                    row == board.star_row() && col == board.star_col()
                } else {
                    board.tile_at(row, col) != 0 || board.has_occupied_neighbor(row, col)
                });
            }
            for start in 0..env.strider.len() {
                if !env.can_start_at(start) {
                    continue;
                }
                if env.deadline_passed() {
                    env.timed_out = true;
                }
                if env.timed_out {
                    break;
                }
                env.start = start;
                env.word_buffer.clear();
                extend(&mut env, start, 0, 0, 1, false);
            }
        }
        search.candidates = env.found;
        if env.timed_out {
            log::debug!(
                "placement search stopped at the deadline with {} candidates",
                search.candidates.len()
            );
            search.timed_out = true;
            return search;
        }
    }
    search
}

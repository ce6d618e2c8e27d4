// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error, matrix};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub bonus: board_layout::BonusKind,
    // 0 when empty, else a machine tile (0x80 set for a played blank).
    pub tile: u8,
    pub placed_this_turn: bool,
}

// A contiguous run of tiles on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub row: i8,
    pub col: i8,
    pub down: bool,
    pub tiles: Vec<u8>,
}

impl Word {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[derive(Debug)]
pub struct Board {
    cells: Box<[Cell]>,
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

impl Clone for Board {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            dim: self.dim,
            star_row: self.star_row,
            star_col: self.star_col,
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.cells.clone_from(&source.cells);
        self.dim = source.dim;
        self.star_row = source.star_row;
        self.star_col = source.star_col;
    }
}

impl Board {
    pub fn new(board_layout: &board_layout::BoardLayout) -> Self {
        let dim = board_layout.dim();
        Self {
            cells: board_layout
                .bonuses()
                .iter()
                .map(|&bonus| Cell {
                    bonus,
                    tile: 0,
                    placed_this_turn: false,
                })
                .collect(),
            dim,
            star_row: board_layout.star_row(),
            star_col: board_layout.star_col(),
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn star_row(&self) -> i8 {
        self.star_row
    }

    #[inline(always)]
    pub fn star_col(&self) -> i8 {
        self.star_col
    }

    #[inline(always)]
    pub fn cell(&self, row: i8, col: i8) -> &Cell {
        &self.cells[self.dim.at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // 0 for empty or out of bounds.
    #[inline(always)]
    pub fn tile_at(&self, row: i8, col: i8) -> u8 {
        if self.dim.contains(row, col) {
            self.cells[self.dim.at_row_col(row, col)].tile
        } else {
            0
        }
    }

    #[inline(always)]
    pub fn bonus_at(&self, row: i8, col: i8) -> board_layout::BonusKind {
        self.cell(row, col).bonus
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.tile == 0)
    }

    pub fn num_tiles(&self) -> usize {
        self.cells.iter().filter(|cell| cell.tile != 0).count()
    }

    pub fn place(&mut self, row: i8, col: i8, tile: u8) -> error::Returns<()> {
        if !self.dim.contains(row, col) {
            return_error!(format!("square ({}, {}) is off the board", row, col));
        }
        if alphabet::letter_of(tile) == 0 {
            return_error!("cannot place an unassigned blank".into());
        }
        let cell = &mut self.cells[self.dim.at_row_col(row, col)];
        if cell.tile != 0 {
            return_error!(format!("square ({}, {}) is occupied", row, col));
        }
        cell.tile = tile;
        cell.placed_this_turn = true;
        Ok(())
    }

    // Takes back a tile, returning what was there.
    pub fn remove(&mut self, row: i8, col: i8) -> Option<u8> {
        if !self.dim.contains(row, col) {
            return None;
        }
        let cell = &mut self.cells[self.dim.at_row_col(row, col)];
        if cell.tile == 0 {
            return None;
        }
        cell.placed_this_turn = false;
        Some(std::mem::take(&mut cell.tile))
    }

    pub fn clear_placed_flags(&mut self) {
        self.cells
            .iter_mut()
            .for_each(|cell| cell.placed_this_turn = false);
    }

    pub fn has_occupied_neighbor(&self, row: i8, col: i8) -> bool {
        self.tile_at(row - 1, col) != 0
            || self.tile_at(row + 1, col) != 0
            || self.tile_at(row, col - 1) != 0
            || self.tile_at(row, col + 1) != 0
    }

    // The whole run through (row, col) in the given direction. The square
    // itself need not be occupied; an empty one yields an empty word.
    pub fn word_at(&self, row: i8, col: i8, down: bool) -> Word {
        let (dr, dc) = if down { (1, 0) } else { (0, 1) };
        let (mut r, mut c) = (row, col);
        while self.tile_at(r - dr, c - dc) != 0 {
            r -= dr;
            c -= dc;
        }
        let (start_row, start_col) = (r, c);
        let mut tiles = Vec::new();
        loop {
            let tile = self.tile_at(r, c);
            if tile == 0 {
                break;
            }
            tiles.push(tile);
            r += dr;
            c += dc;
        }
        Word {
            row: start_row,
            col: start_col,
            down,
            tiles,
        }
    }

    // Every run of two or more tiles, across words first.
    pub fn words(&self) -> Vec<Word> {
        let mut words = Vec::new();
        for down in [false, true] {
            for lane in 0..self.dim.num_lanes(down) {
                let strider = self.dim.lane(down, lane);
                let mut idx = 0;
                while idx < strider.len() {
                    if self.cells[strider.at(idx)].tile == 0 {
                        idx += 1;
                        continue;
                    }
                    let start = idx;
                    let mut tiles = Vec::new();
                    while idx < strider.len() && self.cells[strider.at(idx)].tile != 0 {
                        tiles.push(self.cells[strider.at(idx)].tile);
                        idx += 1;
                    }
                    if tiles.len() >= 2 {
                        let (row, col) = self.dim.row_col(down, lane, start);
                        words.push(Word {
                            row,
                            col,
                            down,
                            tiles,
                        });
                    }
                }
            }
        }
        words
    }

    pub fn tiles(&self) -> Box<[u8]> {
        self.cells.iter().map(|cell| cell.tile).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn board_with(words: &[(i8, i8, bool, &str)]) -> Board {
        let alphabet = alphabet::make_english_alphabet();
        let mut board = Board::new(&board_layout::make_standard_board_layout());
        for &(row, col, down, s) in words {
            for (i, tile) in (0i8..).zip(alphabet.parse_tiles(s).unwrap()) {
                let (r, c) = if down { (row + i, col) } else { (row, col + i) };
                if board.tile_at(r, c) == 0 {
                    board.place(r, c, tile).unwrap();
                }
            }
        }
        board.clear_placed_flags();
        board
    }

    #[test]
    fn new_board_copies_the_layout() {
        let layout = board_layout::make_standard_board_layout();
        let board = Board::new(&layout);
        for row in 0..15 {
            for col in 0..15 {
                assert_eq!(board.bonus_at(row, col), layout.bonus_at(row, col));
                assert_eq!(board.tile_at(row, col), 0);
            }
        }
        assert!(board.is_empty());
    }

    #[test]
    fn place_and_remove() {
        let mut board = Board::new(&board_layout::make_standard_board_layout());
        board.place(7, 7, 3).unwrap();
        assert!(board.cell(7, 7).placed_this_turn);
        assert!(board.place(7, 7, 4).is_err());
        assert!(board.place(15, 0, 4).is_err());
        assert!(board.place(0, 0, 0).is_err());
        assert_eq!(board.remove(7, 7), Some(3));
        assert_eq!(board.remove(7, 7), None);
        assert!(board.is_empty());
        // bonuses survive occupation
        assert_eq!(board.bonus_at(7, 7), board_layout::BonusKind::DoubleWord);
    }

    #[test]
    fn word_at_walks_back_to_the_start() {
        let board = board_with(&[(7, 5, false, "cat"), (6, 6, true, "mat")]);
        let alphabet = alphabet::make_english_alphabet();
        let across = board.word_at(7, 7, false);
        assert_eq!((across.row, across.col), (7, 5));
        assert_eq!(alphabet.fmt_word(&across.tiles), "cat");
        let down = board.word_at(8, 6, true);
        assert_eq!((down.row, down.col), (6, 6));
        assert_eq!(alphabet.fmt_word(&down.tiles), "mat");
        assert!(board.word_at(0, 0, true).is_empty());
    }

    #[test]
    fn words_lists_runs_of_two_or_more() {
        let board = board_with(&[(7, 5, false, "cat"), (6, 6, true, "mat")]);
        let alphabet = alphabet::make_english_alphabet();
        let listed = board
            .words()
            .iter()
            .map(|word| alphabet.fmt_word(&word.tiles))
            .collect::<Vec<_>>();
        assert_eq!(listed, vec!["cat", "mat"]);
    }

    #[test]
    fn clone_is_independent() {
        let board = board_with(&[(7, 6, false, "ox")]);
        let mut scratch = board.clone();
        scratch.place(8, 6, 1).unwrap();
        assert_eq!(board.tile_at(8, 6), 0);
        assert_eq!(scratch.tile_at(8, 6), 1);
        scratch.clone_from(&board);
        assert_eq!(scratch.tile_at(8, 6), 0);
    }
}

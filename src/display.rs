// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, board_layout};

#[inline(always)]
pub fn empty_label(board: &board::Board, row: i8, col: i8) -> &'static str {
    if row == board.star_row() && col == board.star_col() {
        return "*";
    }
    match board.bonus_at(row, col) {
        board_layout::BonusKind::TripleWord => "=",
        board_layout::BonusKind::DoubleWord => "-",
        board_layout::BonusKind::TripleLetter => "\"",
        board_layout::BonusKind::DoubleLetter => "'",
        board_layout::BonusKind::None => ".",
    }
}

#[inline(always)]
pub fn board_label<'a>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board: &board::Board,
    row: i8,
    col: i8,
) -> &'a str {
    alphabet
        .from_board(board.tile_at(row, col))
        .unwrap_or_else(|| empty_label(board, row, col))
}

// Rows are lettered a.. and columns numbered 1.., as in placements.
pub fn fmt_board<'a>(alphabet: &'a alphabet::Alphabet<'a>, board: &board::Board) -> Vec<String> {
    let dim = board.dim();
    let mut lines = Vec::with_capacity(dim.rows as usize + 4);
    let mut header = String::from("   ");
    for c in 0..dim.cols {
        header.push_str(&format!("{:>2}", c + 1));
    }
    let border = format!("  +{}+", "-".repeat(2 * dim.cols as usize + 1));
    lines.push(header.clone());
    lines.push(border.clone());
    for r in 0..dim.rows {
        let mut line = format!("{} |", ((r as u8) + b'a') as char);
        for c in 0..dim.cols {
            line.push(' ');
            line.push_str(board_label(alphabet, board, r, c));
        }
        line.push_str(" |");
        lines.push(line);
    }
    lines.push(border);
    lines.push(header);
    lines
}

pub fn print_board<'a>(alphabet: &'a alphabet::Alphabet<'a>, board: &board::Board) {
    for line in fmt_board(alphabet, board) {
        println!("{}", line);
    }
}

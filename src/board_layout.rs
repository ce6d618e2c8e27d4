// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BonusKind {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub tile_multiplier: i8,
}

impl BonusKind {
    #[inline(always)]
    pub fn premium(self) -> Premium {
        match self {
            BonusKind::None => Premium {
                word_multiplier: 1,
                tile_multiplier: 1,
            },
            BonusKind::DoubleLetter => Premium {
                word_multiplier: 1,
                tile_multiplier: 2,
            },
            BonusKind::TripleLetter => Premium {
                word_multiplier: 1,
                tile_multiplier: 3,
            },
            BonusKind::DoubleWord => Premium {
                word_multiplier: 2,
                tile_multiplier: 1,
            },
            BonusKind::TripleWord => Premium {
                word_multiplier: 3,
                tile_multiplier: 1,
            },
        }
    }

    #[inline(always)]
    pub fn is_word_bonus(self) -> bool {
        matches!(self, BonusKind::DoubleWord | BonusKind::TripleWord)
    }
}

// (row, col), zero-based.
static TRIPLE_WORD_SQUARES: &[(i8, i8)] = &[
    (0, 0),
    (0, 7),
    (0, 14),
    (7, 0),
    (7, 14),
    (14, 0),
    (14, 7),
    (14, 14),
];

static DOUBLE_WORD_SQUARES: &[(i8, i8)] = &[
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (1, 13),
    (2, 12),
    (3, 11),
    (4, 10),
    (13, 1),
    (12, 2),
    (11, 3),
    (10, 4),
    (13, 13),
    (12, 12),
    (11, 11),
    (10, 10),
    (7, 7),
];

static TRIPLE_LETTER_SQUARES: &[(i8, i8)] = &[
    (1, 5),
    (1, 9),
    (5, 1),
    (5, 5),
    (5, 9),
    (5, 13),
    (9, 1),
    (9, 5),
    (9, 9),
    (9, 13),
    (13, 5),
    (13, 9),
];

static DOUBLE_LETTER_SQUARES: &[(i8, i8)] = &[
    (0, 3),
    (0, 11),
    (2, 6),
    (2, 8),
    (3, 0),
    (3, 7),
    (3, 14),
    (6, 2),
    (6, 6),
    (6, 8),
    (6, 12),
    (7, 3),
    (7, 11),
    (8, 2),
    (8, 6),
    (8, 8),
    (8, 12),
    (11, 0),
    (11, 7),
    (11, 14),
    (12, 6),
    (12, 8),
    (14, 3),
    (14, 11),
];

pub struct BoardLayout {
    bonuses: Box<[BonusKind]>,
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

impl BoardLayout {
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
    pub fn bonus_at(&self, row: i8, col: i8) -> BonusKind {
        self.bonuses[self.dim.at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn bonuses(&self) -> &[BonusKind] {
        &self.bonuses
    }
}

pub fn make_standard_board_layout() -> BoardLayout {
    let dim = matrix::Dim { rows: 15, cols: 15 };
    let mut bonuses = vec![BonusKind::None; dim.num_cells()].into_boxed_slice();
    for (squares, kind) in [
        (TRIPLE_WORD_SQUARES, BonusKind::TripleWord),
        (DOUBLE_WORD_SQUARES, BonusKind::DoubleWord),
        (TRIPLE_LETTER_SQUARES, BonusKind::TripleLetter),
        (DOUBLE_LETTER_SQUARES, BonusKind::DoubleLetter),
    ] {
        for &(row, col) in squares {
            bonuses[dim.at_row_col(row, col)] = kind;
        }
    }
    BoardLayout {
        bonuses,
        dim,
        star_row: 7,
        star_col: 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // = triple word, - double word, " triple letter, ' double letter.
    static EXPECTED: [&str; 15] = [
        "=  '   =   '  =",
        " -   \"   \"   - ",
        "  -   ' '   -  ",
        "'  -   '   -  '",
        "    -     -    ",
        " \"   \"   \"   \" ",
        "  '   ' '   '  ",
        "=  '   -   '  =",
        "  '   ' '   '  ",
        " \"   \"   \"   \" ",
        "    -     -    ",
        "'  -   '   -  '",
        "  -   ' '   -  ",
        " -   \"   \"   - ",
        "=  '   =   '  =",
    ];

    #[test]
    fn every_square_matches_the_table() {
        let layout = make_standard_board_layout();
        for (row, line) in (0i8..).zip(EXPECTED.iter()) {
            for (col, c) in (0i8..).zip(line.chars()) {
                let expected = match c {
                    '=' => BonusKind::TripleWord,
                    '-' => BonusKind::DoubleWord,
                    '"' => BonusKind::TripleLetter,
                    '\'' => BonusKind::DoubleLetter,
                    _ => BonusKind::None,
                };
                assert_eq!(layout.bonus_at(row, col), expected, "at {} {}", row, col);
            }
        }
    }

    #[test]
    fn layout_is_symmetric() {
        let layout = make_standard_board_layout();
        for row in 0..15 {
            for col in 0..15 {
                assert_eq!(layout.bonus_at(row, col), layout.bonus_at(col, row));
                assert_eq!(layout.bonus_at(row, col), layout.bonus_at(14 - row, col));
            }
        }
        assert_eq!(layout.bonus_at(7, 7), BonusKind::DoubleWord);
    }
}

// Copyright (C) 2020-2026 Andy Kurnia.

// Machine tiles: 0 is the blank (on a rack) or an empty square (on a board),
// 1..=26 are the natural letters a..z, and 0x80 | t is a blank played as t.
// Text uses lowercase for natural tiles, uppercase for a blank played as
// that letter, and '*' for an unplayed blank.

use super::error;

pub const BLANK: u8 = 0;
pub const BLANK_FLAG: u8 = 0x80;

pub struct Tile<'a> {
    label: &'a str,
    blank_label: &'a str,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet<'a> {
    tiles: &'a [Tile<'a>],
    num_tiles: u16,
}

pub enum Alphabet<'a> {
    Static(StaticAlphabet<'a>),
}

// The letter regardless of how it was played.
#[inline(always)]
pub fn letter_of(tile: u8) -> u8 {
    tile & !BLANK_FLAG
}

#[inline(always)]
pub fn is_blank_played(tile: u8) -> bool {
    tile & BLANK_FLAG != 0
}

// What a board tile took from the rack: the blank for 0x81, else itself.
#[inline(always)]
pub fn rack_tile_of(tile: u8) -> u8 {
    tile & !((tile as i8) >> 7) as u8
}

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.tiles.len() as u8,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> &'a Tile<'a> {
        match self {
            Alphabet::Static(x) => &x.tiles[idx as usize],
        }
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        match self {
            Alphabet::Static(x) => x.num_tiles,
        }
    }

    #[inline(always)]
    pub fn from_board(&self, idx: u8) -> Option<&'a str> {
        let c = letter_of(idx);
        if c == 0 || c >= self.len() {
            None
        } else if is_blank_played(idx) {
            Some(self.get(c).blank_label)
        } else {
            Some(self.get(c).label)
        }
    }

    #[inline(always)]
    pub fn from_rack(&self, idx: u8) -> Option<&'a str> {
        if idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    // Face value; a blank played as a letter is worth the blank's value.
    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        self.get(rack_tile_of(idx)).score
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    // Parses one character of a placement or exchange.
    pub fn tile_from_char(&self, c: char) -> Option<u8> {
        if c == '*' {
            return Some(BLANK);
        }
        for idx in 1..self.len() {
            let tile = self.get(idx);
            if tile.label.chars().eq(std::iter::once(c)) {
                return Some(idx);
            }
            if tile.blank_label.chars().eq(std::iter::once(c)) {
                return Some(idx | BLANK_FLAG);
            }
        }
        None
    }

    pub fn parse_tiles(&self, s: &str) -> error::Returns<Vec<u8>> {
        let mut v = Vec::with_capacity(s.len());
        for c in s.chars() {
            match self.tile_from_char(c) {
                Some(tile) => v.push(tile),
                None => {
                    return_error!(format!("invalid letter {:?} in {:?}", c, s));
                }
            }
        }
        Ok(v)
    }

    pub fn fmt_word(&self, word: &[u8]) -> String {
        word.iter()
            .filter_map(|&tile| self.from_board(tile))
            .collect()
    }

    pub fn fmt_rack(&self, rack: &[u8]) -> String {
        rack.iter()
            .filter_map(|&tile| self.from_rack(tile))
            .collect()
    }

    // Lowercase spelling used for dictionary lookups.
    pub fn fmt_lookup(&self, word: &[u8]) -> String {
        word.iter()
            .filter_map(|&tile| self.from_rack(letter_of(tile)))
            .collect()
    }
}

pub static ENGLISH_ALPHABET: Alphabet = Alphabet::Static(StaticAlphabet {
    tiles: &[
        Tile {
            label: "*",
            blank_label: "*",
            freq: 2,
            score: 0,
        },
        Tile {
            label: "a",
            blank_label: "A",
            freq: 9,
            score: 1,
        },
        Tile {
            label: "b",
            blank_label: "B",
            freq: 2,
            score: 3,
        },
        Tile {
            label: "c",
            blank_label: "C",
            freq: 2,
            score: 3,
        },
        Tile {
            label: "d",
            blank_label: "D",
            freq: 4,
            score: 2,
        },
        Tile {
            label: "e",
            blank_label: "E",
            freq: 12,
            score: 1,
        },
        Tile {
            label: "f",
            blank_label: "F",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "g",
            blank_label: "G",
            freq: 3,
            score: 2,
        },
        Tile {
            label: "h",
            blank_label: "H",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "i",
            blank_label: "I",
            freq: 9,
            score: 1,
        },
        Tile {
            label: "j",
            blank_label: "J",
            freq: 1,
            score: 8,
        },
        Tile {
            label: "k",
            blank_label: "K",
            freq: 1,
            score: 5,
        },
        Tile {
            label: "l",
            blank_label: "L",
            freq: 4,
            score: 1,
        },
        Tile {
            label: "m",
            blank_label: "M",
            freq: 2,
            score: 3,
        },
        Tile {
            label: "n",
            blank_label: "N",
            freq: 6,
            score: 1,
        },
        Tile {
            label: "o",
            blank_label: "O",
            freq: 8,
            score: 1,
        },
        Tile {
            label: "p",
            blank_label: "P",
            freq: 2,
            score: 3,
        },
        Tile {
            label: "q",
            blank_label: "Q",
            freq: 1,
            score: 10,
        },
        Tile {
            label: "r",
            blank_label: "R",
            freq: 6,
            score: 1,
        },
        Tile {
            label: "s",
            blank_label: "S",
            freq: 4,
            score: 1,
        },
        Tile {
            label: "t",
            blank_label: "T",
            freq: 6,
            score: 1,
        },
        Tile {
            label: "u",
            blank_label: "U",
            freq: 4,
            score: 1,
        },
        Tile {
            label: "v",
            blank_label: "V",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "w",
            blank_label: "W",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "x",
            blank_label: "X",
            freq: 1,
            score: 8,
        },
        Tile {
            label: "y",
            blank_label: "Y",
            freq: 2,
            score: 4,
        },
        Tile {
            label: "z",
            blank_label: "Z",
            freq: 1,
            score: 10,
        },
    ],
    num_tiles: 100,
});

pub fn make_english_alphabet() -> &'static Alphabet<'static> {
    &ENGLISH_ALPHABET
}

// Copyright (C) 2020-2026 Andy Kurnia.

// Text form, as typed by a player:
//   !place h8h loupe   (row letter a-o, column 1-15, h across or v down)
//   !exchange ab*      (lowercase letters, * for a blank)
//   !pass
//   !hint
// In a placement, lowercase is a natural tile and uppercase a blank played
// as that letter. Letters over occupied squares must repeat what is there.

use super::{alphabet, error};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: i8,
    pub col: i8,
    pub down: bool,
    // One tile per covered square, starting at (row, col).
    pub word: Box<[u8]>,
}

impl Placement {
    // (row, col) of the i-th covered square.
    #[inline(always)]
    pub fn square(&self, i: usize) -> (i8, i8) {
        if self.down {
            (self.row + i as i8, self.col)
        } else {
            (self.row, self.col + i as i8)
        }
    }

    pub fn squares(&self) -> impl Iterator<Item = ((i8, i8), u8)> + '_ {
        (0..self.word.len()).map(|i| (self.square(i), self.word[i]))
    }

    pub fn fmt_position(&self) -> String {
        format!(
            "{}{}{}",
            (b'a' + self.row as u8) as char,
            self.col as i32 + 1,
            if self.down { 'v' } else { 'h' }
        )
    }

    pub fn fmt(&self, alphabet: &alphabet::Alphabet) -> String {
        format!("{} {}", self.fmt_position(), alphabet.fmt_word(&self.word))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Place(Placement),
    Exchange { tiles: Box<[u8]> },
    Pass,
    Hint,
}

impl Action {
    pub fn fmt(&self, alphabet: &alphabet::Alphabet) -> String {
        match self {
            Action::Place(placement) => format!("!place {}", placement.fmt(alphabet)),
            Action::Exchange { tiles } => format!("!exchange {}", alphabet.fmt_rack(tiles)),
            Action::Pass => "!pass".into(),
            Action::Hint => "!hint".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub sender: String,
    pub action: Action,
}

impl Command {
    pub fn new(sender: &str, action: Action) -> Self {
        Self {
            sender: sender.to_string(),
            action,
        }
    }
}

fn parse_position(s: &str) -> error::Returns<(i8, i8, bool)> {
    let mut chars = s.chars();
    let row = match chars.next() {
        Some(c @ 'a'..='o') => (c as u8 - b'a') as i8,
        _ => {
            return_error!(format!("bad row in {:?}", s));
        }
    };
    let rest = chars.as_str();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let col = match rest[..digits_end].parse::<i8>() {
        Ok(col @ 1..=15) => col - 1,
        _ => {
            return_error!(format!("bad column in {:?}", s));
        }
    };
    let down = match &rest[digits_end..] {
        "" | "h" => false,
        "v" => true,
        _ => {
            return_error!(format!("bad orientation in {:?}", s));
        }
    };
    Ok((row, col, down))
}

pub fn parse_action(alphabet: &alphabet::Alphabet, s: &str) -> error::Returns<Action> {
    let mut args = s.split_whitespace();
    let verb = args.next().unwrap_or("");
    let rest = args.collect::<Vec<_>>();
    match (verb, rest.as_slice()) {
        ("!place", [position, letters]) => {
            let (row, col, down) = parse_position(position)?;
            let word = alphabet.parse_tiles(letters)?;
            if word.iter().any(|&tile| alphabet::letter_of(tile) == 0) {
                return_error!("a placed blank must name its letter in uppercase".into());
            }
            Ok(Action::Place(Placement {
                row,
                col,
                down,
                word: word.into_boxed_slice(),
            }))
        }
        ("!exchange", [letters]) => {
            let tiles = alphabet.parse_tiles(letters)?;
            if tiles.iter().any(|&tile| alphabet::is_blank_played(tile)) {
                return_error!("exchange blanks as *".into());
            }
            Ok(Action::Exchange {
                tiles: tiles.into_boxed_slice(),
            })
        }
        ("!pass", []) => Ok(Action::Pass),
        ("!hint", []) => Ok(Action::Hint),
        ("!place", _) | ("!exchange", _) | ("!pass", _) | ("!hint", _) => {
            return_error!(format!("wrong number of arguments in {:?}", s));
        }
        _ => {
            return_error!(format!("unknown command {:?}", verb));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_placements() {
        let alphabet = alphabet::make_english_alphabet();
        let action = parse_action(alphabet, "!place h8h loUpe").unwrap();
        match &action {
            Action::Place(placement) => {
                assert_eq!((placement.row, placement.col, placement.down), (7, 7, false));
                assert_eq!(placement.word.len(), 5);
                assert_eq!(placement.square(4), (7, 11));
            }
            _ => panic!("expected a placement"),
        }
        assert_eq!(action.fmt(alphabet), "!place h8h loUpe");
        match parse_action(alphabet, "!place o15v x").unwrap() {
            Action::Place(placement) => {
                assert_eq!((placement.row, placement.col, placement.down), (14, 14, true));
                assert_eq!(placement.square(0), (14, 14));
            }
            _ => panic!("expected a placement"),
        }
        match parse_action(alphabet, "!place c3 a").unwrap() {
            Action::Place(placement) => assert!(!placement.down),
            _ => panic!("expected a placement"),
        }
    }

    #[test]
    fn rejects_bad_input() {
        let alphabet = alphabet::make_english_alphabet();
        assert!(parse_action(alphabet, "!place p8h word").is_err());
        assert!(parse_action(alphabet, "!place h16h word").is_err());
        assert!(parse_action(alphabet, "!place h8x word").is_err());
        assert!(parse_action(alphabet, "!place h8h wo*d").is_err());
        assert!(parse_action(alphabet, "!place h8h").is_err());
        assert!(parse_action(alphabet, "!exchange aB").is_err());
        assert!(parse_action(alphabet, "!pass now").is_err());
        assert!(parse_action(alphabet, "!dance").is_err());
    }

    #[test]
    fn parses_the_rest() {
        let alphabet = alphabet::make_english_alphabet();
        assert_eq!(
            parse_action(alphabet, "!exchange a*z").unwrap(),
            Action::Exchange {
                tiles: vec![1, 0, 26].into_boxed_slice()
            }
        );
        assert_eq!(parse_action(alphabet, "!pass").unwrap(), Action::Pass);
        assert_eq!(parse_action(alphabet, " !hint ").unwrap(), Action::Hint);
    }
}

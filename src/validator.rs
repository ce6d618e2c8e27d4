// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, command, dictionary, game_config};

// Everything a placement is judged against.
pub struct BoardSnapshot<'a> {
    pub board: &'a board::Board,
    pub game_config: &'a game_config::GameConfig,
    pub dictionary: &'a dyn dictionary::Dictionary,
    pub dictionary_id: &'a str,
}

impl BoardSnapshot<'_> {
    #[inline(always)]
    pub fn alphabet(&self) -> &'static alphabet::Alphabet<'static> {
        self.game_config.alphabet()
    }

    // Single letters are always fine.
    pub fn accepts(&self, tiles: &[u8]) -> bool {
        tiles.len() < 2
            || self
                .dictionary
                .in_dictionary(self.dictionary_id, &self.alphabet().fmt_lookup(tiles))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    NoLetters,
    OffBoard,
    // A letter over an occupied square names a different letter.
    Mismatch { row: i8, col: i8 },
    NothingPlaced,
    FirstWordTooShort,
    FirstWordMissesStar,
    NotConnected,
    NotInDictionary(String),
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::NoLetters => write!(f, "no letters given"),
            PlacementError::OffBoard => write!(f, "word goes off the board"),
            PlacementError::Mismatch { row, col } => write!(
                f,
                "letter at {}{} does not match the board",
                (b'a' + *row as u8) as char,
                *col as i32 + 1
            ),
            PlacementError::NothingPlaced => write!(f, "no new letter is placed"),
            PlacementError::FirstWordTooShort => write!(f, "first word needs two letters"),
            PlacementError::FirstWordMissesStar => write!(f, "first word must cover the center"),
            PlacementError::NotConnected => write!(f, "word does not touch the board"),
            PlacementError::NotInDictionary(word) => write!(f, "{:?} is not a word", word),
        }
    }
}

impl std::error::Error for PlacementError {}

// A placement that passed, worked out on a scratch copy of the board.
#[derive(Debug)]
pub struct PlannedPlacement {
    // The board after the placement; new squares are flagged placed_this_turn.
    pub board: board::Board,
    // (row, col, tile) of every newly laid tile.
    pub placed: Vec<(i8, i8, u8)>,
    pub main_word: board::Word,
    pub cross_words: Vec<board::Word>,
}

impl PlannedPlacement {
    pub fn placed_tiles(&self) -> Vec<u8> {
        self.placed.iter().map(|&(_, _, tile)| tile).collect()
    }

    pub fn formed_words(&self) -> impl Iterator<Item = &board::Word> {
        std::iter::once(&self.main_word)
            .filter(|word| word.len() >= 2)
            .chain(self.cross_words.iter())
    }
}

pub fn check_placement(
    is_first_turn: bool,
    placement: &command::Placement,
    board_snapshot: &BoardSnapshot,
) -> Result<PlannedPlacement, PlacementError> {
    let original = board_snapshot.board;
    let dim = original.dim();
    if placement.word.is_empty() {
        return Err(PlacementError::NoLetters);
    }
    if placement
        .squares()
        .any(|((row, col), _)| !dim.contains(row, col))
    {
        return Err(PlacementError::OffBoard);
    }

    let mut scratch = original.clone();
    scratch.clear_placed_flags();
    let mut placed = Vec::with_capacity(placement.word.len());
    let mut plays_through = false;
    for ((row, col), tile) in placement.squares() {
        let existing = original.tile_at(row, col);
        if existing != 0 {
            if alphabet::letter_of(existing) != alphabet::letter_of(tile) {
                return Err(PlacementError::Mismatch { row, col });
            }
            plays_through = true;
        } else {
            if scratch.place(row, col, tile).is_err() {
                return Err(PlacementError::Mismatch { row, col });
            }
            placed.push((row, col, tile));
        }
    }
    if placed.is_empty() {
        return Err(PlacementError::NothingPlaced);
    }

    if is_first_turn {
        if placement.word.len() < 2 {
            return Err(PlacementError::FirstWordTooShort);
        }
        if !placement.squares().any(|((row, col), _)| {
            row == original.star_row() && col == original.star_col()
        }) {
            return Err(PlacementError::FirstWordMissesStar);
        }
    } else if !plays_through
        && !placed
            .iter()
            .any(|&(row, col, _)| original.has_occupied_neighbor(row, col))
    {
        return Err(PlacementError::NotConnected);
    }

    let alphabet = board_snapshot.alphabet();
    let main_word = scratch.word_at(placement.row, placement.col, placement.down);
    if !board_snapshot.accepts(&main_word.tiles) {
        return Err(PlacementError::NotInDictionary(
            alphabet.fmt_lookup(&main_word.tiles),
        ));
    }
    let mut cross_words = Vec::new();
    for &(row, col, _) in placed.iter() {
        let cross_word = scratch.word_at(row, col, !placement.down);
        if cross_word.len() < 2 {
            continue;
        }
        if !board_snapshot.accepts(&cross_word.tiles) {
            return Err(PlacementError::NotInDictionary(
                alphabet.fmt_lookup(&cross_word.tiles),
            ));
        }
        cross_words.push(cross_word);
    }

    Ok(PlannedPlacement {
        board: scratch,
        placed,
        main_word,
        cross_words,
    })
}

pub fn is_placement_legal(
    is_first_turn: bool,
    placement: &command::Placement,
    board_snapshot: &BoardSnapshot,
) -> bool {
    check_placement(is_first_turn, placement, board_snapshot).is_ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::board::tests::board_with;
    use crate::dictionary::WordListDictionary;

    pub(crate) fn dictionary_of(words: &[&str]) -> WordListDictionary {
        let mut dictionary = WordListDictionary::new();
        dictionary.add_words("en", words.iter());
        dictionary
    }

    pub(crate) fn placement(s: &str) -> command::Placement {
        match command::parse_action(alphabet::make_english_alphabet(), &format!("!place {}", s))
            .unwrap()
        {
            command::Action::Place(placement) => placement,
            _ => unreachable!(),
        }
    }

    fn legal(
        is_first_turn: bool,
        board: &board::Board,
        dictionary: &WordListDictionary,
        s: &str,
    ) -> Result<PlannedPlacement, PlacementError> {
        let game_config = game_config::make_classic_game_config();
        check_placement(
            is_first_turn,
            &placement(s),
            &BoardSnapshot {
                board,
                game_config: &game_config,
                dictionary,
                dictionary_id: "en",
            },
        )
    }

    #[test]
    fn first_word_must_cover_the_star() {
        let board = board_with(&[]);
        let dictionary = dictionary_of(&["loupe", "a"]);
        assert!(legal(true, &board, &dictionary, "h4h loupe").is_ok());
        assert!(legal(true, &board, &dictionary, "d8v loupe").is_ok());
        assert_eq!(
            legal(true, &board, &dictionary, "h9h loupe").err(),
            Some(PlacementError::FirstWordMissesStar)
        );
        assert_eq!(
            legal(true, &board, &dictionary, "h8h a").err(),
            Some(PlacementError::FirstWordTooShort)
        );
        assert_eq!(
            legal(true, &board, &dictionary, "h13h loupe").err(),
            Some(PlacementError::OffBoard)
        );
    }

    #[test]
    fn later_words_must_touch() {
        let board = board_with(&[(7, 7, false, "cat")]);
        let dictionary = dictionary_of(&["cat", "cats", "ta", "at", "loupe"]);
        assert_eq!(
            legal(false, &board, &dictionary, "a1h loupe").err(),
            Some(PlacementError::NotConnected)
        );
        // hooks on the end of the run
        let planned = legal(false, &board, &dictionary, "h11h s").unwrap();
        assert_eq!(
            alphabet::make_english_alphabet().fmt_word(&planned.main_word.tiles),
            "cats"
        );
        // plays through the a
        assert_eq!(
            legal(false, &board, &dictionary, "g9v tat").unwrap_err(),
            PlacementError::NotInDictionary("tat".into())
        );
        let planned = legal(false, &board, &dictionary, "g9v ta").unwrap();
        assert_eq!(planned.placed.len(), 1);
        assert!(planned.cross_words.is_empty());
    }

    #[test]
    fn every_formed_word_must_be_listed() {
        let board = board_with(&[(7, 7, false, "cat")]);
        // o under the a forms "ao" down; x under the t forms "tx".
        let dictionary = dictionary_of(&["cat", "ox", "ao"]);
        let err = legal(false, &board, &dictionary, "i9h ox").unwrap_err();
        assert_eq!(err, PlacementError::NotInDictionary("tx".into()));
        let dictionary = dictionary_of(&["cat", "ox", "ao", "tx"]);
        let planned = legal(false, &board, &dictionary, "i9h ox").unwrap();
        assert_eq!(planned.cross_words.len(), 2);
        assert_eq!(planned.formed_words().count(), 3);
        let dictionary = dictionary_of(&["cat", "ao", "tx"]);
        assert_eq!(
            legal(false, &board, &dictionary, "i9h ox").unwrap_err(),
            PlacementError::NotInDictionary("ox".into())
        );
    }

    #[test]
    fn mismatches_and_no_ops_are_rejected() {
        let board = board_with(&[(7, 7, false, "cat")]);
        let dictionary = dictionary_of(&["cat", "cot"]);
        assert_eq!(
            legal(false, &board, &dictionary, "h8h cot").unwrap_err(),
            PlacementError::Mismatch { row: 7, col: 8 }
        );
        assert_eq!(
            legal(false, &board, &dictionary, "h8h cat").unwrap_err(),
            PlacementError::NothingPlaced
        );
    }

    #[test]
    fn the_real_board_is_never_touched() {
        let board = board_with(&[(7, 7, false, "cat")]);
        let before = board.tiles();
        let dictionary = dictionary_of(&["cat"]);
        assert!(legal(false, &board, &dictionary, "i8h zzz").is_err());
        assert!(legal(false, &board, &dictionary, "h11h s").is_err());
        assert_eq!(board.tiles(), before);
    }
}

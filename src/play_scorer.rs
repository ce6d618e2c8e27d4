// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, command, game_config};

// Premiums only count on squares filled this turn.
fn word_score(game_config: &game_config::GameConfig, board: &board::Board, word: &board::Word) -> i32 {
    let alphabet = game_config.alphabet();
    let mut word_multiplier = 1;
    let mut word_score = 0i32;
    let (dr, dc) = if word.down { (1, 0) } else { (0, 1) };
    for (i, &tile) in (0i8..).zip(word.tiles.iter()) {
        let cell = board.cell(word.row + i * dr, word.col + i * dc);
        let face_value_tile_score = alphabet.score(tile) as i32;
        if cell.placed_this_turn {
            let premium = cell.bonus.premium();
            word_multiplier *= premium.word_multiplier as i32;
            word_score += face_value_tile_score * premium.tile_multiplier as i32;
        } else {
            word_score += face_value_tile_score;
        }
    }
    word_score * word_multiplier
}

// Points for a legal placement. The board must already hold the placement
// with its new squares flagged placed_this_turn (see validator). Pure: the
// same board and placement always give the same points.
pub fn calculate_points(
    game_config: &game_config::GameConfig,
    placement: &command::Placement,
    board: &board::Board,
) -> u32 {
    let mut recounted_score = 0i32;
    let mut num_played = 0i8;

    let main_word = board.word_at(placement.row, placement.col, placement.down);
    if main_word.len() >= 2 {
        recounted_score += word_score(game_config, board, &main_word);
    }

    for ((row, col), _) in placement.squares() {
        if !board.cell(row, col).placed_this_turn {
            continue;
        }
        num_played += 1;
        let perpendicular_word = board.word_at(row, col, !placement.down);
        if perpendicular_word.len() < 2 {
            // no perpendicular tile
            continue;
        }
        recounted_score += word_score(game_config, board, &perpendicular_word);
    }

    recounted_score += game_config.num_played_bonus(num_played) as i32;
    recounted_score.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board_with;
    use crate::validator::tests::{dictionary_of, placement};
    use crate::validator::{BoardSnapshot, check_placement};

    fn points(is_first_turn: bool, board: &board::Board, words: &[&str], s: &str) -> u32 {
        let game_config = game_config::make_classic_game_config();
        let dictionary = dictionary_of(words);
        let placement = placement(s);
        let planned = check_placement(
            is_first_turn,
            &placement,
            &BoardSnapshot {
                board,
                game_config: &game_config,
                dictionary: &dictionary,
                dictionary_id: "en",
            },
        )
        .unwrap();
        let first = calculate_points(&game_config, &placement, &planned.board);
        assert_eq!(first, calculate_points(&game_config, &placement, &planned.board));
        first
    }

    #[test]
    fn loupe_with_a_triple_letter_p() {
        // l o u p e on f3..f7; p sits on a triple letter, e hooks under a d.
        let board = board_with(&[(4, 6, false, "d")]);
        assert_eq!(points(false, &board, &["loupe", "de"], "f3h loupe"), 16);
    }

    #[test]
    fn full_rack_adds_fifty() {
        let board = board_with(&[]);
        // c on a double letter, b on the center double word.
        assert_eq!(points(true, &board, &["carabin"], "h4h carabin"), 78);
        assert_eq!(points(true, &board, &["carabi"], "h4h carabi"), 2 * (6 + 1 + 1 + 1 + 3 + 1));
    }

    #[test]
    fn old_premiums_are_not_reused() {
        let board = board_with(&[(7, 7, false, "cat")]);
        assert_eq!(points(false, &board, &["cats"], "h11h s"), 6);
    }

    #[test]
    fn blanks_are_worth_nothing() {
        let board = board_with(&[]);
        assert_eq!(points(true, &board, &["cat"], "h8h cAt"), 8);
    }

    #[test]
    fn cross_words_take_only_their_own_premium() {
        let board = board_with(&[(7, 6, false, "cat")]);
        // o lands on the i7 double letter under the c, x under the a.
        // main "ox": 2 + 8, cross "co": 3 + 2, cross "ax": 1 + 8
        assert_eq!(points(false, &board, &["ox", "co", "ax"], "i7h ox"), 10 + 5 + 9);
    }
}

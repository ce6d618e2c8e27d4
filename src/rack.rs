// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error};

// Rack tiles only: 0 is an unplayed blank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rack(Vec<u8>);

impl Rack {
    pub fn new() -> Self {
        Self(Vec::with_capacity(7))
    }

    pub fn from_tiles(tiles: &[u8]) -> Self {
        Self(tiles.iter().map(|&t| alphabet::rack_tile_of(t)).collect())
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u8] {
        &self.0
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline(always)]
    pub fn is_full(&self, rack_size: usize) -> bool {
        self.0.len() >= rack_size
    }

    pub fn add(&mut self, tile: u8) {
        self.0.push(alphabet::rack_tile_of(tile));
    }

    // A played blank (0x80 | t) can only come from a blank, and a natural
    // letter only from that letter.
    pub fn contains_tiles(&self, tiles: &[u8]) -> bool {
        let mut tally = [0u8; 256];
        self.0.iter().for_each(|&tile| tally[tile as usize] += 1);
        for &tile in tiles {
            let wanted = alphabet::rack_tile_of(tile) as usize;
            if tally[wanted] == 0 {
                return false;
            }
            tally[wanted] -= 1;
        }
        true
    }

    // All or nothing.
    pub fn remove_tiles(&mut self, tiles: &[u8]) -> error::Returns<()> {
        if !self.contains_tiles(tiles) {
            return_error!("rack does not hold those letters".into());
        }
        for &tile in tiles {
            let wanted = alphabet::rack_tile_of(tile);
            let pos = self
                .0
                .iter()
                .rposition(|&t| t == wanted)
                .ok_or("bad tile")?;
            self.0.swap_remove(pos);
        }
        Ok(())
    }

    pub fn take_all(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }

    pub fn value(&self, alphabet: &alphabet::Alphabet) -> i32 {
        self.0
            .iter()
            .map(|&tile| alphabet.score(tile) as i32)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rack_of(s: &str) -> Rack {
        Rack::from_tiles(&alphabet::make_english_alphabet().parse_tiles(s).unwrap())
    }

    fn tiles_of(s: &str) -> Vec<u8> {
        alphabet::make_english_alphabet().parse_tiles(s).unwrap()
    }

    #[test]
    fn uppercase_needs_a_blank() {
        let rack = rack_of("loupe*");
        assert!(rack.contains_tiles(&tiles_of("loupe")));
        assert!(rack.contains_tiles(&tiles_of("lOupe")));
        assert!(!rack.contains_tiles(&tiles_of("lOUpe")));
        assert!(!rack.contains_tiles(&tiles_of("loupee")));
        assert!(rack_of("loupe").contains_tiles(&tiles_of("loupe")));
        assert!(!rack_of("loupe").contains_tiles(&tiles_of("Loupe")));
    }

    #[test]
    fn remove_is_all_or_nothing() {
        let mut rack = rack_of("abc*");
        assert!(rack.remove_tiles(&tiles_of("abz")).is_err());
        assert_eq!(rack.len(), 4);
        rack.remove_tiles(&tiles_of("aZ")).unwrap();
        let mut left = rack.tiles().to_vec();
        left.sort_unstable();
        assert_eq!(left, tiles_of("bc"));
    }

    #[test]
    fn value_ignores_blanks() {
        let alphabet = alphabet::make_english_alphabet();
        assert_eq!(rack_of("qz*").value(alphabet), 20);
        assert!(Rack::new().is_empty());
        assert!(rack_of("abcdefg").is_full(7));
    }
}

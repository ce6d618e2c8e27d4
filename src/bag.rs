// Copyright (C) 2020-2026 Andy Kurnia.

// The reserve: how many copies of each rack tile are still undrawn.

use super::{alphabet, rack};
use rand::prelude::*;

pub struct Bag {
    counts: Box<[u8]>,
    total: u16,
}

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let counts = (0..alphabet.len())
            .map(|tile| alphabet.freq(tile))
            .collect::<Box<_>>();
        let total = counts.iter().map(|&count| count as u16).sum();
        Bag { counts, total }
    }

    pub fn empty(alphabet: &alphabet::Alphabet) -> Bag {
        Bag {
            counts: vec![0u8; alphabet.len() as usize].into_boxed_slice(),
            total: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.total as usize
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[inline(always)]
    pub fn count(&self, tile: u8) -> u8 {
        self.counts[tile as usize]
    }

    // Each remaining copy is equally likely.
    pub fn draw(&mut self, rng: &mut dyn RngCore) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let mut pick = rng.random_range(0..self.total);
        for (tile, count) in (0u8..).zip(self.counts.iter_mut()) {
            if pick < *count as u16 {
                *count -= 1;
                self.total -= 1;
                return Some(tile);
            }
            pick -= *count as u16;
        }
        None
    }

    // Tops the rack up to rack_size, returning what was drawn.
    pub fn replenish(
        &mut self,
        rng: &mut dyn RngCore,
        rack: &mut rack::Rack,
        rack_size: usize,
    ) -> Vec<u8> {
        let mut drawn = Vec::new();
        while !rack.is_full(rack_size) {
            match self.draw(rng) {
                Some(tile) => {
                    rack.add(tile);
                    drawn.push(tile);
                }
                None => break,
            }
        }
        drawn
    }

    // Returns rack tiles to the reserve; played blanks go back as blanks.
    pub fn put_back(&mut self, tiles: &[u8]) {
        for &tile in tiles {
            self.counts[alphabet::rack_tile_of(tile) as usize] += 1;
            self.total += 1;
        }
    }

    pub fn summary(&self, alphabet: &alphabet::Alphabet) -> String {
        let mut s = String::new();
        for (tile, &count) in (0u8..).zip(self.counts.iter()) {
            if count == 0 {
                continue;
            }
            if !s.is_empty() {
                s.push_str(", ");
            }
            s.push_str(alphabet.from_rack(tile).unwrap_or("?"));
            s.push_str(": ");
            s.push_str(&count.to_string());
        }
        s
    }
}

impl Clone for Bag {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            counts: self.counts.clone(),
            total: self.total,
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.counts.clone_from(&source.counts);
        self.total = source.total;
    }
}

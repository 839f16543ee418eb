//! Random firing order
//!
//! Deterministic for a given seed: the generator is seeded once and every
//! `first()` draws the next permutation from it.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::{PatternIterator, Slot};

#[derive(Debug, Clone)]
pub struct ShuffledIterator {
    rng: Pcg32,
    order: Vec<usize>,
    step: usize,
    slot: [Slot; 1],
}

impl ShuffledIterator {
    pub fn new(len: usize, seed: u64) -> Self {
        let mut it = Self {
            rng: Pcg32::seed_from_u64(seed),
            order: (0..len).collect(),
            step: 0,
            slot: [None],
        };
        it.first();
        it
    }

    /// Visit order of the current pass
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    fn load(&mut self) -> Option<&[Slot]> {
        let index = *self.order.get(self.step)?;
        self.slot = [Some(index)];
        Some(&self.slot[..])
    }
}

impl PatternIterator for ShuffledIterator {
    fn first(&mut self) -> Option<&[Slot]> {
        self.order.shuffle(&mut self.rng);
        self.step = 0;
        self.load()
    }

    fn current(&self) -> Option<&[Slot]> {
        if self.done() { None } else { Some(&self.slot[..]) }
    }

    fn next(&mut self) -> Option<&[Slot]> {
        if !self.done() {
            self.step += 1;
        }
        self.load()
    }

    fn done(&self) -> bool {
        self.step >= self.order.len()
    }
}

//! Mirrored pairs about the middle index
//!
//! Odd lengths open (or, reversed, close) with the center point paired with a
//! `None` filler.

use super::{PatternIterator, Slot};

#[derive(Debug, Clone)]
pub struct BilinearIterator {
    len: usize,
    /// Start at the outermost pair and move inward
    reversed: bool,
    step: usize,
    pair: [Slot; 2],
}

impl BilinearIterator {
    pub fn new(len: usize, reversed: bool) -> Self {
        let mut it = Self {
            len,
            reversed,
            step: 0,
            pair: [None, None],
        };
        it.load();
        it
    }

    fn steps(&self) -> usize {
        self.len.div_ceil(2)
    }

    /// Pair `ring` steps out from the middle
    fn pair_at(&self, ring: usize) -> [Slot; 2] {
        let half = self.len / 2;
        if self.len % 2 == 1 {
            if ring == 0 {
                [Some(half), None]
            } else {
                [Some(half - ring), Some(half + ring)]
            }
        } else {
            [Some(half - 1 - ring), Some(half + ring)]
        }
    }

    fn load(&mut self) -> Option<&[Slot]> {
        if self.done() {
            return None;
        }
        let ring = if self.reversed {
            self.steps() - 1 - self.step
        } else {
            self.step
        };
        self.pair = self.pair_at(ring);
        Some(&self.pair[..])
    }
}

impl PatternIterator for BilinearIterator {
    fn first(&mut self) -> Option<&[Slot]> {
        self.step = 0;
        self.load()
    }

    fn current(&self) -> Option<&[Slot]> {
        if self.done() { None } else { Some(&self.pair[..]) }
    }

    fn next(&mut self) -> Option<&[Slot]> {
        if !self.done() {
            self.step += 1;
        }
        self.load()
    }

    fn done(&self) -> bool {
        self.step >= self.steps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iter::collect_steps;

    #[test]
    fn test_odd_center_out() {
        let steps = collect_steps(&mut BilinearIterator::new(5, false));
        assert_eq!(
            steps,
            vec![
                vec![Some(2), None],
                vec![Some(1), Some(3)],
                vec![Some(0), Some(4)],
            ]
        );
    }

    #[test]
    fn test_even_center_out() {
        let steps = collect_steps(&mut BilinearIterator::new(4, false));
        assert_eq!(steps, vec![vec![Some(1), Some(2)], vec![Some(0), Some(3)]]);
    }

    #[test]
    fn test_reversed_outside_in() {
        let steps = collect_steps(&mut BilinearIterator::new(5, true));
        assert_eq!(
            steps,
            vec![
                vec![Some(0), Some(4)],
                vec![Some(1), Some(3)],
                vec![Some(2), None],
            ]
        );

        let steps = collect_steps(&mut BilinearIterator::new(6, true));
        assert_eq!(
            steps,
            vec![
                vec![Some(0), Some(5)],
                vec![Some(1), Some(4)],
                vec![Some(2), Some(3)],
            ]
        );
    }

    #[test]
    fn test_single_point_is_center() {
        let mut it = BilinearIterator::new(1, true);
        assert_eq!(it.first(), Some(&[Some(0), None][..]));
        assert_eq!(it.next(), None);
        assert!(it.done());
    }

    #[test]
    fn test_empty_is_done() {
        let mut it = BilinearIterator::new(0, false);
        assert!(it.done());
        assert_eq!(it.first(), None);
    }
}

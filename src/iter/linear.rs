//! One point per step, in index order

use super::{PatternIterator, Slot};

/// Direction of a linear walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearOrder {
    Forward,
    Reverse,
    /// `0..n` then back down to 0, the last index visited once
    PingPong,
}

#[derive(Debug, Clone)]
pub struct LinearIterator {
    len: usize,
    order: LinearOrder,
    step: usize,
    slot: [Slot; 1],
}

impl LinearIterator {
    pub fn new(len: usize, order: LinearOrder) -> Self {
        let mut it = Self {
            len,
            order,
            step: 0,
            slot: [None],
        };
        it.load();
        it
    }

    fn steps(&self) -> usize {
        match self.order {
            LinearOrder::Forward | LinearOrder::Reverse => self.len,
            LinearOrder::PingPong => (2 * self.len).saturating_sub(1),
        }
    }

    fn index_at(&self, step: usize) -> usize {
        match self.order {
            LinearOrder::Forward => step,
            LinearOrder::Reverse => self.len - 1 - step,
            LinearOrder::PingPong => {
                if step < self.len {
                    step
                } else {
                    2 * (self.len - 1) - step
                }
            }
        }
    }

    fn load(&mut self) -> Option<&[Slot]> {
        if self.done() {
            return None;
        }
        self.slot = [Some(self.index_at(self.step))];
        Some(&self.slot[..])
    }
}

impl PatternIterator for LinearIterator {
    fn first(&mut self) -> Option<&[Slot]> {
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
        self.step >= self.steps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iter::collect_steps;

    fn order(it: &mut LinearIterator) -> Vec<usize> {
        collect_steps(it).into_iter().flatten().flatten().collect()
    }

    #[test]
    fn test_forward_and_reverse() {
        assert_eq!(order(&mut LinearIterator::new(4, LinearOrder::Forward)), [0, 1, 2, 3]);
        assert_eq!(order(&mut LinearIterator::new(4, LinearOrder::Reverse)), [3, 2, 1, 0]);
    }

    #[test]
    fn test_done_after_third_next() {
        let mut it = LinearIterator::new(3, LinearOrder::Forward);
        assert_eq!(it.first(), Some(&[Some(0)][..]));
        assert_eq!(it.next(), Some(&[Some(1)][..]));
        assert!(!it.done());
        assert_eq!(it.next(), Some(&[Some(2)][..]));
        assert!(!it.done());
        assert_eq!(it.current(), Some(&[Some(2)][..]));
        assert_eq!(it.next(), None);
        assert!(it.done());
        assert_eq!(it.current(), None);
        // Stays past the end
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_current_does_not_advance() {
        let mut it = LinearIterator::new(2, LinearOrder::Reverse);
        it.first();
        assert_eq!(it.current(), Some(&[Some(1)][..]));
        assert_eq!(it.current(), Some(&[Some(1)][..]));
    }

    #[test]
    fn test_ping_pong() {
        assert_eq!(
            order(&mut LinearIterator::new(4, LinearOrder::PingPong)),
            [0, 1, 2, 3, 2, 1, 0]
        );
        assert_eq!(order(&mut LinearIterator::new(1, LinearOrder::PingPong)), [0]);
        assert!(LinearIterator::new(0, LinearOrder::PingPong).done());
    }

    #[test]
    fn test_single_point() {
        let mut it = LinearIterator::new(1, LinearOrder::Reverse);
        assert_eq!(it.first(), Some(&[Some(0)][..]));
        assert_eq!(it.next(), None);
        assert!(it.done());
    }
}

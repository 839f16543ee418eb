//! Odd-indexed points as one volley, then even-indexed points

use super::{PatternIterator, Slot};

#[derive(Debug, Clone)]
pub struct AlternatingIterator {
    /// Non-empty partitions in firing order
    groups: Vec<Vec<Slot>>,
    step: usize,
}

impl AlternatingIterator {
    pub fn new(len: usize, reversed: bool) -> Self {
        let odd: Vec<Slot> = (1..len).step_by(2).map(Some).collect();
        let even: Vec<Slot> = (0..len).step_by(2).map(Some).collect();
        let ordered = if reversed { [even, odd] } else { [odd, even] };
        Self {
            groups: ordered.into_iter().filter(|g| !g.is_empty()).collect(),
            step: 0,
        }
    }
}

impl PatternIterator for AlternatingIterator {
    fn first(&mut self) -> Option<&[Slot]> {
        self.step = 0;
        self.current()
    }

    fn current(&self) -> Option<&[Slot]> {
        self.groups.get(self.step).map(Vec::as_slice)
    }

    fn next(&mut self) -> Option<&[Slot]> {
        if !self.done() {
            self.step += 1;
        }
        self.current()
    }

    fn done(&self) -> bool {
        self.step >= self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_then_even() {
        let mut it = AlternatingIterator::new(5, false);
        assert_eq!(it.first(), Some(&[Some(1), Some(3)][..]));
        assert_eq!(it.next(), Some(&[Some(0), Some(2), Some(4)][..]));
        assert_eq!(it.next(), None);
        assert!(it.done());
    }

    #[test]
    fn test_reversed_even_then_odd() {
        let mut it = AlternatingIterator::new(4, true);
        assert_eq!(it.first(), Some(&[Some(0), Some(2)][..]));
        assert_eq!(it.next(), Some(&[Some(1), Some(3)][..]));
        assert!(it.next().is_none());
    }

    #[test]
    fn test_single_point_skips_empty_half() {
        let mut it = AlternatingIterator::new(1, false);
        assert_eq!(it.first(), Some(&[Some(0)][..]));
        assert!(it.next().is_none());
        assert!(AlternatingIterator::new(0, false).done());
    }
}

//! Firing-order traversals
//!
//! An iterator walks the indices of one build of a [`PointSet`]. It never holds
//! point data: the sequencer resolves each index against the live set when the
//! shot fires, so positions are current and a rebuilt set is detected through
//! its generation instead of being read stale.

pub mod alternating;
pub mod bilinear;
pub mod linear;
pub mod shuffled;

pub use alternating::AlternatingIterator;
pub use bilinear::BilinearIterator;
pub use linear::{LinearIterator, LinearOrder};
pub use shuffled::ShuffledIterator;

use serde::{Deserialize, Serialize};

use crate::shape::PointSet;

/// One position of a step: a point index, or `None` for a filler
pub type Slot = Option<usize>;

/// Identity of the build an iterator was created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub len: usize,
    pub generation: u64,
}

impl Snapshot {
    pub fn of(points: &PointSet) -> Self {
        Self {
            len: points.len(),
            generation: points.generation(),
        }
    }
}

/// Step-wise traversal contract
///
/// A fresh iterator is positioned on its first step.
pub trait PatternIterator {
    /// Reset to the starting step and return it (`None` when empty)
    fn first(&mut self) -> Option<&[Slot]>;
    /// Slots of the step the cursor is on (`None` once past the end)
    fn current(&self) -> Option<&[Slot]>;
    /// Advance one step and return it (`None` once past the end)
    fn next(&mut self) -> Option<&[Slot]>;
    /// Cursor is outside the traversal
    fn done(&self) -> bool;
}

/// Traversal strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IteratorKind {
    Linear { reversed: bool },
    /// Forward then back, the far end visited once
    PingPong,
    /// Pairs mirrored about the middle; `reversed` walks outside-in
    Bilinear { reversed: bool },
    /// Odd indices then even indices; `reversed` swaps the halves
    Alternating { reversed: bool },
    /// Seeded random order, reshuffled on every `first()`
    Shuffled { seed: u64 },
}

impl Default for IteratorKind {
    fn default() -> Self {
        IteratorKind::Linear { reversed: false }
    }
}

#[derive(Debug, Clone)]
enum Traversal {
    Linear(LinearIterator),
    Bilinear(BilinearIterator),
    Alternating(AlternatingIterator),
    Shuffled(ShuffledIterator),
}

/// Any traversal, tagged with the build it walks
#[derive(Debug, Clone)]
pub struct FiringIterator {
    snapshot: Snapshot,
    traversal: Traversal,
}

impl FiringIterator {
    pub fn new(kind: IteratorKind, snapshot: Snapshot) -> Self {
        let len = snapshot.len;
        let traversal = match kind {
            IteratorKind::Linear { reversed: false } => {
                Traversal::Linear(LinearIterator::new(len, LinearOrder::Forward))
            }
            IteratorKind::Linear { reversed: true } => {
                Traversal::Linear(LinearIterator::new(len, LinearOrder::Reverse))
            }
            IteratorKind::PingPong => Traversal::Linear(LinearIterator::new(len, LinearOrder::PingPong)),
            IteratorKind::Bilinear { reversed } => {
                Traversal::Bilinear(BilinearIterator::new(len, reversed))
            }
            IteratorKind::Alternating { reversed } => {
                Traversal::Alternating(AlternatingIterator::new(len, reversed))
            }
            IteratorKind::Shuffled { seed } => Traversal::Shuffled(ShuffledIterator::new(len, seed)),
        };
        Self { snapshot, traversal }
    }

    /// Iterator over the current build of `points`
    pub fn over(points: &PointSet, kind: IteratorKind) -> Self {
        Self::new(kind, Snapshot::of(points))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    /// `points` has been rebuilt since this iterator was created
    pub fn is_stale(&self, points: &PointSet) -> bool {
        self.snapshot != Snapshot::of(points)
    }

    fn inner(&self) -> &dyn PatternIterator {
        match &self.traversal {
            Traversal::Linear(it) => it,
            Traversal::Bilinear(it) => it,
            Traversal::Alternating(it) => it,
            Traversal::Shuffled(it) => it,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PatternIterator {
        match &mut self.traversal {
            Traversal::Linear(it) => it,
            Traversal::Bilinear(it) => it,
            Traversal::Alternating(it) => it,
            Traversal::Shuffled(it) => it,
        }
    }
}

impl PatternIterator for FiringIterator {
    fn first(&mut self) -> Option<&[Slot]> {
        self.inner_mut().first()
    }

    fn current(&self) -> Option<&[Slot]> {
        self.inner().current()
    }

    fn next(&mut self) -> Option<&[Slot]> {
        self.inner_mut().next()
    }

    fn done(&self) -> bool {
        self.inner().done()
    }
}

/// Drain every remaining step from `first()` (test helper)
#[cfg(test)]
pub(crate) fn collect_steps(it: &mut dyn PatternIterator) -> Vec<Vec<Slot>> {
    let mut steps = Vec::new();
    let mut step = it.first().map(<[Slot]>::to_vec);
    while let Some(slots) = step {
        steps.push(slots);
        step = it.next().map(<[Slot]>::to_vec);
    }
    steps
}

//! Shape points and the point set a resolver owns

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One vertex of a generated pattern
///
/// `local`/`normal` are fixed at build time in pattern space; `world` and
/// `normal_world` are recomputed from them on every update. A zero
/// `normal_world` marks a filler slot that never fires.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapePoint {
    pub local: Vec2,
    pub world: Vec2,
    pub normal: Vec2,
    pub normal_world: Vec2,
}

impl ShapePoint {
    /// Unrotated point at `origin + local`
    pub fn new(origin: Vec2, local: Vec2, normal: Vec2) -> Self {
        Self {
            local,
            world: origin + local,
            normal,
            normal_world: normal,
        }
    }

    /// Whether a bullet may be fired from this point
    #[inline]
    pub fn is_live(&self) -> bool {
        self.normal_world != Vec2::ZERO
    }
}

/// Ordered points of one build
///
/// `generation` changes on every structural rebuild, so anything that
/// remembered indices into an earlier build can tell they are stale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointSet {
    points: Vec<ShapePoint>,
    generation: u64,
}

impl PointSet {
    pub fn new(points: Vec<ShapePoint>) -> Self {
        Self {
            points,
            generation: 0,
        }
    }

    /// Swap in a freshly built array
    pub fn replace(&mut self, points: Vec<ShapePoint>) {
        self.points = points;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ShapePoint> {
        self.points.get(index)
    }

    pub fn as_slice(&self) -> &[ShapePoint] {
        &self.points
    }

    /// Mutable access to point contents (the length cannot change)
    pub fn as_mut_slice(&mut self) -> &mut [ShapePoint] {
        &mut self.points
    }
}

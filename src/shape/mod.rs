//! Point geometry
//!
//! - `geometry`: pure builders from a [`ShapePattern`](crate::ShapePattern) to points
//! - `rotation`: per-frame rotation of a built set
//! - `resolver`: owns a set, rebuilds it on change and keeps it rotating

pub mod geometry;
pub mod point;
pub mod resolver;
pub mod rotation;

pub use point::{PointSet, ShapePoint};
pub use resolver::ShapeResolver;

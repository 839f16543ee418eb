//! Point layouts for each geometry kind
//!
//! Points sit on one or two radii around the origin. For point `i` of `n`:
//!
//! ```text
//! angle = slice * i + offset - center
//! slice = spread / n          (open spread, first and last never overlap)
//!       = spread / (n - 1)    (inclusive spread, both ends populated)
//! center = spread / 2         (when centered on the forward axis)
//! ```

use glam::Vec2;

use super::point::ShapePoint;
use crate::direction_from_degrees;
use crate::pattern::{Geometry, ShapePattern};

/// Shorter than this a point has no usable outward direction
const DEGENERATE_LENGTH: f32 = 1.0e-5;

/// Angular placement of points around the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub degrees: f32,
    pub offset_degrees: f32,
    /// Cover both ends of the spread
    pub inclusive: bool,
    /// Split the spread across the forward axis
    pub centered: bool,
}

impl Spread {
    /// Full circle with no duplicated seam point
    pub fn full_circle(offset_degrees: f32) -> Self {
        Self {
            degrees: 360.0,
            offset_degrees,
            inclusive: false,
            centered: true,
        }
    }

    /// Centered fan that includes both edges
    pub fn fan(degrees: f32, offset_degrees: f32) -> Self {
        Self {
            degrees,
            offset_degrees,
            inclusive: true,
            centered: true,
        }
    }

    /// Angle between neighbouring points
    pub fn slice(&self, count: usize) -> f32 {
        let divisions = if self.inclusive {
            count.saturating_sub(1)
        } else {
            count
        };
        if divisions == 0 {
            0.0
        } else {
            self.degrees / divisions as f32
        }
    }

    /// Angle of point `index` of `count` (degrees)
    pub fn angle(&self, index: usize, count: usize) -> f32 {
        let center = if self.centered { self.degrees / 2.0 } else { 0.0 };
        self.slice(count) * index as f32 + self.offset_degrees - center
    }
}

/// `count` points on the spread; `radius` picks the distance per index
pub fn points_on_radius(
    origin: Vec2,
    count: usize,
    spread: Spread,
    radius: impl Fn(usize) -> f32,
) -> Vec<ShapePoint> {
    (0..count)
        .map(|i| {
            let direction = direction_from_degrees(spread.angle(i, count));
            ShapePoint::new(origin, direction * radius(i), direction)
        })
        .collect()
}

/// Insert `subdivisions` evenly spaced points on every edge of a closed
/// polygon (last anchor wraps to the first)
///
/// Inserted normals point away from the origin; a point landing on the origin
/// gets a zero normal and becomes a filler slot.
pub fn subdivide_edges(origin: Vec2, anchors: &[ShapePoint], subdivisions: usize) -> Vec<ShapePoint> {
    let mut points = Vec::with_capacity(anchors.len() * (subdivisions + 1));
    for (i, anchor) in anchors.iter().enumerate() {
        points.push(*anchor);
        let next = anchors[(i + 1) % anchors.len()];
        let edge = next.local - anchor.local;
        for j in 1..=subdivisions {
            let t = j as f32 / (subdivisions + 1) as f32;
            let local = anchor.local + edge * t;
            let normal = if local.length() > DEGENERATE_LENGTH {
                local.normalize()
            } else {
                Vec2::ZERO
            };
            points.push(ShapePoint::new(origin, local, normal));
        }
    }
    points
}

/// Evenly spaced points over a full circle
pub fn circle(origin: Vec2, count: usize, radius: f32, forward_degrees: f32) -> Vec<ShapePoint> {
    points_on_radius(origin, count, Spread::full_circle(forward_degrees), |_| radius)
}

/// Points fanned across `spread_degrees`, both edges included
pub fn arc(
    origin: Vec2,
    count: usize,
    radius: f32,
    spread_degrees: f32,
    forward_degrees: f32,
) -> Vec<ShapePoint> {
    points_on_radius(origin, count, Spread::fan(spread_degrees, forward_degrees), |_| radius)
}

/// Two anchors at the edges of the spread joined by subdivided edges
pub fn line(
    origin: Vec2,
    radius: f32,
    spread_degrees: f32,
    forward_degrees: f32,
    subdivisions: usize,
) -> Vec<ShapePoint> {
    let anchors = arc(origin, 2, radius, spread_degrees, forward_degrees);
    subdivide_edges(origin, &anchors, subdivisions)
}

/// Regular polygon with optional points along its edges
pub fn ngon(
    origin: Vec2,
    count: usize,
    radius: f32,
    forward_degrees: f32,
    subdivisions: usize,
) -> Vec<ShapePoint> {
    let anchors = circle(origin, count, radius, forward_degrees);
    subdivide_edges(origin, &anchors, subdivisions)
}

/// Star/gear: even vertices on `max_radius`, odd vertices on `min_radius`
pub fn ngon_complex(
    origin: Vec2,
    count: usize,
    max_radius: f32,
    min_radius: f32,
    forward_degrees: f32,
    subdivisions: usize,
) -> Vec<ShapePoint> {
    let anchors = points_on_radius(origin, count, Spread::full_circle(forward_degrees), |i| {
        if i % 2 == 0 { max_radius } else { min_radius }
    });
    subdivide_edges(origin, &anchors, subdivisions)
}

/// Build the points for `pattern` around `origin`
///
/// Minimums are applied on a copy (see [`ShapePattern::coerced`]).
pub fn build(origin: Vec2, pattern: &ShapePattern) -> Vec<ShapePoint> {
    let pattern = pattern.coerced();
    let count = pattern.point_count as usize;
    let subdivisions = pattern.subdivisions_per_edge as usize;
    let forward = pattern.forward_rotation_degrees;

    match pattern.geometry {
        Geometry::Circle => circle(origin, count, pattern.max_radius, forward),
        Geometry::Arc => arc(origin, count, pattern.max_radius, pattern.spread_degrees, forward),
        Geometry::Line => line(
            origin,
            pattern.max_radius,
            pattern.spread_degrees,
            forward,
            subdivisions,
        ),
        Geometry::NGon => ngon(origin, count, pattern.max_radius, forward, subdivisions),
        Geometry::NGonComplex => ngon_complex(
            origin,
            count,
            pattern.max_radius,
            pattern.min_radius,
            forward,
            subdivisions,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotate_degrees;
    use proptest::prelude::*;

    fn pattern(geometry: Geometry, count: u32) -> ShapePattern {
        ShapePattern {
            geometry,
            point_count: count,
            ..Default::default()
        }
    }

    #[test]
    fn test_spread_single_point_inclusive() {
        let spread = Spread::fan(90.0, 0.0);
        assert_eq!(spread.slice(1), 0.0);
        assert_eq!(spread.angle(0, 1), -45.0);
        assert_eq!(Spread::full_circle(0.0).slice(0), 0.0);
    }

    #[test]
    fn test_circle_layout() {
        let points = circle(Vec2::ZERO, 4, 2.0, 0.0);
        assert_eq!(points.len(), 4);
        // Centered: first point opposite the forward axis
        assert!(points[0].local.abs_diff_eq(Vec2::new(-2.0, 0.0), 1e-4));
        assert!(points[1].local.abs_diff_eq(Vec2::new(0.0, -2.0), 1e-4));
        assert!(points[2].local.abs_diff_eq(Vec2::new(2.0, 0.0), 1e-4));
    }

    #[test]
    fn test_arc_edges_and_center() {
        let origin = Vec2::new(5.0, -1.0);
        let points = arc(origin, 3, 1.0, 90.0, 90.0);
        assert!(points[0].normal.abs_diff_eq(direction_from_degrees(45.0), 1e-5));
        assert!(points[1].normal.abs_diff_eq(Vec2::Y, 1e-5));
        assert!(points[2].normal.abs_diff_eq(direction_from_degrees(135.0), 1e-5));
        assert!(points[1].world.abs_diff_eq(origin + Vec2::Y, 1e-5));
    }

    #[test]
    fn test_line_subdivisions() {
        let mut shape = pattern(Geometry::Line, 2);
        shape.spread_degrees = 90.0;
        shape.max_radius = 2.0;
        shape.subdivisions_per_edge = 3;
        let points = build(Vec2::ZERO, &shape);
        assert_eq!(points.len(), 8);

        let a = points[0].local;
        let b = points[4].local;
        for j in 1..=3 {
            let expected = a + (b - a) * (j as f32 / 4.0);
            assert!(points[j].local.abs_diff_eq(expected, 1e-5));
        }
        // Wrap edge runs back from the second anchor to the first
        assert!(points[5].local.abs_diff_eq(b + (a - b) * 0.25, 1e-5));
    }

    #[test]
    fn test_line_midpoint_through_origin_is_filler() {
        let mut shape = pattern(Geometry::Line, 2);
        shape.spread_degrees = 180.0;
        shape.subdivisions_per_edge = 1;
        let points = build(Vec2::new(1.0, 1.0), &shape);
        assert_eq!(points.len(), 4);
        assert!(points[0].is_live());
        assert!(!points[1].is_live());
        assert!(points[1].local.length() < 1e-5);
    }

    #[test]
    fn test_ngon_forces_three_points() {
        let points = build(Vec2::ZERO, &pattern(Geometry::NGon, 1));
        assert_eq!(points.len(), 3);
        for p in &points {
            assert!((p.local.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ngon_edge_points_lie_on_edges() {
        let mut shape = pattern(Geometry::NGon, 4);
        shape.subdivisions_per_edge = 1;
        let points = build(Vec2::ZERO, &shape);
        assert_eq!(points.len(), 8);
        // Square of circumradius 1: edge midpoints are at distance cos(45°)
        let mid = std::f32::consts::FRAC_1_SQRT_2;
        for (i, p) in points.iter().enumerate() {
            let expected = if i % 2 == 0 { 1.0 } else { mid };
            assert!((p.local.length() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ngon_complex_forced_even() {
        let mut shape = pattern(Geometry::NGonComplex, 7);
        shape.max_radius = 3.0;
        shape.min_radius = 1.0;
        let points = build(Vec2::ZERO, &shape);
        assert_eq!(points.len(), 8);

        let small = build(Vec2::ZERO, &pattern(Geometry::NGonComplex, 0));
        assert_eq!(small.len(), 6);
    }

    proptest! {
        #[test]
        fn prop_circle_uniform_unit_normals(count in 1u32..=20, radius in 0.1f32..10.0, forward in -360.0f32..360.0) {
            let mut shape = pattern(Geometry::Circle, count);
            shape.max_radius = radius;
            shape.forward_rotation_degrees = forward;
            let points = build(Vec2::new(1.5, -2.5), &shape);
            prop_assert_eq!(points.len(), count as usize);

            let slice = 360.0 / count as f32;
            for pair in points.windows(2) {
                prop_assert!((pair[0].normal.length() - 1.0).abs() < 1e-4);
                prop_assert!(rotate_degrees(pair[0].normal, slice).abs_diff_eq(pair[1].normal, 1e-3));
            }
            for p in &points {
                prop_assert!((p.local.length() - radius).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_arc_uniform_inclusive(count in 2u32..=10, spread in 1.0f32..180.0, forward in -180.0f32..180.0) {
            let mut shape = pattern(Geometry::Arc, count);
            shape.spread_degrees = spread;
            shape.forward_rotation_degrees = forward;
            let points = build(Vec2::ZERO, &shape);
            prop_assert_eq!(points.len(), count as usize);

            let slice = spread / (count - 1) as f32;
            for pair in points.windows(2) {
                prop_assert!((pair[1].normal.length() - 1.0).abs() < 1e-4);
                prop_assert!(rotate_degrees(pair[0].normal, slice).abs_diff_eq(pair[1].normal, 1e-3));
            }
            // Ends sit at the edges of the spread
            let first = direction_from_degrees(forward - spread / 2.0);
            let last = direction_from_degrees(forward + spread / 2.0);
            prop_assert!(points[0].normal.abs_diff_eq(first, 1e-3));
            prop_assert!(points[count as usize - 1].normal.abs_diff_eq(last, 1e-3));
        }

        #[test]
        fn prop_ngon_complex_alternates_radii(count in 0u32..=20, max in 1.0f32..10.0, min in 0.1f32..0.9) {
            let mut shape = pattern(Geometry::NGonComplex, count);
            shape.max_radius = max;
            shape.min_radius = min;
            let points = build(Vec2::ZERO, &shape);

            prop_assert!(points.len() >= 6);
            prop_assert_eq!(points.len() % 2, 0);
            for (i, p) in points.iter().enumerate() {
                let expected = if i % 2 == 0 { max } else { min };
                prop_assert!((p.local.length() - expected).abs() < 1e-3);
            }
        }
    }
}

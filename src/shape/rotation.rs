//! Per-frame rotation of a built point set
//!
//! World values are always derived from the build-time `local`/`normal`, never
//! from the previous frame, so float error cannot accumulate.

use glam::Vec2;

use super::point::ShapePoint;
use crate::pattern::ShapePattern;
use crate::wrap_degrees;

/// Rotate every point by `degrees` about `origin`
pub fn rotate_points(points: &mut [ShapePoint], origin: Vec2, degrees: f32) {
    let rotation = Vec2::from_angle(degrees.to_radians());
    for point in points {
        point.world = origin + rotation.rotate(point.local);
        point.normal_world = rotation.rotate(point.normal);
    }
}

/// Apply the pattern's current rotation (direction honours `reverse_rotation`)
pub fn update(origin: Vec2, pattern: &ShapePattern, points: &mut [ShapePoint], rotation_offset: f32) {
    let sign = if pattern.reverse_rotation { -1.0 } else { 1.0 };
    rotate_points(points, origin, rotation_offset * sign);
}

/// Advance a rotation offset by `rate` degrees/s, wrapped to [0, 360)
#[inline]
pub fn advance(rotation_offset: f32, rate: f32, dt: f32) -> f32 {
    wrap_degrees(rotation_offset + rate * dt)
}

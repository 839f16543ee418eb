//! Launch direction per shot

use glam::Vec2;

use crate::pattern::{BulletPattern, Trajectory};
use crate::shape::ShapePoint;
use crate::{rotate_degrees, wrap_degrees};

/// Aiming state carried between frames
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aim {
    /// World position `TargetPlayer` shots head for
    pub target: Option<Vec2>,
    /// Oscillation phase (degrees)
    pub phase_degrees: f32,
}

impl Aim {
    /// Advance the oscillation sweep
    pub fn advance(&mut self, pattern: &BulletPattern, dt: f32) {
        if pattern.trajectory == Trajectory::OscillateShapeNormals {
            self.phase_degrees =
                wrap_degrees(self.phase_degrees + pattern.oscillation_degrees_per_second * dt);
        }
    }

    /// Current deflection from the normal under oscillation (degrees)
    pub fn deflection(&self, pattern: &BulletPattern) -> f32 {
        pattern.oscillation_angle * self.phase_degrees.to_radians().sin()
    }

    /// Direction a bullet leaves `point` in
    pub fn direction(&self, pattern: &BulletPattern, point: &ShapePoint) -> Vec2 {
        let normal = point.normal_world;
        match pattern.trajectory {
            Trajectory::ShapeNormals => normal,
            Trajectory::OscillateShapeNormals => rotate_degrees(normal, self.deflection(pattern)),
            Trajectory::TargetPlayer => self
                .target
                .map(|target| (target - point.world).normalize_or_zero())
                .filter(|direction| *direction != Vec2::ZERO)
                .unwrap_or(normal),
            Trajectory::Horizontal => {
                if normal.x < 0.0 {
                    Vec2::NEG_X
                } else {
                    Vec2::X
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(trajectory: Trajectory) -> BulletPattern {
        BulletPattern {
            trajectory,
            ..Default::default()
        }
    }

    fn point(world: Vec2, normal: Vec2) -> ShapePoint {
        ShapePoint::new(Vec2::ZERO, world, normal)
    }

    #[test]
    fn test_shape_normals() {
        let aim = Aim::default();
        let p = point(Vec2::new(0.0, 2.0), Vec2::Y);
        assert_eq!(aim.direction(&pattern(Trajectory::ShapeNormals), &p), Vec2::Y);
    }

    #[test]
    fn test_target_player() {
        let mut aim = Aim::default();
        let bullet = pattern(Trajectory::TargetPlayer);
        let p = point(Vec2::new(1.0, 0.0), Vec2::X);

        // No target: fall back to the normal
        assert_eq!(aim.direction(&bullet, &p), Vec2::X);

        aim.target = Some(Vec2::new(1.0, 5.0));
        assert!(aim.direction(&bullet, &p).abs_diff_eq(Vec2::Y, 1e-6));

        // Target on the point itself
        aim.target = Some(Vec2::new(1.0, 0.0));
        assert_eq!(aim.direction(&bullet, &p), Vec2::X);
    }

    #[test]
    fn test_horizontal() {
        let aim = Aim::default();
        let bullet = pattern(Trajectory::Horizontal);
        let left = point(Vec2::ZERO, Vec2::new(-0.6, 0.8));
        let right = point(Vec2::ZERO, Vec2::new(0.6, -0.8));
        assert_eq!(aim.direction(&bullet, &left), Vec2::NEG_X);
        assert_eq!(aim.direction(&bullet, &right), Vec2::X);
    }

    #[test]
    fn test_oscillation_sweeps() {
        let mut aim = Aim::default();
        let bullet = BulletPattern {
            trajectory: Trajectory::OscillateShapeNormals,
            oscillation_angle: 30.0,
            oscillation_degrees_per_second: 90.0,
            ..Default::default()
        };
        let p = point(Vec2::X, Vec2::X);
        assert!(aim.direction(&bullet, &p).abs_diff_eq(Vec2::X, 1e-6));

        // Quarter phase: full deflection
        aim.advance(&bullet, 1.0);
        assert!((aim.deflection(&bullet) - 30.0).abs() < 1e-3);
        let expected = rotate_degrees(Vec2::X, 30.0);
        assert!(aim.direction(&bullet, &p).abs_diff_eq(expected, 1e-5));

        // Three-quarter phase: full deflection the other way
        aim.advance(&bullet, 2.0);
        assert!((aim.deflection(&bullet) + 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_phase_only_moves_when_oscillating() {
        let mut aim = Aim::default();
        aim.advance(&pattern(Trajectory::ShapeNormals), 3.0);
        assert_eq!(aim.phase_degrees, 0.0);
    }
}

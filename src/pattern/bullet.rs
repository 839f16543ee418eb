//! Bullet pattern parameters
//!
//! Timing, ordering and per-shot values for a bullet resolver.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::PatternError;
use crate::iter::IteratorKind;

/// How each shot's launch direction is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Trajectory {
    /// Straight out along the point normal
    #[default]
    ShapeNormals,
    /// Point normal swept back and forth by the oscillation parameters
    OscillateShapeNormals,
    /// Toward the resolver's target, falling back to the normal
    TargetPlayer,
    /// Along the X axis, on the side the normal faces
    Horizontal,
}

impl Trajectory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trajectory::ShapeNormals => "shape-normals",
            Trajectory::OscillateShapeNormals => "oscillate-shape-normals",
            Trajectory::TargetPlayer => "target-player",
            Trajectory::Horizontal => "horizontal",
        }
    }
}

impl FromStr for Trajectory {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "shape-normals" | "normals" => Ok(Trajectory::ShapeNormals),
            "oscillate-shape-normals" | "oscillate" => Ok(Trajectory::OscillateShapeNormals),
            "target-player" | "target" => Ok(Trajectory::TargetPlayer),
            "horizontal" => Ok(Trajectory::Horizontal),
            _ => Err(PatternError::UnknownTrajectory(s.to_string())),
        }
    }
}

/// Order in which shape points are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FiringSequence {
    /// Every point in one volley, no delay between steps
    #[default]
    Immediate,
    /// Odd-indexed points, then even-indexed points
    ImmediateAltEvenAndOdd,
    BackToFront,
    FrontToBack,
    /// Front to back, then back to front
    PingPong,
    CenterToOutside,
    OutsideToCenter,
    /// Seeded random order, reshuffled every pass
    RandomBulletSpawn,
}

impl FiringSequence {
    pub const ALL: [FiringSequence; 8] = [
        FiringSequence::Immediate,
        FiringSequence::ImmediateAltEvenAndOdd,
        FiringSequence::BackToFront,
        FiringSequence::FrontToBack,
        FiringSequence::PingPong,
        FiringSequence::CenterToOutside,
        FiringSequence::OutsideToCenter,
        FiringSequence::RandomBulletSpawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FiringSequence::Immediate => "immediate",
            FiringSequence::ImmediateAltEvenAndOdd => "immediate-alt-even-and-odd",
            FiringSequence::BackToFront => "back-to-front",
            FiringSequence::FrontToBack => "front-to-back",
            FiringSequence::PingPong => "ping-pong",
            FiringSequence::CenterToOutside => "center-to-outside",
            FiringSequence::OutsideToCenter => "outside-to-center",
            FiringSequence::RandomBulletSpawn => "random-bullet-spawn",
        }
    }

    /// Traversal that realises this sequence
    pub fn iterator_kind(&self, seed: u64) -> IteratorKind {
        match self {
            FiringSequence::Immediate | FiringSequence::FrontToBack => {
                IteratorKind::Linear { reversed: false }
            }
            FiringSequence::BackToFront => IteratorKind::Linear { reversed: true },
            FiringSequence::ImmediateAltEvenAndOdd => IteratorKind::Alternating { reversed: false },
            FiringSequence::PingPong => IteratorKind::PingPong,
            FiringSequence::CenterToOutside => IteratorKind::Bilinear { reversed: false },
            FiringSequence::OutsideToCenter => IteratorKind::Bilinear { reversed: true },
            FiringSequence::RandomBulletSpawn => IteratorKind::Shuffled { seed },
        }
    }
}

impl FromStr for FiringSequence {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('_', "-");
        FiringSequence::ALL
            .into_iter()
            .find(|sequence| sequence.as_str() == normalized)
            .ok_or_else(|| PatternError::UnknownSequence(s.to_string()))
    }
}

/// Bullet pattern parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletPattern {
    pub trajectory: Trajectory,
    pub firing_sequence: FiringSequence,
    /// Delay between steps of a pass (seconds, ignored by `Immediate`)
    pub bullet_delay: f32,

    // === Looping ===
    pub is_looping: bool,
    /// Delay between loop passes (seconds)
    pub loop_delay: f32,
    /// Cooldown after an activation before the next may start (seconds)
    pub single_fire_delay: f32,

    // === Burst ===
    /// Extra passes per activation (0 = a single pass)
    pub burst_per_shot: u32,
    /// Delay between burst passes (seconds)
    pub burst_delay: f32,

    // === Oscillation ===
    /// Peak deflection from the normal (degrees)
    pub oscillation_angle: f32,
    /// Sweep rate (degrees of phase per second)
    pub oscillation_degrees_per_second: f32,

    // === Per shot ===
    pub bullet_speed: f32,
    pub bullet_damage: i32,

    /// Base seed for `RandomBulletSpawn`
    pub seed: u64,
}

impl Default for BulletPattern {
    fn default() -> Self {
        Self {
            trajectory: Trajectory::ShapeNormals,
            firing_sequence: FiringSequence::Immediate,
            bullet_delay: 0.05,

            is_looping: false,
            loop_delay: 0.1,
            single_fire_delay: 0.2,

            burst_per_shot: 0,
            burst_delay: 0.1,

            oscillation_angle: 30.0,
            oscillation_degrees_per_second: 5.0,

            bullet_speed: 20.0,
            bullet_damage: 1,

            seed: 0,
        }
    }
}

impl BulletPattern {
    /// Passes per activation: the first plus one per extra burst
    pub fn total_passes(&self) -> u32 {
        self.burst_per_shot.saturating_add(1)
    }

    /// Wait between steps of a pass
    pub fn step_delay(&self) -> f32 {
        if self.firing_sequence == FiringSequence::Immediate {
            0.0
        } else {
            self.bullet_delay.max(0.0)
        }
    }

    /// Copy clamped to the authoring ranges
    pub fn clamped(&self) -> Self {
        let mut pattern = self.clone();
        pattern.bullet_delay = pattern.bullet_delay.clamp(MIN_DELAY, MAX_DELAY);
        pattern.loop_delay = pattern.loop_delay.clamp(MIN_DELAY, MAX_DELAY);
        pattern.single_fire_delay = pattern.single_fire_delay.clamp(MIN_DELAY, MAX_DELAY);
        pattern.burst_delay = pattern.burst_delay.clamp(MIN_DELAY, MAX_DELAY);
        pattern.burst_per_shot = pattern.burst_per_shot.min(MAX_BURST_PER_SHOT);
        pattern.oscillation_angle = pattern.oscillation_angle.clamp(MIN_OSCILLATION, MAX_OSCILLATION);
        pattern.oscillation_degrees_per_second = pattern
            .oscillation_degrees_per_second
            .clamp(MIN_OSCILLATION, MAX_OSCILLATION);
        pattern.bullet_speed = pattern.bullet_speed.clamp(MIN_BULLET_SPEED, MAX_BULLET_SPEED);
        pattern.bullet_damage = pattern.bullet_damage.clamp(MIN_BULLET_DAMAGE, MAX_BULLET_DAMAGE);
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_round_trip_names() {
        for sequence in FiringSequence::ALL {
            assert_eq!(sequence.as_str().parse::<FiringSequence>(), Ok(sequence));
        }
        assert_eq!(
            "CENTER_TO_OUTSIDE".parse::<FiringSequence>(),
            Ok(FiringSequence::CenterToOutside)
        );
        assert!(matches!(
            "spiral".parse::<FiringSequence>(),
            Err(PatternError::UnknownSequence(_))
        ));
        assert_eq!("target".parse::<Trajectory>(), Ok(Trajectory::TargetPlayer));
    }

    #[test]
    fn test_iterator_kinds() {
        assert_eq!(
            FiringSequence::BackToFront.iterator_kind(0),
            IteratorKind::Linear { reversed: true }
        );
        assert_eq!(
            FiringSequence::OutsideToCenter.iterator_kind(0),
            IteratorKind::Bilinear { reversed: true }
        );
        assert_eq!(
            FiringSequence::RandomBulletSpawn.iterator_kind(7),
            IteratorKind::Shuffled { seed: 7 }
        );
    }

    #[test]
    fn test_passes_and_delays() {
        let mut pattern = BulletPattern::default();
        assert_eq!(pattern.total_passes(), 1);
        assert_eq!(pattern.step_delay(), 0.0);

        pattern.burst_per_shot = 2;
        pattern.firing_sequence = FiringSequence::FrontToBack;
        assert_eq!(pattern.total_passes(), 3);
        assert_eq!(pattern.step_delay(), pattern.bullet_delay);
    }

    #[test]
    fn test_clamped() {
        let pattern = BulletPattern {
            bullet_delay: 0.0,
            burst_per_shot: 50,
            bullet_speed: 500.0,
            bullet_damage: 0,
            ..Default::default()
        }
        .clamped();

        assert_eq!(pattern.bullet_delay, MIN_DELAY);
        assert_eq!(pattern.burst_per_shot, MAX_BURST_PER_SHOT);
        assert_eq!(pattern.bullet_speed, MAX_BULLET_SPEED);
        assert_eq!(pattern.bullet_damage, MIN_BULLET_DAMAGE);
    }
}

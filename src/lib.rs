//! Bullet Heck - bullet-hell firing patterns
//!
//! Core modules:
//! - `pattern`: Authoring data (shape and bullet patterns) and change notification
//! - `shape`: Point geometry, per-frame rotation and the shape resolver
//! - `iter`: Firing-order traversals over a point set
//! - `fire`: Firing state machine, trajectories and the bullet resolver
//!
//! Everything here is host-agnostic: the host supplies configuration, calls
//! `tick(dt)` once per frame and receives [`fire::Shot`]s to spawn projectiles.

pub mod error;
pub mod fire;
pub mod iter;
pub mod pattern;
pub mod shape;

pub use error::{FireRefusal, PatternError};
pub use fire::{BulletResolver, FireBullets, FiringStatus, SequencerEvent, Shot};
pub use iter::{FiringIterator, IteratorKind, PatternIterator, Slot};
pub use pattern::{
    BulletPattern, FiringSequence, Geometry, Pattern, ShapePattern, SharedPattern, Trajectory,
};
pub use shape::{PointSet, ShapePoint, ShapeResolver};

use glam::Vec2;

/// Engine constants and authoring ranges
pub mod consts {
    /// Host frame step used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Slack when comparing elapsed time against a delay
    pub const WAIT_EPSILON: f32 = 1.0e-5;

    /// Radius range exposed to authors
    pub const MAX_RADIUS: f32 = 10.0;
    /// Rotation rate bound (degrees/s, either direction)
    pub const MAX_ROTATION_DEGREES_PER_SECOND: f32 = 300.0;

    /// Delay range for bullet, loop, burst and cooldown waits (seconds)
    pub const MIN_DELAY: f32 = 0.01;
    pub const MAX_DELAY: f32 = 5.0;
    /// Extra burst passes per trigger
    pub const MAX_BURST_PER_SHOT: u32 = 10;

    /// Oscillation angle and rate range (degrees, degrees/s)
    pub const MIN_OSCILLATION: f32 = 0.1;
    pub const MAX_OSCILLATION: f32 = 180.0;

    /// Bullet speed and damage ranges
    pub const MIN_BULLET_SPEED: f32 = 1.0;
    pub const MAX_BULLET_SPEED: f32 = 150.0;
    pub const MIN_BULLET_DAMAGE: i32 = 1;
    pub const MAX_BULLET_DAMAGE: i32 = 40;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector pointing at `degrees` (counter-clockwise from +X)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Rotate `v` counter-clockwise by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    direction_from_degrees(degrees).rotate(v)
}

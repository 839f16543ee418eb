//! Firing
//!
//! - `sequencer`: burst/loop/cooldown state machine driven by `tick(dt)`
//! - `trajectory`: launch direction per shot
//! - `resolver`: host-facing component tying a bullet pattern to a shape

pub mod resolver;
pub mod sequencer;
pub mod trajectory;

pub use resolver::BulletResolver;
pub use sequencer::{FireContext, FiringStatus, Sequencer, SequencerEvent};
pub use trajectory::Aim;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One bullet to spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Point the shot left from
    pub index: usize,
    pub position: Vec2,
    /// Unit launch direction
    pub direction: Vec2,
    pub speed: f32,
    pub damage: i32,
}

/// Receives shots from a bullet resolver
pub trait FireBullets {
    fn fire(&mut self, shot: Shot);
}

/// Collects shots (tests, replays, batch spawning)
impl FireBullets for Vec<Shot> {
    fn fire(&mut self, shot: Shot) {
        self.push(shot);
    }
}

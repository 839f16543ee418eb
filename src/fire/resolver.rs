//! Bullet resolver
//!
//! Host-facing component: pairs a bullet pattern with a shape resolver, runs
//! the sequencer and hands shots to a launcher. Shots are collected first and
//! dispatched once every internal borrow is released, so a launcher is free
//! to edit patterns from inside `fire`.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use super::sequencer::{FireContext, FiringStatus, Sequencer, SequencerEvent};
use super::trajectory::Aim;
use super::{FireBullets, Shot};
use crate::error::{FireRefusal, PatternError};
use crate::pattern::{BulletPattern, SharedPattern, SubscriptionId};
use crate::shape::ShapeResolver;

#[derive(Debug)]
pub struct BulletResolver {
    shape: ShapeResolver,
    pattern: Option<SharedPattern<BulletPattern>>,
    pattern_subscription: Option<SubscriptionId>,
    rebuild_subscription: Option<SubscriptionId>,
    /// Set by change handlers, consumed before the sequencer next runs
    stale: Rc<Cell<bool>>,
    sequencer: Sequencer,
    aim: Aim,
}

impl BulletResolver {
    pub fn new(shape: ShapeResolver) -> Self {
        Self {
            shape,
            pattern: None,
            pattern_subscription: None,
            rebuild_subscription: None,
            stale: Rc::new(Cell::new(false)),
            sequencer: Sequencer::new(),
            aim: Aim::default(),
        }
    }

    /// Attach a bullet pattern and follow it and the shape's rebuilds
    pub fn initialize(&mut self, pattern: SharedPattern<BulletPattern>) {
        self.shutdown();

        let stale = Rc::downgrade(&self.stale);
        self.pattern_subscription = Some(pattern.register_on_change(move || {
            if let Some(stale) = stale.upgrade() {
                stale.set(true);
            }
        }));
        let stale = Rc::downgrade(&self.stale);
        self.rebuild_subscription = Some(self.shape.register_on_rebuild(move || {
            if let Some(stale) = stale.upgrade() {
                stale.set(true);
            }
        }));

        self.pattern = Some(pattern);
        self.stale.set(false);
    }

    /// Stop firing and drop every subscription
    pub fn shutdown(&mut self) {
        self.sequencer.stop();
        if let Some(id) = self.rebuild_subscription.take() {
            self.shape.unregister_on_rebuild(id);
        }
        if let (Some(pattern), Some(id)) = (self.pattern.take(), self.pattern_subscription.take()) {
            pattern.unregister_on_change(id);
            log::debug!("Bullet resolver detached");
        }
    }

    pub fn pattern(&self) -> Option<&SharedPattern<BulletPattern>> {
        self.pattern.as_ref()
    }

    pub fn shape(&self) -> &ShapeResolver {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut ShapeResolver {
        &mut self.shape
    }

    /// Rotate the shape, then fire whatever falls due this frame
    pub fn tick(&mut self, dt: f32, launcher: &mut dyn FireBullets) {
        self.shape.tick(dt);
        let Some(pattern) = self.pattern.as_ref().map(|p| p.snapshot()) else {
            return;
        };
        self.aim.advance(&pattern, dt);

        let mut shots = Vec::new();
        {
            let points = self.shape.points();
            let ctx = FireContext {
                points: &points,
                pattern: &pattern,
                aim: &self.aim,
            };
            if self.stale.replace(false) {
                self.sequencer.sync(&ctx);
                log::debug!("Firing sequence synced with pattern changes");
            }
            self.sequencer.tick(dt, &ctx, &mut shots);
        }
        dispatch(shots, launcher);
    }

    /// Ok when `try_fire` would start an activation
    pub fn readiness(&self) -> Result<(), FireRefusal> {
        if self.pattern.is_none() {
            return Err(PatternError::MissingBulletPattern.into());
        }
        self.shape.ensure_built()?;
        self.sequencer.ready()
    }

    pub fn can_fire(&self) -> bool {
        self.readiness().is_ok()
    }

    /// Start an activation; its first volley reaches `launcher` before returning
    pub fn try_fire(&mut self, launcher: &mut dyn FireBullets) -> Result<(), FireRefusal> {
        if let Err(refusal) = self.readiness() {
            match &refusal {
                FireRefusal::Unavailable(reason) => log::warn!("Cannot fire: {reason}"),
                _ => log::debug!("Fire request refused: {refusal}"),
            }
            return Err(refusal);
        }
        // A new activation walks a fresh iterator anyway
        self.stale.set(false);
        let Some(pattern) = self.pattern.as_ref().map(|p| p.snapshot()) else {
            return Err(PatternError::MissingBulletPattern.into());
        };

        let mut shots = Vec::new();
        {
            let points = self.shape.points();
            let ctx = FireContext {
                points: &points,
                pattern: &pattern,
                aim: &self.aim,
            };
            self.sequencer.start(&ctx, &mut shots)?;
        }
        log::debug!(
            "Firing {} ({} passes, looping: {})",
            pattern.firing_sequence.as_str(),
            pattern.total_passes(),
            pattern.is_looping
        );
        dispatch(shots, launcher);
        Ok(())
    }

    /// Cancel the activation in flight, skipping the cooldown
    pub fn stop(&mut self) {
        if self.sequencer.status() != FiringStatus::Idle {
            log::debug!("Firing stopped");
        }
        self.sequencer.stop();
    }

    pub fn status(&self) -> FiringStatus {
        self.sequencer.status()
    }

    /// Firing or cooling down
    pub fn is_running(&self) -> bool {
        self.status() != FiringStatus::Idle
    }

    /// Firing under a looping pattern
    pub fn is_looping(&self) -> bool {
        self.status() == FiringStatus::Firing
            && self.pattern.as_ref().is_some_and(|p| p.get().is_looping)
    }

    pub fn point_count(&self) -> usize {
        self.shape.point_count()
    }

    /// World position and world normal of point `index`
    pub fn point_at(&self, index: usize) -> Option<(Vec2, Vec2)> {
        self.shape.point_at(index)
    }

    /// World position `TargetPlayer` shots aim at
    pub fn set_target(&mut self, target: Option<Vec2>) {
        self.aim.target = target;
    }

    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        self.sequencer.drain_events()
    }
}

impl Drop for BulletResolver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn dispatch(shots: Vec<Shot>, launcher: &mut dyn FireBullets) {
    for shot in shots {
        launcher.fire(shot);
    }
}

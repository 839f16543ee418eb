//! Firing state machine
//!
//! One activation runs `burst_per_shot + 1` passes over a fresh iterator, then
//! either waits `loop_delay` and starts another activation (looping) or cools
//! down for `single_fire_delay`. Every wait is a countdown in `wait`; time left
//! over when a wait expires carries into the next one, so delays stay exact
//! whatever the frame length.
//!
//! ```text
//! Idle --start--> Stepping <--> BurstGap
//!                    |
//!                    +--> LoopGap --> Stepping      (looping)
//!                    +--> Cooldown --> Idle
//! ```

use std::collections::VecDeque;

use crate::consts::WAIT_EPSILON;
use crate::error::FireRefusal;
use crate::fire::Shot;
use crate::fire::trajectory::Aim;
use crate::iter::{FiringIterator, IteratorKind, PatternIterator, Slot};
use crate::pattern::BulletPattern;
use crate::shape::PointSet;

/// Events kept for the host before the oldest are dropped
const MAX_PENDING_EVENTS: usize = 1024;

/// Externally visible state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FiringStatus {
    #[default]
    Idle,
    Firing,
    Cooldown,
}

/// Progress notifications for UI/audio hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// A bullet left point `index`
    FiringShot { index: usize },
    /// A pass over the points started
    IterationBegin,
    IterationEnd,
    /// An activation (trigger or loop pass) started
    BurstBegin,
    BurstEnd,
    /// A looping activation completed and the next is scheduled
    LoopFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Stage {
    #[default]
    Idle,
    /// Waiting to fire `pending`
    Stepping,
    BurstGap,
    LoopGap,
    Cooldown,
}

/// Everything a firing step reads
#[derive(Debug, Clone, Copy)]
pub struct FireContext<'a> {
    pub points: &'a PointSet,
    pub pattern: &'a BulletPattern,
    pub aim: &'a Aim,
}

#[derive(Debug, Default)]
pub struct Sequencer {
    stage: Stage,
    /// Seconds until the current stage acts (may go slightly negative)
    wait: f32,
    iterator: Option<FiringIterator>,
    /// Traversal the current iterator was built for
    kind: Option<IteratorKind>,
    /// Next step of the current pass, fired when `wait` runs out
    pending: Option<Vec<Slot>>,
    passes_done: u32,
    /// Activations started, offsets the shuffle seed
    activations: u64,
    events: VecDeque<SequencerEvent>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FiringStatus {
        match self.stage {
            Stage::Idle => FiringStatus::Idle,
            Stage::Stepping | Stage::BurstGap | Stage::LoopGap => FiringStatus::Firing,
            Stage::Cooldown => FiringStatus::Cooldown,
        }
    }

    /// Ok when an activation could start now
    pub fn ready(&self) -> Result<(), FireRefusal> {
        match self.status() {
            FiringStatus::Idle => Ok(()),
            FiringStatus::Firing => Err(FireRefusal::Firing),
            FiringStatus::Cooldown => Err(FireRefusal::CoolingDown),
        }
    }

    /// Begin an activation; the first volley is pushed to `shots` immediately
    pub fn start(&mut self, ctx: &FireContext, shots: &mut Vec<Shot>) -> Result<(), FireRefusal> {
        self.ready()?;
        self.wait = 0.0;
        self.begin_activation(ctx, shots);
        self.run(ctx, shots, false);
        Ok(())
    }

    /// Advance time, pushing every shot that falls due
    pub fn tick(&mut self, dt: f32, ctx: &FireContext, shots: &mut Vec<Shot>) {
        if self.stage == Stage::Idle {
            return;
        }
        let resume_loop = self.stage == Stage::LoopGap;
        self.wait -= dt;
        self.run(ctx, shots, resume_loop);
    }

    /// Cancel everything and go straight to Idle (no cooldown)
    pub fn stop(&mut self) {
        self.stage = Stage::Idle;
        self.wait = 0.0;
        self.invalidate();
        self.passes_done = 0;
    }

    /// The point set or pattern changed
    ///
    /// The pass in flight keeps going unless the points were rebuilt or the
    /// edit picks a different traversal; then it is abandoned and the next
    /// pass starts from a fresh iterator.
    pub fn sync(&mut self, ctx: &FireContext) {
        let Some(iterator) = self.iterator.as_ref() else {
            return;
        };
        if iterator.is_stale(ctx.points) || self.kind != Some(self.kind_for(ctx)) {
            self.invalidate();
        }
    }

    /// Abandon the pass in flight
    pub fn invalidate(&mut self) {
        self.iterator = None;
        self.kind = None;
        self.pending = None;
    }

    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        self.events.drain(..).collect()
    }

    fn emit(&mut self, event: SequencerEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Process every wait that has run out
    ///
    /// At most one loop restart per call, and only for a gap entered on an
    /// earlier call.
    fn run(&mut self, ctx: &FireContext, shots: &mut Vec<Shot>, mut may_restart: bool) {
        while self.wait <= WAIT_EPSILON {
            match self.stage {
                Stage::Idle => {
                    self.wait = 0.0;
                    return;
                }
                Stage::Stepping => {
                    if self
                        .iterator
                        .as_ref()
                        .is_some_and(|iterator| iterator.is_stale(ctx.points))
                    {
                        self.invalidate();
                    }
                    if let Some(slots) = self.pending.take() {
                        self.fire_volley(ctx, &slots, shots);
                    }
                    self.queue_next(ctx);
                }
                Stage::BurstGap => self.start_pass(ctx, shots),
                Stage::LoopGap => {
                    if !may_restart {
                        // The gap ran out this call; restart at the next tick
                        // without carrying the rest of this frame.
                        self.wait = 0.0;
                        return;
                    }
                    may_restart = false;
                    if ctx.pattern.is_looping {
                        self.begin_activation(ctx, shots);
                    } else {
                        self.enter_cooldown(ctx);
                    }
                }
                Stage::Cooldown => {
                    log::debug!("Cooldown finished");
                    self.stage = Stage::Idle;
                    self.wait = 0.0;
                    return;
                }
            }
        }
    }

    fn begin_activation(&mut self, ctx: &FireContext, shots: &mut Vec<Shot>) {
        self.emit(SequencerEvent::BurstBegin);
        self.passes_done = 0;
        self.activations = self.activations.wrapping_add(1);
        self.invalidate();
        self.start_pass(ctx, shots);
    }

    fn kind_for(&self, ctx: &FireContext) -> IteratorKind {
        let seed = ctx.pattern.seed.wrapping_add(self.activations);
        ctx.pattern.firing_sequence.iterator_kind(seed)
    }

    fn fresh_iterator(&mut self, ctx: &FireContext) -> FiringIterator {
        let kind = self.kind_for(ctx);
        self.kind = Some(kind);
        FiringIterator::over(ctx.points, kind)
    }

    /// Fire the first step of a pass and queue the rest
    fn start_pass(&mut self, ctx: &FireContext, shots: &mut Vec<Shot>) {
        let iterator = match self.iterator.take() {
            Some(iterator) if !iterator.is_stale(ctx.points) => iterator,
            _ => self.fresh_iterator(ctx),
        };
        let iterator = self.iterator.insert(iterator);
        let first = iterator.first().map(<[Slot]>::to_vec);

        self.emit(SequencerEvent::IterationBegin);
        if let Some(slots) = first {
            self.fire_volley(ctx, &slots, shots);
        }
        self.queue_next(ctx);
    }

    /// Fetch the next step, or end the pass when there is none
    ///
    /// Fetching ahead means the last step of a pass is never followed by a
    /// bullet delay.
    fn queue_next(&mut self, ctx: &FireContext) {
        self.pending = self
            .iterator
            .as_mut()
            .and_then(|iterator| iterator.next().map(<[Slot]>::to_vec));

        if self.pending.is_some() {
            self.stage = Stage::Stepping;
            self.wait += ctx.pattern.step_delay();
        } else {
            self.finish_pass(ctx);
        }
    }

    fn finish_pass(&mut self, ctx: &FireContext) {
        self.emit(SequencerEvent::IterationEnd);
        self.passes_done += 1;

        if self.passes_done < ctx.pattern.total_passes() {
            self.stage = Stage::BurstGap;
            self.wait += ctx.pattern.burst_delay.max(0.0);
            return;
        }

        self.emit(SequencerEvent::BurstEnd);
        self.iterator = None;
        self.kind = None;
        if ctx.pattern.is_looping {
            self.emit(SequencerEvent::LoopFinished);
            self.stage = Stage::LoopGap;
            self.wait += ctx.pattern.loop_delay.max(0.0);
        } else {
            self.enter_cooldown(ctx);
        }
    }

    fn enter_cooldown(&mut self, ctx: &FireContext) {
        self.stage = Stage::Cooldown;
        self.iterator = None;
        self.kind = None;
        self.wait += ctx.pattern.single_fire_delay.max(0.0);
    }

    /// Shoot every live point of one step
    fn fire_volley(&mut self, ctx: &FireContext, slots: &[Slot], shots: &mut Vec<Shot>) {
        for &index in slots.iter().flatten() {
            let Some(point) = ctx.points.get(index) else {
                continue;
            };
            if !point.is_live() {
                continue;
            }
            shots.push(Shot {
                index,
                position: point.world,
                direction: ctx.aim.direction(ctx.pattern, point),
                speed: ctx.pattern.bullet_speed,
                damage: ctx.pattern.bullet_damage,
            });
            self.emit(SequencerEvent::FiringShot { index });
        }
    }
}

//! Shape resolver
//!
//! Owns the point set for one shape pattern. The set is rebuilt whenever the
//! pattern reports a change and rotated in place every tick.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use glam::Vec2;

use super::point::PointSet;
use super::{geometry, rotation};
use crate::error::PatternError;
use crate::iter::{FiringIterator, IteratorKind};
use crate::pattern::{ChangeNotifier, Pattern, ShapePattern, SharedPattern, SubscriptionId};
use crate::wrap_degrees;

/// Mutable state shared with the pattern's change handler
#[derive(Debug, Default)]
struct ShapeState {
    origin: Vec2,
    /// Accumulated spin (degrees, [0, 360))
    rotation_offset: f32,
    points: PointSet,
    built: bool,
}

impl ShapeState {
    fn rebuild(&mut self, pattern: &ShapePattern) {
        let mut points = geometry::build(self.origin, pattern);
        rotation::update(self.origin, pattern, &mut points, self.rotation_offset);
        self.points.replace(points);
        self.built = true;
        log::debug!(
            "Rebuilt {} shape: {} points (generation {})",
            pattern.geometry.as_str(),
            self.points.len(),
            self.points.generation()
        );
    }

    fn rotate(&mut self, pattern: &ShapePattern) {
        let origin = self.origin;
        let offset = self.rotation_offset;
        rotation::update(origin, pattern, self.points.as_mut_slice(), offset);
    }
}

/// Point set of one shape pattern, kept current with its configuration
#[derive(Debug)]
pub struct ShapeResolver {
    pattern: Option<SharedPattern<ShapePattern>>,
    subscription: Option<SubscriptionId>,
    state: Rc<RefCell<ShapeState>>,
    /// A change arrived while the points were borrowed
    pending: Rc<Cell<bool>>,
    on_rebuild: Rc<ChangeNotifier>,
}

impl ShapeResolver {
    pub fn new(origin: Vec2) -> Self {
        Self {
            pattern: None,
            subscription: None,
            state: Rc::new(RefCell::new(ShapeState {
                origin,
                ..Default::default()
            })),
            pending: Rc::new(Cell::new(false)),
            on_rebuild: Rc::new(ChangeNotifier::new()),
        }
    }

    /// Attach a pattern, subscribe to its changes and build
    ///
    /// Replaces any previously attached pattern.
    pub fn initialize(&mut self, pattern: SharedPattern<ShapePattern>) {
        self.shutdown();

        let state = Rc::downgrade(&self.state);
        let pending = Rc::downgrade(&self.pending);
        let notifier = Rc::downgrade(&self.on_rebuild);
        let source = Rc::downgrade(&pattern);
        let id = pattern.register_on_change(move || {
            on_pattern_changed(&state, &pending, &notifier, &source);
        });

        self.subscription = Some(id);
        self.pattern = Some(pattern);
        self.rebuild();
    }

    /// Detach from the pattern; the last build stays readable
    pub fn shutdown(&mut self) {
        if let (Some(pattern), Some(id)) = (self.pattern.take(), self.subscription.take()) {
            pattern.unregister_on_change(id);
            log::debug!("Shape resolver detached");
        }
    }

    pub fn pattern(&self) -> Option<&SharedPattern<ShapePattern>> {
        self.pattern.as_ref()
    }

    /// Rebuild from the attached pattern and notify rebuild subscribers
    pub fn rebuild(&mut self) {
        let Some(pattern) = &self.pattern else {
            log::warn!("Cannot rebuild shape: no shape pattern assigned");
            return;
        };
        let value = pattern.snapshot();
        self.state.borrow_mut().rebuild(&value);
        self.pending.set(false);
        self.on_rebuild.notify();
    }

    /// Advance the spin by the pattern's rotation rate and re-place the points
    pub fn tick(&mut self, dt: f32) {
        if self.pending.get() {
            self.rebuild();
        }
        let Some(pattern) = &self.pattern else {
            return;
        };
        let pattern = pattern.get();
        let mut state = self.state.borrow_mut();
        state.rotation_offset =
            rotation::advance(state.rotation_offset, pattern.rotation_degrees_per_second, dt);
        if state.built {
            state.rotate(&pattern);
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.state.borrow().origin
    }

    /// Move the shape; world positions follow immediately
    pub fn set_origin(&mut self, origin: Vec2) {
        self.state.borrow_mut().origin = origin;
        self.apply_rotation();
    }

    pub fn rotation_offset(&self) -> f32 {
        self.state.borrow().rotation_offset
    }

    /// Set the spin directly (degrees)
    pub fn set_rotation_offset(&mut self, degrees: f32) {
        self.state.borrow_mut().rotation_offset = wrap_degrees(degrees);
        self.apply_rotation();
    }

    fn apply_rotation(&mut self) {
        let pattern = self
            .pattern
            .as_ref()
            .map(|p| p.snapshot())
            .unwrap_or_default();
        let mut state = self.state.borrow_mut();
        if state.built {
            state.rotate(&pattern);
        }
    }

    pub fn is_built(&self) -> bool {
        self.state.borrow().built
    }

    /// Ok when a pattern is attached and its points exist
    pub fn ensure_built(&self) -> Result<(), PatternError> {
        if self.pattern.is_none() {
            return Err(PatternError::MissingShapePattern);
        }
        if !self.is_built() {
            return Err(PatternError::NotBuilt);
        }
        Ok(())
    }

    pub fn point_count(&self) -> usize {
        self.state.borrow().points.len()
    }

    /// World position and world normal of point `index`
    pub fn point_at(&self, index: usize) -> Option<(Vec2, Vec2)> {
        self.state
            .borrow()
            .points
            .get(index)
            .map(|p| (p.world, p.normal_world))
    }

    /// Borrow the live point set
    ///
    /// Pattern edits made while this borrow is held are applied on the next tick.
    pub fn points(&self) -> Ref<'_, PointSet> {
        Ref::map(self.state.borrow(), |state| &state.points)
    }

    /// New traversal over the current build
    pub fn iterator(&self, kind: IteratorKind) -> Result<FiringIterator, PatternError> {
        self.ensure_built()?;
        Ok(FiringIterator::over(&self.points(), kind))
    }

    /// Subscribe to structural rebuilds
    pub fn register_on_rebuild(&self, handler: impl Fn() + 'static) -> SubscriptionId {
        self.on_rebuild.register(handler)
    }

    pub fn unregister_on_rebuild(&self, id: SubscriptionId) -> bool {
        self.on_rebuild.unregister(id)
    }
}

impl Drop for ShapeResolver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn on_pattern_changed(
    state: &Weak<RefCell<ShapeState>>,
    pending: &Weak<Cell<bool>>,
    notifier: &Weak<ChangeNotifier>,
    source: &Weak<Pattern<ShapePattern>>,
) {
    let (Some(state), Some(source)) = (state.upgrade(), source.upgrade()) else {
        return;
    };
    let value = source.snapshot();
    match state.try_borrow_mut() {
        Ok(mut state) => state.rebuild(&value),
        Err(_) => {
            log::debug!("Shape points busy, deferring rebuild to next tick");
            if let Some(pending) = pending.upgrade() {
                pending.set(true);
            }
            return;
        }
    }
    if let Some(notifier) = notifier.upgrade() {
        notifier.notify();
    }
}

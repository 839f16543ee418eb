//! Authoring data
//!
//! Shape and bullet patterns are plain serde structs. They are shared between
//! the host and the resolvers through [`Pattern`], which pairs the value with
//! the change event resolvers subscribe to.

pub mod bullet;
pub mod notify;
pub mod shape;

pub use bullet::{BulletPattern, FiringSequence, Trajectory};
pub use notify::{ChangeNotifier, SubscriptionId};
pub use shape::{Geometry, GeometryLimits, ShapePattern};

use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Pattern handle shared by the host and any number of resolvers
pub type SharedPattern<T> = Rc<Pattern<T>>;

/// A pattern value plus its change event
#[derive(Debug, Default)]
pub struct Pattern<T> {
    value: RefCell<T>,
    on_change: ChangeNotifier,
}

impl<T> Pattern<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            on_change: ChangeNotifier::new(),
        }
    }

    /// Wrap a value for sharing
    pub fn shared(value: T) -> SharedPattern<T> {
        Rc::new(Self::new(value))
    }

    /// Borrow the current value
    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Mutate the value, then notify subscribers
    ///
    /// The borrow is released before handlers run, so handlers may read the
    /// pattern.
    pub fn edit<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value.borrow_mut());
        self.on_change.notify();
        result
    }

    /// Mutate the value without notifying (live tuning of values that do not
    /// change topology, e.g. rotation rate or bullet speed)
    pub fn edit_silently<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.value.borrow_mut())
    }

    /// Swap in a whole new value and notify
    pub fn replace(&self, value: T) -> T {
        let old = self.value.replace(value);
        self.on_change.notify();
        old
    }

    pub fn register_on_change(&self, handler: impl Fn() + 'static) -> SubscriptionId {
        self.on_change.register(handler)
    }

    pub fn unregister_on_change(&self, id: SubscriptionId) -> bool {
        self.on_change.unregister(id)
    }

    /// Fire the change event without touching the value
    pub fn notify_changed(&self) {
        self.on_change.notify();
    }

    pub fn subscriber_count(&self) -> usize {
        self.on_change.len()
    }
}

impl<T: Clone> Pattern<T> {
    /// Copy of the current value
    pub fn snapshot(&self) -> T {
        self.value.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_edit_notifies_after_release() {
        let pattern = Pattern::shared(ShapePattern::default());
        let seen = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&pattern);
        let out = Rc::clone(&seen);
        pattern.register_on_change(move || {
            // Reading inside the handler must not hit an outstanding borrow
            if let Some(pattern) = weak.upgrade() {
                out.set(pattern.get().point_count);
            }
        });

        pattern.edit(|p| p.point_count = 9);
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn test_edit_silently_skips_handlers() {
        let pattern = Pattern::shared(BulletPattern::default());
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        pattern.register_on_change(move || counter.set(counter.get() + 1));

        pattern.edit_silently(|p| p.bullet_speed = 42.0);
        assert_eq!(hits.get(), 0);
        assert_eq!(pattern.get().bullet_speed, 42.0);

        pattern.replace(BulletPattern::default());
        assert_eq!(hits.get(), 1);
    }
}

//! Change notification
//!
//! An ordered observer list. Handlers run synchronously in registration order
//! and are removed by the id handed out at registration.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`ChangeNotifier::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn()>;

/// Multicast change event
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler)>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler; it runs after every handler registered before it
    pub fn register(&self, handler: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Remove a handler. Returns false if the id was not registered.
    pub fn unregister(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Invoke every handler registered at the moment of the call
    pub fn notify(&self) {
        // Snapshot so handlers may register/unregister while we dispatch
        let handlers: Vec<Handler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("handlers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_in_registration_order() {
        let notifier = ChangeNotifier::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            notifier.register(move || log.borrow_mut().push(tag));
        }
        notifier.notify();

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unregister() {
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let id = notifier.register(move || counter.set(counter.get() + 1));
        notifier.notify();
        assert!(notifier.unregister(id));
        assert!(!notifier.unregister(id));
        notifier.notify();

        assert_eq!(hits.get(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_handler_may_unregister_itself() {
        let notifier = Rc::new(ChangeNotifier::new());
        let hits = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&notifier);
        let counter = Rc::clone(&hits);
        let slot = Rc::clone(&own_id);
        let id = notifier.register(move || {
            counter.set(counter.get() + 1);
            if let (Some(notifier), Some(id)) = (weak.upgrade(), slot.get()) {
                notifier.unregister(id);
            }
        });
        own_id.set(Some(id));

        notifier.notify();
        notifier.notify();
        assert_eq!(hits.get(), 1);
    }
}

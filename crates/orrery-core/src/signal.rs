//! Callback-registration event signals
//!
//! The simulation crates notify collaborators through explicit subscriber
//! lists rather than queues. Subscribers run synchronously, in registration
//! order, on the same thread that mutates the owning system.

/// Handle returned by [`Signal::subscribe`], used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// An event channel with a list of boxed callbacks
pub struct Signal<E> {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Box<dyn FnMut(&E)>)>,
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Signal<E> {
    /// Create an empty signal
    pub fn new() -> Self {
        Self {
            next_id: 1,
            subscribers: Vec::new(),
        }
    }

    /// Register a callback, returning a handle for deterministic removal
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered callback. Returns false if the handle
    /// was already removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Invoke every subscriber with the event, in registration order
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether no subscribers are registered
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Remove all subscribers
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl<E> std::fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::new();

        let a = hits.clone();
        signal.subscribe(move |v: &u32| a.borrow_mut().push(("a", *v)));
        let b = hits.clone();
        signal.subscribe(move |v: &u32| b.borrow_mut().push(("b", *v)));

        signal.emit(&7);
        assert_eq!(*hits.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut signal = Signal::new();

        let c = count.clone();
        let id = signal.subscribe(move |_: &()| *c.borrow_mut() += 1);

        signal.emit(&());
        assert!(signal.unsubscribe(id));
        signal.emit(&());

        assert_eq!(*count.borrow(), 1);
        // Second removal is a no-op
        assert!(!signal.unsubscribe(id));
    }

    #[test]
    fn test_clear() {
        let mut signal: Signal<u32> = Signal::new();
        signal.subscribe(|_| {});
        signal.subscribe(|_| {});
        assert_eq!(signal.len(), 2);
        signal.clear();
        assert!(signal.is_empty());
    }
}

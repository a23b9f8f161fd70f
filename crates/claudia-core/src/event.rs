//! Change notification
//!
//! Every service owns an `EventEmitter` for its own event type. Listeners
//! stay registered for as long as the `Subscription` returned by
//! `subscribe` is alive; dropping the handle unregisters them.
//!
//! Dispatch is synchronous and fans out to every listener registered at
//! the time of the call. Order among listeners is unspecified.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use parking_lot::RwLock;

/// Base trait for all events
pub trait Event: Send + Sync + 'static {
    /// Event name for debugging/logging
    fn name(&self) -> &'static str;
}

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Listeners<E> {
    next_id: u64,
    entries: BTreeMap<u64, Listener<E>>,
}

/// Typed event emitter owned by a single service
pub struct EventEmitter<E: Event> {
    listeners: Arc<RwLock<Listeners<E>>>,
}

impl<E: Event> EventEmitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(RwLock::new(Listeners {
                next_id: 0,
                entries: BTreeMap::new(),
            })),
        }
    }

    /// Register a listener
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = {
            let mut listeners = self.listeners.write();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.insert(id, Arc::new(listener));
            id
        };

        let weak: Weak<RwLock<Listeners<E>>> = Arc::downgrade(&self.listeners);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    listeners.write().entries.remove(&id);
                }
            })),
        }
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: &E) {
        // Listeners may subscribe or unsubscribe while being notified.
        let snapshot: Vec<Listener<E>> = self.listeners.read().entries.values().cloned().collect();

        tracing::trace!(event = event.name(), listeners = snapshot.len(), "emitting event");

        for listener in snapshot {
            listener(event);
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().entries.len()
    }
}

impl<E: Event> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a registered listener
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Unregister the listener now
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    /// Keep the listener registered for the emitter's lifetime
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Ping(u32);

    impl Event for Ping {
        fn name(&self) -> &'static str { "test.ping" }
    }

    #[test]
    fn test_emit_reaches_all_listeners() {
        let emitter = EventEmitter::<Ping>::new();
        let total = Arc::new(AtomicUsize::new(0));

        let a = {
            let total = Arc::clone(&total);
            emitter.subscribe(move |ping| {
                total.fetch_add(ping.0 as usize, Ordering::SeqCst);
            })
        };
        let b = {
            let total = Arc::clone(&total);
            emitter.subscribe(move |ping| {
                total.fetch_add(ping.0 as usize * 10, Ordering::SeqCst);
            })
        };

        emitter.emit(&Ping(1));
        assert_eq!(total.load(Ordering::SeqCst), 11);
        assert_eq!(emitter.listener_count(), 2);

        drop(a);
        drop(b);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let emitter = EventEmitter::<Ping>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let subscription = {
            let count = Arc::clone(&count);
            emitter.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };

        emitter.emit(&Ping(0));
        drop(subscription);
        emitter.emit(&Ping(0));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let emitter = EventEmitter::<Ping>::new();
        let subscription = emitter.subscribe(|_| {});
        assert_eq!(emitter.listener_count(), 1);

        subscription.unsubscribe();
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn test_detach_keeps_listener() {
        let emitter = EventEmitter::<Ping>::new();
        emitter.subscribe(|_| {}).detach();
        assert_eq!(emitter.listener_count(), 1);
    }

    #[test]
    fn test_subscription_outlives_emitter() {
        let emitter = EventEmitter::<Ping>::new();
        let subscription = emitter.subscribe(|_| {});
        drop(emitter);
        drop(subscription);
    }

    #[test]
    fn test_listener_may_subscribe_during_emit() {
        let emitter = Arc::new(EventEmitter::<Ping>::new());
        let inner = Arc::clone(&emitter);

        emitter
            .subscribe(move |_| {
                inner.subscribe(|_| {}).detach();
            })
            .detach();

        emitter.emit(&Ping(0));
        assert_eq!(emitter.listener_count(), 2);
    }
}

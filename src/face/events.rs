//! Subscriber registry for face-table notifications
//!
//! The host publishes [`FaceEvent`]s here when faces come and go. Each
//! strategy instance subscribes once and forwards the events to its link
//! selector, so the selector's view of available faces is current before the
//! next forwarding decision.

use super::FaceEvent;
use parking_lot::RwLock;
use std::sync::Arc;

/// Handle for unsubscribing from face events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    /// Get the numeric ID of this handle
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Type alias for face event callbacks
pub type FaceEventCallback = Arc<dyn Fn(FaceEvent) + Send + Sync + 'static>;

/// Manages face event subscriptions and delivery
pub struct FaceEventHandlers {
    handlers: Arc<RwLock<Vec<(SubscriptionHandle, FaceEventCallback)>>>,
    next_id: Arc<RwLock<u64>>,
}

impl FaceEventHandlers {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(RwLock::new(0)),
        }
    }

    /// Register a callback for all future face events
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(FaceEvent) + Send + Sync + 'static,
    {
        let mut next_id = self.next_id.write();
        let handle = SubscriptionHandle(*next_id);
        *next_id += 1;

        self.handlers.write().push((handle, Arc::new(callback)));
        handle
    }

    /// Remove a callback. Unknown handles are ignored.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.handlers.write().retain(|(h, _)| *h != handle);
    }

    /// Deliver an event to every subscriber in registration order
    ///
    /// A panicking subscriber is logged and skipped; the rest still run.
    pub fn dispatch(&self, event: FaceEvent) {
        // Snapshot so a callback may subscribe or unsubscribe without deadlocking.
        let handlers: Vec<_> = self.handlers.read().clone();

        for (handle, callback) in handlers.iter() {
            if let Err(e) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                callback(event);
            })) {
                tracing::error!(
                    "Face event subscriber {:?} panicked on {:?}: {:?}",
                    handle,
                    event,
                    e.downcast_ref::<&str>()
                        .copied()
                        .or_else(|| e.downcast_ref::<String>().map(|s| s.as_str()))
                        .unwrap_or("unknown panic")
                );
            }
        }
    }

    /// Number of registered subscribers
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl Default for FaceEventHandlers {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FaceEventHandlers {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{FaceId, FaceScope};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn added(id: u64) -> FaceEvent {
        FaceEvent::Added {
            face: FaceId(id),
            scope: FaceScope::NonLocal,
        }
    }

    #[test]
    fn test_dispatch_in_order() {
        let handlers = FaceEventHandlers::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        handlers.subscribe(move |event| seen_clone.lock().push(event.face()));

        handlers.dispatch(added(1));
        handlers.dispatch(FaceEvent::Removed { face: FaceId(1) });

        assert_eq!(*seen.lock(), vec![FaceId(1), FaceId(1)]);
    }

    #[test]
    fn test_unsubscribe() {
        let handlers = FaceEventHandlers::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = Arc::clone(&count);
        let handle = handlers.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(handlers.handler_count(), 1);

        handlers.unsubscribe(handle);
        handlers.dispatch(added(2));

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(handlers.handler_count(), 0);
    }

    #[test]
    fn test_clone_shares_subscribers() {
        let handlers = FaceEventHandlers::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = Arc::clone(&count);
        handlers.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        handlers.clone().dispatch(added(3));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panic_isolation() {
        let handlers = FaceEventHandlers::new();
        let count = Arc::new(AtomicUsize::new(0));

        handlers.subscribe(|_| panic!("subscriber panic"));

        let count_clone = Arc::clone(&count);
        handlers.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        handlers.dispatch(added(4));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}

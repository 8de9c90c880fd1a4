//! Per-engine event observers.
//!
//! Each engine instance owns its own subscriber list; there is no shared or
//! global event bus. Handlers are invoked in registration order and carry no
//! payload — consumers read updated state from the engine's accessors.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Lifecycle events emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineEvent {
    /// A reload cycle completed and the models were updated.
    ReloadSuccess,
    /// A reload cycle failed; error state was distributed to the models.
    ReloadError,
}

impl EngineEvent {
    /// Wire-stable name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineEvent::ReloadSuccess => "reload-success",
            EngineEvent::ReloadError => "reload-error",
        }
    }
}

/// Handle returned by [`EventObservers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    event: EngineEvent,
    callback: Arc<dyn Fn() + Send + Sync>,
}

/// Explicit observer list owned by one engine instance.
#[derive(Default)]
pub(crate) struct EventObservers {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl EventObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for an event; handlers fire in registration order.
    pub fn subscribe(
        &self,
        event: EngineEvent,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Subscriber {
                id,
                event,
                callback: Arc::new(callback),
            });
        }
        id
    }

    /// Removes a previously registered handler.
    ///
    /// Returns `true` when a handler was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            let before = subscribers.len();
            subscribers.retain(|s| s.id != id);
            return subscribers.len() < before;
        }
        false
    }

    /// Invokes every handler registered for `event`.
    ///
    /// Handlers run outside the subscriber lock, so a handler may subscribe
    /// or unsubscribe without deadlocking.
    pub fn emit(&self, event: EngineEvent) {
        let callbacks: Vec<Arc<dyn Fn() + Send + Sync>> = self
            .subscribers
            .lock()
            .map(|subscribers| {
                subscribers
                    .iter()
                    .filter(|s| s.event == event)
                    .map(|s| Arc::clone(&s.callback))
                    .collect()
            })
            .unwrap_or_default();

        for callback in callbacks {
            callback();
        }
    }
}

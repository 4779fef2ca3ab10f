//! Publish/subscribe channel for layout-wide UI signals.
//!
//! The bus is owned by the application shell and handed to components that
//! publish or listen. Signals carry no payload; listeners re-read whatever
//! state they care about.

use std::fmt;
use std::sync::{Arc, RwLock};

/// Signals broadcast on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Column widths were recomputed; siblings may need to reflow.
    LayoutChanged,
    /// A scrollable region moved.
    ScrollChanged,
}

impl Signal {
    pub const fn name(self) -> &'static str {
        match self {
            Signal::LayoutChanged => "layout-changed",
            Signal::ScrollChanged => "scroll-changed",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle returned by [`UiEventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(Signal) + Send + Sync>;

struct Subscriber {
    id: SubscriptionId,
    signal: Signal,
    handler: Handler,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Cloneable handle to a shared bus. Clones publish to the same listeners.
#[derive(Clone, Default)]
pub struct UiEventBus {
    inner: Arc<RwLock<BusInner>>,
}

impl UiEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one signal.
    pub fn subscribe(
        &self,
        signal: Signal,
        handler: impl Fn(Signal) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            signal,
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let before = inner.subscribers.len();
        inner.subscribers.retain(|s| s.id != id);
        inner.subscribers.len() != before
    }

    /// Notify every listener of `signal`. Fire-and-forget: returns the
    /// number of listeners called.
    ///
    /// Handlers run after the lock is released, so they may publish or
    /// (un)subscribe themselves.
    pub fn publish(&self, signal: Signal) -> usize {
        let handlers: Vec<Handler> = {
            let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
            inner
                .subscribers
                .iter()
                .filter(|s| s.signal == signal)
                .map(|s| Arc::clone(&s.handler))
                .collect()
        };

        log::trace!("publishing {signal} to {} listener(s)", handlers.len());
        for handler in &handlers {
            handler(signal);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self, signal: Signal) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .subscribers
            .iter()
            .filter(|s| s.signal == signal)
            .count()
    }
}

impl fmt::Debug for UiEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("UiEventBus")
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

//! Single-sink registration slot.
//!
//! # Responsibility
//! - Hold the one downstream sink the host wires in at startup.
//! - Make attach/detach safe to observe from concurrent forwarding calls.
//!
//! # Invariants
//! - At most one sink is registered at a time; attach replaces.
//! - `current()` never blocks on a sink's `emit` work: the lock only
//!   guards the slot read, and the handle is cloned out before use.

use crate::model::event::TransactionNotification;
use std::sync::{Arc, RwLock};

/// Contract implemented by the host-supplied downstream consumer.
///
/// `emit` receives one notification per classified message and must return
/// promptly; the pipeline treats delivery as fire-and-forget and will not
/// retry.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &TransactionNotification);
}

/// Shared slot the host attaches its sink into.
///
/// Both the host (attach/detach at startup/teardown) and the forwarder
/// (reads on every classified message) hold this behind an `Arc`.
#[derive(Default)]
pub struct SinkSlot {
    inner: RwLock<Option<Arc<dyn EventSink>>>,
}

impl SinkSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the downstream sink, replacing any previous registration.
    pub fn attach(&self, sink: Arc<dyn EventSink>) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(sink);
    }

    /// Clears the registration; in-flight events already handed to the old
    /// sink are unaffected, later events are dropped.
    pub fn detach(&self) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// Returns the currently attached sink, if any.
    pub fn current(&self) -> Option<Arc<dyn EventSink>> {
        let slot = self.inner.read().unwrap_or_else(|e| e.into_inner());
        slot.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.current().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{EventSink, SinkSlot};
    use crate::model::event::TransactionNotification;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSink {
        emitted: AtomicUsize,
    }

    impl EventSink for CountingSink {
        fn emit(&self, _event: &TransactionNotification) {
            self.emitted.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn attach_detach_cycle_updates_current() {
        let slot = SinkSlot::new();
        assert!(!slot.is_attached());

        let sink = Arc::new(CountingSink {
            emitted: AtomicUsize::new(0),
        });
        slot.attach(sink.clone());
        assert!(slot.is_attached());

        slot.detach();
        assert!(slot.current().is_none());
    }

    #[test]
    fn attach_replaces_previous_sink() {
        let slot = SinkSlot::new();
        let first = Arc::new(CountingSink {
            emitted: AtomicUsize::new(0),
        });
        let second = Arc::new(CountingSink {
            emitted: AtomicUsize::new(0),
        });

        slot.attach(first.clone());
        slot.attach(second.clone());

        let event = TransactionNotification {
            address: "MPESA".to_string(),
            body: "Confirmed.".to_string(),
            timestamp_ms: 1.0,
        };
        if let Some(sink) = slot.current() {
            sink.emit(&event);
        }
        assert_eq!(first.emitted.load(Ordering::SeqCst), 0);
        assert_eq!(second.emitted.load(Ordering::SeqCst), 1);
    }
}

//! Best-effort event forwarding to the registered sink.
//!
//! # Invariants
//! - `forward` is only called for messages that classified positive; the
//!   dispatcher owns that sequencing.
//! - No sink attached means the event is dropped, not queued: delivery is
//!   best-effort with no retry and no buffering.
//! - Forwarding never blocks on attach/detach: the sink handle is read
//!   atomically and `emit` runs outside the slot lock.

use crate::model::event::TransactionNotification;
use crate::model::message::SmsMessage;
use crate::sink::slot::SinkSlot;
use log::{debug, trace};
use std::sync::Arc;

/// Hands classified messages to the currently attached sink.
pub struct EventForwarder {
    slot: Arc<SinkSlot>,
}

impl EventForwarder {
    /// Creates a forwarder over the shared registration slot.
    ///
    /// The slot is injected explicitly; the forwarder performs no ambient
    /// or global lookup to find the host.
    pub fn new(slot: Arc<SinkSlot>) -> Self {
        Self { slot }
    }

    /// Builds a `TransactionNotification` from `msg` and emits it on the
    /// attached sink; silently drops the event when no sink is attached.
    pub fn forward(&self, msg: &SmsMessage) {
        let Some(sink) = self.slot.current() else {
            // Expected during host startup/teardown; not an error.
            debug!("event=forward_dropped reason=no_active_sink");
            return;
        };

        let event = TransactionNotification::from_message(msg);
        trace!(
            "event=forward address={} body_len={}",
            event.address,
            event.body.len()
        );
        sink.emit(&event);
    }
}

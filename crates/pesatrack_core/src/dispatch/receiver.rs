//! Entry point invoked once per inbound transport event.
//!
//! # Responsibility
//! - Group fragments into logical messages and run each through the
//!   pipeline.
//! - Gate processing behind the host-driven `{inactive, active}` lifecycle.
//!
//! # Invariants
//! - Stateless across invocations: concurrent calls share nothing mutable
//!   beyond the sink slot, which is read atomically.
//! - A failure inside one logical message never reaches the transport
//!   callback and never blocks the remaining messages of the same event.
//! - At most one forward per logical message per invocation.

use crate::classify::rules::is_mobile_money;
use crate::decode::fragment::decode;
use crate::model::message::RawFragment;
use crate::sink::forwarder::EventForwarder;
use crate::sink::slot::SinkSlot;
use log::{info, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives raw fragment batches from the transport bridge and drives the
/// pipeline.
///
/// The host constructs one dispatcher at startup, injecting the shared
/// sink slot, and calls [`SmsDispatcher::on_inbound_event`] from its
/// transport callback.
pub struct SmsDispatcher {
    forwarder: EventForwarder,
    active: AtomicBool,
}

impl SmsDispatcher {
    /// Creates an inactive dispatcher over the shared sink slot.
    ///
    /// The host flips it active once its permission flow has granted
    /// message access.
    pub fn new(slot: Arc<SinkSlot>) -> Self {
        Self {
            forwarder: EventForwarder::new(slot),
            active: AtomicBool::new(false),
        }
    }

    /// Starts processing inbound events.
    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
        info!("event=dispatcher_activated");
    }

    /// Stops processing; events arriving while inactive are ignored.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        info!("event=dispatcher_deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Processes one inbound transport event.
    ///
    /// Fragments are grouped into logical messages, then each group runs
    /// decode -> classify -> forward. Never panics into the caller: a
    /// failure inside one group is logged and the remaining groups still
    /// run.
    pub fn on_inbound_event(&self, fragments: &[RawFragment]) {
        if !self.is_active() {
            return;
        }

        for group in group_fragments(fragments) {
            let outcome = catch_unwind(AssertUnwindSafe(|| self.process_group(group)));
            if outcome.is_err() {
                // Contained: the transport layer must never observe this.
                warn!(
                    "event=message_processing_failed status=contained fragments={}",
                    group.len()
                );
            }
        }
    }

    fn process_group(&self, group: &[RawFragment]) {
        let msg = decode(group);
        if is_mobile_money(&msg) {
            info!(
                "event=message_classified outcome=positive fragments={}",
                group.len()
            );
            self.forwarder.forward(&msg);
        }
    }
}

/// Splits an inbound batch into logical-message groups.
///
/// Fragments of one message share address and timestamp and arrive
/// adjacent, so consecutive fragments with an equal `(address,
/// timestamp_ms)` key form one group. Arrival order is preserved both
/// across and within groups.
fn group_fragments(fragments: &[RawFragment]) -> impl Iterator<Item = &[RawFragment]> + '_ {
    fragments.chunk_by(|a, b| a.address == b.address && a.timestamp_ms == b.timestamp_ms)
}

#[cfg(test)]
mod tests {
    use super::{group_fragments, SmsDispatcher};
    use crate::model::event::TransactionNotification;
    use crate::model::message::RawFragment;
    use crate::sink::slot::{EventSink, SinkSlot};
    use std::sync::{Arc, Mutex};

    struct CapturingSink {
        events: Mutex<Vec<TransactionNotification>>,
    }

    impl CapturingSink {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }

        fn captured(&self) -> Vec<TransactionNotification> {
            self.events.lock().expect("sink lock should be clean").clone()
        }
    }

    impl EventSink for CapturingSink {
        fn emit(&self, event: &TransactionNotification) {
            self.events
                .lock()
                .expect("sink lock should be clean")
                .push(event.clone());
        }
    }

    fn wired_dispatcher() -> (SmsDispatcher, Arc<CapturingSink>) {
        let slot = Arc::new(SinkSlot::new());
        let sink = Arc::new(CapturingSink::new());
        slot.attach(sink.clone());
        let dispatcher = SmsDispatcher::new(slot);
        dispatcher.activate();
        (dispatcher, sink)
    }

    #[test]
    fn inactive_dispatcher_ignores_events() {
        let slot = Arc::new(SinkSlot::new());
        let sink = Arc::new(CapturingSink::new());
        slot.attach(sink.clone());

        let dispatcher = SmsDispatcher::new(slot);
        dispatcher.on_inbound_event(&[RawFragment::from_text("MPESA", "Confirmed.", 1)]);
        assert!(sink.captured().is_empty());

        dispatcher.activate();
        dispatcher.on_inbound_event(&[RawFragment::from_text("MPESA", "Confirmed.", 1)]);
        assert_eq!(sink.captured().len(), 1);

        dispatcher.deactivate();
        dispatcher.on_inbound_event(&[RawFragment::from_text("MPESA", "Confirmed.", 2)]);
        assert_eq!(sink.captured().len(), 1);
    }

    #[test]
    fn positive_message_is_forwarded_once() {
        let (dispatcher, sink) = wired_dispatcher();
        dispatcher.on_inbound_event(&[RawFragment::from_text(
            "MPESA",
            "You have received Ksh500",
            1_700_000_000_000,
        )]);

        let events = sink.captured();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].address, "MPESA");
        assert_eq!(events[0].body, "You have received Ksh500");
    }

    #[test]
    fn negative_message_is_not_forwarded() {
        let (dispatcher, sink) = wired_dispatcher();
        dispatcher.on_inbound_event(&[RawFragment::from_text(
            "BANK-ALERT",
            "Your balance is low",
            5,
        )]);
        assert!(sink.captured().is_empty());
    }

    #[test]
    fn malformed_group_does_not_block_the_rest_of_the_batch() {
        let (dispatcher, sink) = wired_dispatcher();
        let batch = vec![
            RawFragment {
                address: vec![0xff],
                payload: vec![0xff, 0xfe],
                timestamp_ms: 1,
            },
            RawFragment::from_text("+254711000111", "Confirmed. You have sent Ksh1,000", 2),
            RawFragment::from_text("MPESA", "M-PESA balance Ksh20", 3),
        ];

        dispatcher.on_inbound_event(&batch);
        let events = sink.captured();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].address, "+254711000111");
        assert_eq!(events[1].address, "MPESA");
    }

    #[test]
    fn multi_part_fragments_forward_one_event() {
        let (dispatcher, sink) = wired_dispatcher();
        let batch = vec![
            RawFragment::from_text("MPESA", "Confirmed. Ksh12,000 sent to ", 9),
            RawFragment::from_text("MPESA", "Acme Traders on 1/2/26", 9),
        ];

        dispatcher.on_inbound_event(&batch);
        let events = sink.captured();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].body,
            "Confirmed. Ksh12,000 sent to Acme Traders on 1/2/26"
        );
    }

    #[test]
    fn grouping_splits_on_address_or_timestamp_change() {
        let batch = vec![
            RawFragment::from_text("MPESA", "a", 1),
            RawFragment::from_text("MPESA", "b", 1),
            RawFragment::from_text("MPESA", "c", 2),
            RawFragment::from_text("OTHER", "d", 2),
        ];

        let groups: Vec<_> = group_fragments(&batch).collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[2].len(), 1);
    }

    #[test]
    fn no_sink_attached_is_silent() {
        let slot = Arc::new(SinkSlot::new());
        let dispatcher = SmsDispatcher::new(slot);
        dispatcher.activate();
        dispatcher.on_inbound_event(&[RawFragment::from_text("MPESA", "Confirmed", 1)]);
    }
}

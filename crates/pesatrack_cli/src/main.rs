//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pesatrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use pesatrack_core::{
    EventSink, RawFragment, SinkSlot, SmsDispatcher, TransactionNotification,
};
use std::sync::{Arc, Mutex};

struct PrintingSink {
    forwarded: Mutex<usize>,
}

impl EventSink for PrintingSink {
    fn emit(&self, event: &TransactionNotification) {
        let mut forwarded = self.forwarded.lock().unwrap_or_else(|e| e.into_inner());
        *forwarded += 1;
        println!("forwarded address={} body={}", event.address, event.body);
    }
}

fn main() {
    println!("pesatrack_core ping={}", pesatrack_core::ping());
    println!("pesatrack_core version={}", pesatrack_core::core_version());

    // Why: run two canned messages through a real dispatcher to validate
    // core wiring independently from the FFI runtime setup.
    let slot = Arc::new(SinkSlot::new());
    let sink = Arc::new(PrintingSink {
        forwarded: Mutex::new(0),
    });
    slot.attach(sink.clone());

    let dispatcher = SmsDispatcher::new(slot);
    dispatcher.activate();

    dispatcher.on_inbound_event(&[RawFragment::from_text(
        "MPESA",
        "You have received Ksh500",
        1_700_000_000_000,
    )]);
    dispatcher.on_inbound_event(&[RawFragment::from_text(
        "BANK-ALERT",
        "Your balance is low",
        1_700_000_000_001,
    )]);

    let forwarded = *sink.forwarded.lock().unwrap_or_else(|e| e.into_inner());
    println!("forwarded_count={forwarded}");
}

//! FFI use-case API for host-facing calls.
//!
//! # Responsibility
//! - Expose lifecycle, ingestion and event-drain functions to the host
//!   application over the bridge.
//! - Keep error semantics simple: response envelopes, no exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Core-side delivery stays fire-and-forget: the drain buffer drops the
//!   oldest event on overflow instead of blocking the pipeline.

use log::debug;
use pesatrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EventSink, RawFragment, SinkSlot, SmsDispatcher, TransactionNotification,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

const DEFAULT_BUFFER_CAPACITY: usize = 64;
const BUFFER_CAPACITY_MAX: usize = 1024;

/// Process-wide pipeline wiring: one sink slot, one dispatcher.
struct FfiRuntime {
    slot: Arc<SinkSlot>,
    dispatcher: SmsDispatcher,
    buffer: Mutex<Option<Arc<DrainBufferSink>>>,
}

static RUNTIME: OnceLock<FfiRuntime> = OnceLock::new();

fn runtime() -> &'static FfiRuntime {
    RUNTIME.get_or_init(|| {
        let slot = Arc::new(SinkSlot::new());
        let dispatcher = SmsDispatcher::new(slot.clone());
        FfiRuntime {
            slot,
            dispatcher,
            buffer: Mutex::new(None),
        }
    })
}

/// Bounded host-drained sink.
///
/// The Dart side polls `drain_events`; the pipeline side `emit` never
/// blocks and evicts the oldest event when the buffer is full.
struct DrainBufferSink {
    capacity: usize,
    events: Mutex<VecDeque<TransactionNotification>>,
}

impl DrainBufferSink {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    fn drain(&self) -> Vec<TransactionNotification> {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.drain(..).collect()
    }

    fn len(&self) -> usize {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.len()
    }
}

impl EventSink for DrainBufferSink {
    fn emit(&self, event: &TransactionNotification) {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        if events.len() == self.capacity {
            events.pop_front();
            debug!("event=buffer_overflow action=dropped_oldest");
        }
        events.push_back(event.clone());
    }
}

/// One raw transport fragment as passed over the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiFragment {
    /// Originating address bytes; may be empty or non-UTF-8.
    pub address: Vec<u8>,
    /// Body segment bytes; may be non-UTF-8.
    pub payload: Vec<u8>,
    /// Unix epoch milliseconds stamped by the transport.
    pub timestamp_ms: i64,
}

/// Notification record handed to the host when draining.
#[derive(Debug, Clone, PartialEq)]
pub struct FfiNotification {
    pub address: String,
    pub body: String,
    pub timestamp_ms: f64,
}

impl From<TransactionNotification> for FfiNotification {
    fn from(event: TransactionNotification) -> Self {
        Self {
            address: event.address,
            body: event.body,
            timestamp_ms: event.timestamp_ms,
        }
    }
}

/// Generic action response envelope for host commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl FfiActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Minimal health-check API for bridge smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking, UI-thread safe.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; reconfiguration attempts
///   return an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Starts inbound message processing.
///
/// The host calls this once its permission flow has granted SMS access.
#[flutter_rust_bridge::frb(sync)]
pub fn listener_activate() {
    runtime().dispatcher.activate();
}

/// Stops inbound message processing; events arriving while inactive are
/// ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn listener_deactivate() {
    runtime().dispatcher.deactivate();
}

/// Returns whether the listener is currently active.
#[flutter_rust_bridge::frb(sync)]
pub fn listener_is_active() -> bool {
    runtime().dispatcher.is_active()
}

/// Feeds one received SMS into the pipeline (single-fragment fast path).
///
/// # FFI contract
/// - Never throws; processing failures are contained in the core and the
///   call still reports `ok`.
#[flutter_rust_bridge::frb(sync)]
pub fn ingest_sms(address: String, body: String, timestamp_ms: i64) -> FfiActionResponse {
    let fragment = RawFragment::from_text(address.as_str(), body.as_str(), timestamp_ms);
    runtime().dispatcher.on_inbound_event(&[fragment]);
    FfiActionResponse::success("ingested")
}

/// Feeds one raw fragment batch into the pipeline (multi-part path).
#[flutter_rust_bridge::frb(sync)]
pub fn ingest_fragments(fragments: Vec<FfiFragment>) -> FfiActionResponse {
    if fragments.is_empty() {
        return FfiActionResponse::failure("fragment batch is empty");
    }

    let raw: Vec<RawFragment> = fragments
        .into_iter()
        .map(|f| RawFragment {
            address: f.address,
            payload: f.payload,
            timestamp_ms: f.timestamp_ms,
        })
        .collect();
    runtime().dispatcher.on_inbound_event(&raw);
    FfiActionResponse::success("ingested")
}

/// Attaches the host-drained event buffer as the downstream sink.
///
/// `capacity = 0` selects the default. Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn attach_event_buffer(capacity: u32) -> String {
    let capacity = match capacity as usize {
        0 => DEFAULT_BUFFER_CAPACITY,
        c if c > BUFFER_CAPACITY_MAX => {
            return format!("capacity {c} exceeds maximum {BUFFER_CAPACITY_MAX}");
        }
        c => c,
    };

    let rt = runtime();
    let sink = Arc::new(DrainBufferSink::new(capacity));
    {
        let mut buffer = rt.buffer.lock().unwrap_or_else(|e| e.into_inner());
        *buffer = Some(sink.clone());
    }
    rt.slot.attach(sink);
    String::new()
}

/// Detaches the event buffer; later classified messages are dropped.
#[flutter_rust_bridge::frb(sync)]
pub fn detach_event_buffer() {
    let rt = runtime();
    rt.slot.detach();
    let mut buffer = rt.buffer.lock().unwrap_or_else(|e| e.into_inner());
    *buffer = None;
}

/// Returns and clears all buffered notifications, oldest first.
#[flutter_rust_bridge::frb(sync)]
pub fn drain_events() -> Vec<FfiNotification> {
    let rt = runtime();
    let buffer = rt.buffer.lock().unwrap_or_else(|e| e.into_inner());
    match buffer.as_ref() {
        Some(sink) => sink.drain().into_iter().map(FfiNotification::from).collect(),
        None => Vec::new(),
    }
}

/// Returns the number of notifications waiting to be drained.
#[flutter_rust_bridge::frb(sync)]
pub fn buffered_event_count() -> u32 {
    let rt = runtime();
    let buffer = rt.buffer.lock().unwrap_or_else(|e| e.into_inner());
    buffer.as_ref().map(|sink| sink.len()).unwrap_or(0) as u32
}

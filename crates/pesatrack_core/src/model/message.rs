//! Transport fragments and decoded logical messages.
//!
//! # Responsibility
//! - Mirror what the OS hands over per received SMS: raw fragment bytes.
//! - Hold the decoded `{sender, body, timestamp}` triple the pipeline
//!   classifies and forwards.
//!
//! # Invariants
//! - `SmsMessage` is immutable once constructed.
//! - Malformed transport data maps to `None` fields, never to an error.

/// One raw transport unit as delivered by the OS message mechanism.
///
/// Several fragments may compose a single logical message; fragments of one
/// message share `address` and `timestamp_ms` and arrive already ordered.
/// Either byte field may be empty or non-UTF-8 when the payload is
/// malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFragment {
    /// Originating address bytes (usually a short code or MSISDN).
    pub address: Vec<u8>,
    /// Message body segment bytes.
    pub payload: Vec<u8>,
    /// Unix epoch milliseconds stamped by the transport.
    pub timestamp_ms: i64,
}

impl RawFragment {
    /// Builds a well-formed fragment from text parts.
    ///
    /// Malformed fragments are constructed directly with arbitrary bytes.
    pub fn from_text(address: &str, payload: &str, timestamp_ms: i64) -> Self {
        Self {
            address: address.as_bytes().to_vec(),
            payload: payload.as_bytes().to_vec(),
            timestamp_ms,
        }
    }
}

/// Decoded logical message reconstructed from one fragment group.
///
/// `sender` and `body` are `None` when the corresponding transport data
/// could not be decoded; classification degrades to whichever field is
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// Display originating address, when decodable.
    pub sender: Option<String>,
    /// Full reassembled message text, when decodable.
    pub body: Option<String>,
    /// Unix epoch milliseconds from the first fragment.
    pub timestamp_ms: i64,
}

impl SmsMessage {
    /// Returns whether neither sender nor body could be decoded.
    pub fn is_blank(&self) -> bool {
        self.sender.is_none() && self.body.is_none()
    }
}

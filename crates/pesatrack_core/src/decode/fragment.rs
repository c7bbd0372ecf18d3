//! Decoder from ordered raw fragments to one `SmsMessage`.
//!
//! # Invariants
//! - Decoding is total: any byte input yields a message, never an error.
//! - Fragment order is preserved when reassembling multi-part bodies.
//! - Sender and timestamp always come from the first fragment; the
//!   transport guarantees all fragments of one message share them.

use crate::model::message::{RawFragment, SmsMessage};

/// Reconstructs a logical message from its ordered fragments.
///
/// The body is the in-order concatenation of every fragment payload that
/// decodes as UTF-8; undecodable fragments are skipped and decoding
/// continues with the rest. A sender address that is empty or not UTF-8
/// yields `sender = None`. An empty fragment slice yields a fully blank
/// message with timestamp 0.
pub fn decode(fragments: &[RawFragment]) -> SmsMessage {
    let Some(first) = fragments.first() else {
        return SmsMessage {
            sender: None,
            body: None,
            timestamp_ms: 0,
        };
    };

    let sender = decode_address(&first.address);

    let mut body = String::new();
    for fragment in fragments {
        if let Ok(segment) = std::str::from_utf8(&fragment.payload) {
            body.push_str(segment);
        }
    }

    SmsMessage {
        sender,
        body: if body.is_empty() { None } else { Some(body) },
        timestamp_ms: first.timestamp_ms,
    }
}

fn decode_address(address: &[u8]) -> Option<String> {
    match std::str::from_utf8(address) {
        Ok(text) if !text.is_empty() => Some(text.to_string()),
        _ => None,
    }
}

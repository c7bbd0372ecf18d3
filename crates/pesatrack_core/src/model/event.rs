//! Forwarded notification event shape.

use crate::model::message::SmsMessage;
use serde::{Deserialize, Serialize};

/// Channel identifier the host listens on for forwarded notifications.
pub const SMS_EVENT_CHANNEL: &str = "sms_received";

/// Structured record handed to the downstream sink for one mobile-money
/// notification.
///
/// `timestamp_ms` is an `f64` because the consuming side stores it in a
/// numeric type with reduced integer precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionNotification {
    /// Originating address; empty when the sender could not be decoded.
    pub address: String,
    /// Message text; empty when the body could not be decoded.
    pub body: String,
    /// Unix epoch milliseconds.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
}

impl TransactionNotification {
    /// Builds the forwarded record from a message that classified positive.
    ///
    /// Absent fields map to empty strings: the consumer contract uses
    /// non-null strings for both `address` and `body`.
    pub fn from_message(msg: &SmsMessage) -> Self {
        Self {
            address: msg.sender.clone().unwrap_or_default(),
            body: msg.body.clone().unwrap_or_default(),
            timestamp_ms: msg.timestamp_ms as f64,
        }
    }
}

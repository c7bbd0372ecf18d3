//! Classification signals for mobile-money notifications.
//!
//! Two independent signals, OR-combined. The sender signal is
//! high-precision but brittle across carriers; the body signal compensates
//! for sender-ID variance at the cost of occasional false positives. The
//! combination deliberately favors recall: a missed transaction is worse
//! than forwarding an occasional unrelated message, and the consumer can
//! filter again.
//!
//! # Invariants
//! - Sender matching is case-sensitive; body matching is case-insensitive.
//!   The asymmetry is inherited source behavior and covered by tests.
//! - Classification is pure and total: `None` fields simply fail to match.

use crate::model::message::SmsMessage;

/// Case-sensitive substrings that mark a mobile-money sender ID.
const SENDER_MARKERS: [&str; 2] = ["MPESA", "M-PESA"];

/// Substrings matched against the lowercased message body.
const BODY_MARKERS: [&str; 3] = ["ksh", "m-pesa", "confirmed"];

/// Returns whether the message is a mobile-money notification.
///
/// True when either signal fires:
/// 1. the sender contains `MPESA` or `M-PESA` (exact case), or
/// 2. the lowercased body contains `ksh`, `m-pesa`, or `confirmed`.
pub fn is_mobile_money(msg: &SmsMessage) -> bool {
    sender_signal(msg.sender.as_deref()) || body_signal(msg.body.as_deref())
}

fn sender_signal(sender: Option<&str>) -> bool {
    let Some(sender) = sender else {
        return false;
    };
    SENDER_MARKERS.iter().any(|marker| sender.contains(marker))
}

fn body_signal(body: Option<&str>) -> bool {
    let Some(body) = body else {
        return false;
    };
    let lowered = body.to_lowercase();
    BODY_MARKERS.iter().any(|marker| lowered.contains(marker))
}

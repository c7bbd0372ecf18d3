//! Core SMS ingestion pipeline for mobile-money notification tracking.
//! This crate owns classification and forwarding; the host owns transport,
//! permissions and consumption.

pub mod classify;
pub mod decode;
pub mod dispatch;
pub mod logging;
pub mod model;
pub mod parse;
pub mod sink;

pub use classify::rules::is_mobile_money;
pub use decode::fragment::decode;
pub use dispatch::receiver::SmsDispatcher;
pub use logging::{init_logging, logging_status};
pub use model::event::{TransactionNotification, SMS_EVENT_CHANNEL};
pub use model::message::{RawFragment, SmsMessage};
pub use parse::transaction::{
    classify_account_type, parse_sms, AccountType, ParsedTransaction, TransactionType,
};
pub use sink::forwarder::EventForwarder;
pub use sink::slot::{EventSink, SinkSlot};

/// Minimal health-check API for early host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! Transaction detail extraction from notification bodies.
//!
//! # Responsibility
//! - Turn a classified notification body into structured transaction data
//!   for the consumer (amount, counterparty, code, balance).
//! - Stay downstream of classification: parsing never influences whether a
//!   message is forwarded.

pub mod transaction;

//! Domain model for the SMS ingestion pipeline.
//!
//! # Responsibility
//! - Define the transport-facing and consumer-facing record shapes.
//! - Keep every value transient: nothing here outlives one inbound event.
//!
//! # Invariants
//! - A `TransactionNotification` is only ever built from a message that
//!   classified positive.
//! - Absent sender/body fields are represented as `None`, never as errors.

pub mod event;
pub mod message;

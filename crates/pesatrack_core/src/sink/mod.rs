//! Downstream event delivery.
//!
//! # Responsibility
//! - Define the sink contract the host application implements.
//! - Hold the single sink registration slot shared with the dispatcher.
//! - Forward classified messages best-effort, never blocking the pipeline.

pub mod forwarder;
pub mod slot;

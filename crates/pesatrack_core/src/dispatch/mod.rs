//! Inbound event dispatch.
//!
//! # Responsibility
//! - Own the decode -> classify -> forward sequencing per inbound event.
//! - Contain per-message failures so the transport callback never sees one.

pub mod receiver;

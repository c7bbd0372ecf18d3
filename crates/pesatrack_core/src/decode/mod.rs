//! Fragment-to-message decoding.
//!
//! # Responsibility
//! - Reassemble one logical message out of its ordered transport fragments.
//! - Absorb malformed transport data instead of surfacing errors.

pub mod fragment;

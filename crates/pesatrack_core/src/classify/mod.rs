//! Mobile-money message classification.
//!
//! # Responsibility
//! - Decide whether a decoded message is a mobile-money notification.
//! - Stay pure and total so the dispatcher can call it unconditionally.

pub mod rules;

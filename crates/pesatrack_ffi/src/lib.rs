//! Host-facing FFI surface for the SMS ingestion core.

pub mod api;

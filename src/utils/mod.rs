//! Shared utilities.
//!
//! - [`tracing`]: span helpers and error logging for services

pub mod tracing;

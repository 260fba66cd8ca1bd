//! # Timetable Core
//!
//! Core types shared by every Timetable crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use timetable_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Group ИС-21 not found"));
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};

//! Schedule data models and DTOs.
//!
//! The models live in the `timetable-models` crate so the CLI can share them;
//! this module re-exports the ones the schedule endpoints use.

pub use timetable_models::schedule::*;

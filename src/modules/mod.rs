//! Feature modules.
//!
//! Each module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: queries and business logic
//! - `model.rs`: DTOs (re-exported from `timetable-models`)
//! - `router.rs`: Axum routes

pub mod groups;
pub mod health;
pub mod schedule;

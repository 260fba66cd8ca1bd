//! Schedule module.
//!
//! Serves a group's lessons as a calendar: validate the range, resolve the
//! group, load its lesson rows, then fold them into days and lesson slots in
//! [`builder`].

pub mod builder;
pub mod controller;
pub mod format;
pub mod model;
pub mod router;
pub mod service;

pub use router::init_schedule_router;

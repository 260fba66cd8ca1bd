//! Groups module.
//!
//! Lists the student groups whose names the schedule endpoint accepts.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::init_groups_router;

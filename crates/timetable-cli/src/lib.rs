//! # Timetable CLI
//!
//! Database seeding utilities for Timetable development and demos.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use timetable_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(start, end).with_groups(12);
//! seed_all(&pool, &config).await?;
//! ```

pub mod seeder;

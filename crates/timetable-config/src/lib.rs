//! # Timetable Config
//!
//! Configuration types for the Timetable API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listener addresses for the API and the metrics exporter
//!
//! # Example
//!
//! ```ignore
//! use timetable_config::{CorsConfig, ServerConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use server::ServerConfig;

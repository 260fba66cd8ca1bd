//! # Timetable DB
//!
//! Database pool and utilities for the Timetable API.
//!
//! This crate provides database connection pool initialization using SQLx with
//! PostgreSQL. The schedule data is read-only from the API's point of view, so
//! the pool is the only database resource the server owns.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: `10`)
//!
//! # Example
//!
//! ```ignore
//! use timetable_db::{DatabaseConfig, init_db_pool};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await;
//!     // Use pool for database operations
//! }
//! ```

use std::env;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// Connection settings for the PostgreSQL pool.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Reads the configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is not set.
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Initializes a PostgreSQL connection pool.
///
/// # Panics
///
/// Panics if the connection to the database fails. This function should be
/// called once during application startup; the returned pool is cheaply
/// cloneable and is shared through the application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> PgPool {
    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to PostgreSQL"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .expect("Failed to connect to database")
}

/// Returns `true` when the database answers a trivial query.
pub async fn ping(db: &PgPool) -> bool {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(db)
        .await
        .is_ok()
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;

//! # Timetable Cache
//!
//! Caching for the Timetable API.
//!
//! Schedules change rarely and are read constantly, so this crate provides
//! two layers:
//!
//! - [`redis`]: a read-through Redis cache for built schedule responses
//! - [`middleware`]: HTTP caching (`Cache-Control`, `ETag` / `If-None-Match`)
//!
//! plus [`config`] (environment loading) and [`keys`] (key layout and bulk
//! invalidation).
//!
//! # Example
//!
//! ```ignore
//! use timetable_cache::{CacheConfig, RedisCache};
//!
//! let config = CacheConfig::from_env();
//! if let Some(url) = &config.redis_url {
//!     let cache = RedisCache::new(url, config.default_ttl()).await?;
//!     cache.set("key", &my_value).await?;
//!     let value: Option<MyType> = cache.get("key").await;
//! }
//! ```

pub mod config;
pub mod keys;
pub mod middleware;
pub mod redis;

pub use config::CacheConfig;
pub use keys::invalidate;
pub use middleware::{CacheControlConfig, cache_control, etag_middleware};
pub use redis::{CacheError, RedisCache};

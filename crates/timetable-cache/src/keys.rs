//! Cache key generation and invalidation utilities.
//!
//! Group names are free text (Cyrillic, spaces, punctuation), so they are
//! hashed before they become part of a key.

use std::fmt::Display;

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::RedisCache;

/// Prefix for all cache keys to avoid collisions with other Redis users.
const CACHE_PREFIX: &str = "timetable";

/// Builds a cache key with the standard prefix.
fn build_key(parts: &[&str]) -> String {
    format!("{}:{}", CACHE_PREFIX, parts.join(":"))
}

/// Short, key-safe digest of an arbitrary string.
fn digest(value: &str) -> String {
    let hash = Sha256::digest(value.as_bytes());
    hex::encode(&hash[..12])
}

/// Cache keys for built schedules.
pub mod schedule {
    use super::*;

    /// Key for one group's schedule over an inclusive date range.
    pub fn by_group_range(group_name: &str, start: impl Display, end: impl Display) -> String {
        build_key(&[
            "schedule",
            &digest(group_name),
            &start.to_string(),
            &end.to_string(),
        ])
    }

    /// Pattern matching every cached schedule.
    pub fn invalidation_pattern() -> String {
        format!("{}:schedule:*", CACHE_PREFIX)
    }
}

/// Cache invalidation helpers.
pub mod invalidate {
    use super::*;

    /// Drops every cached schedule.
    ///
    /// Call this after the underlying schedule data has been rewritten.
    pub async fn schedules(cache: Option<&RedisCache>) -> u64 {
        let Some(cache) = cache else { return 0 };

        match cache
            .invalidate_pattern(&schedule::invalidation_pattern())
            .await
        {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(error = %e, "Failed to invalidate schedule caches");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_key_layout() {
        let key = schedule::by_group_range("ИС-21", "2024-09-02", "2024-09-08");
        assert!(key.starts_with("timetable:schedule:"));
        assert!(key.ends_with(":2024-09-02:2024-09-08"));
        assert!(!key.contains("ИС-21"));
    }

    #[test]
    fn test_schedule_key_is_stable_and_group_sensitive() {
        let a = schedule::by_group_range("ИС-21", 1, 2);
        let b = schedule::by_group_range("ИС-21", 1, 2);
        let c = schedule::by_group_range("ис-21", 1, 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalidation_pattern_covers_keys() {
        let pattern = schedule::invalidation_pattern();
        let key = schedule::by_group_range("G", "a", "b");
        assert!(key.starts_with(pattern.trim_end_matches('*')));
    }

    #[tokio::test]
    async fn test_invalidate_without_cache_is_noop() {
        assert_eq!(invalidate::schedules(None).await, 0);
    }
}

use sqlx::PgPool;
use tracing::{info, warn};

use timetable_cache::{CacheConfig, RedisCache};
use timetable_config::CorsConfig;
use timetable_db::{DatabaseConfig, init_db_pool};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub cors_config: CorsConfig,
    pub cache_config: CacheConfig,
    /// `None` when `REDIS_URL` is unset or Redis was unreachable at startup.
    pub cache: Option<RedisCache>,
}

impl AppState {
    /// State backed by `db` with default CORS and no response cache.
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            cors_config: CorsConfig::default(),
            cache_config: CacheConfig::default(),
            cache: None,
        }
    }
}

pub async fn init_app_state() -> AppState {
    let cache_config = CacheConfig::from_env();
    let cache = connect_cache(&cache_config).await;

    AppState {
        db: init_db_pool(&DatabaseConfig::from_env()).await,
        cors_config: CorsConfig::from_env(),
        cache_config,
        cache,
    }
}

async fn connect_cache(config: &CacheConfig) -> Option<RedisCache> {
    let url = config.redis_url.as_deref()?;

    match RedisCache::new(url, config.default_ttl()).await {
        Ok(cache) => {
            info!(ttl_seconds = config.default_ttl_seconds, "Redis cache connected");
            Some(cache)
        }
        Err(e) => {
            warn!(error = %e, "Redis unavailable, serving without response cache");
            None
        }
    }
}

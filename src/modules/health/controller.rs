use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    pub database: bool,
    /// `None` when no Redis cache is configured.
    pub cache: Option<bool>,
    pub version: String,
}

/// Report whether the database (and the cache, if configured) respond
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = timetable_db::ping(&state.db).await;
    let cache = match &state.cache {
        Some(cache) => Some(cache.ping().await),
        None => None,
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if database && cache != Some(false) {
            "ok".into()
        } else {
            "degraded".into()
        },
        database,
        cache,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status, Json(response))
}

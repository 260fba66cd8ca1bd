use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use timetable_models::ScheduleByDateDto;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Whether `OBSERVABILITY_ENABLED` allows metrics and OTLP export. Defaults to on.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `None` when observability is disabled or the recorder could not
/// be installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
            ],
        )
        .and_then(|builder| {
            builder.set_buckets_for_metric(
                Matcher::Full("schedule_lessons_per_response".to_string()),
                &[0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0],
            )
        })
        .and_then(|builder| builder.install_recorder());

    let handle = match handle {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Prometheus recorder");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

/// Records count, latency and in-flight gauge for every request.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let uri_path = req.uri().path().to_owned();

    // Matched path keeps group names out of label values.
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or(uri_path);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status.to_string()).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    let status_category = match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };
    counter!("http_requests_by_status", "status_category" => status_category).increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router served on the metrics port.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

/// How one schedule request ended, used as the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Ok,
    Cached,
    InvalidRange,
    UnknownGroup,
    Error,
}

impl ScheduleOutcome {
    /// Maps a failed request to its outcome by the status it answers with.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidRange,
            StatusCode::NOT_FOUND => Self::UnknownGroup,
            _ => Self::Error,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Cached => "cached",
            Self::InvalidRange => "invalid_range",
            Self::UnknownGroup => "unknown_group",
            Self::Error => "error",
        }
    }
}

/// Counts every schedule request by how it ended.
pub fn track_schedule_outcome(outcome: ScheduleOutcome) {
    if !is_observability_enabled() {
        return;
    }
    counter!("schedules_built_total", "outcome" => outcome.as_str()).increment(1);
}

/// Count a freshly built calendar: its days and the lessons across them.
pub fn track_schedule_built(schedule: &[ScheduleByDateDto]) {
    if !is_observability_enabled() {
        return;
    }
    let lessons: usize = schedule.iter().map(|day| day.lessons.len()).sum();

    counter!("schedule_days_total").increment(schedule.len() as u64);
    counter!("schedule_lessons_total").increment(lessons as u64);
    histogram!("schedule_lessons_per_response").record(lessons as f64);
}

pub fn track_schedule_cache(hit: bool) {
    if !is_observability_enabled() {
        return;
    }
    let result = if hit { "hit" } else { "miss" };
    counter!("schedule_cache_lookups_total", "result" => result).increment(1);
}

//! Span helpers shared by the services.
//!
//! Database spans follow the OpenTelemetry semantic conventions so they line
//! up with the HTTP spans emitted by the logging middleware.

use tracing::Span;

/// Create a span for a database query.
///
/// # Example
/// ```ignore
/// sqlx::query(...)
///     .fetch_all(db)
///     .instrument(db_operation_span!("SELECT", "schedules", group.id = %id))
///     .await
/// ```
#[macro_export]
macro_rules! db_operation_span {
    ($operation:expr, $table:expr) => {
        tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = $operation,
            db.sql.table = $table,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty
        )
    };
    ($operation:expr, $table:expr, $($field:tt)*) => {
        tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = $operation,
            db.sql.table = $table,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Mark the current span as successful.
pub fn record_success() {
    Span::current().record("otel.status_code", "OK");
}

/// Mark the current span as failed.
pub fn record_error(message: &str) {
    let span = Span::current();
    span.record("otel.status_code", "ERROR");
    span.record("error.message", message);
}

/// Logs the error of a `Result` and passes it through unchanged.
pub trait ErrorExt {
    fn log_error(self, context: &str) -> Self;
}

impl<T, E: std::fmt::Display> ErrorExt for Result<T, E> {
    fn log_error(self, context: &str) -> Self {
        if let Err(ref e) = self {
            let message = e.to_string();
            record_error(&message);
            tracing::error!(error = %message, context = context, "Operation failed");
        }
        self
    }
}

use anyhow::Context;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use timetable::logging::{init_basic_console_logging, init_tracing, shutdown_tracer};
use timetable::metrics::{init_metrics, is_observability_enabled, metrics_app};
use timetable::router::init_router;
use timetable::state::init_app_state;
use timetable_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    if is_observability_enabled() {
        init_tracing();
    } else {
        init_basic_console_logging();
    }

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await;
    let app = init_router(state);

    if let Some(handle) = init_metrics() {
        let metrics_addr = server_config.metrics_addr();
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(&metrics_addr).await {
                Ok(listener) => {
                    info!(addr = %metrics_addr, "Metrics server listening");
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        error!(error = %e, "Metrics server stopped");
                    }
                }
                Err(e) => error!(addr = %metrics_addr, error = %e, "Failed to bind metrics server"),
            }
        });
    }

    let api_addr = server_config.api_addr();
    let listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind {}", api_addr))?;

    println!("🚀 Server running on http://{}", api_addr);
    println!("📚 Swagger UI available at http://{}/swagger-ui", api_addr);
    println!("📖 Scalar UI available at http://{}/scalar", api_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    shutdown_tracer().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

//! Truerand API server entry point.

use std::error::Error;
use std::sync::Arc;

use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use truerand_api::config::Config;
use truerand_api::state::AppState;
use truerand_api::{build_router, telemetry};
use truerand_core::clock::SystemClock;
use truerand_core::rate_limit::RateLimiter;
use truerand_entropy::device_entropy_source::DeviceEntropySource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = Config::from_env()?;

    // Initialize tracing subscriber.
    let _telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!(
        entropy_device = %config.entropy_device.display(),
        rate_per_second = config.rate_limit.rate_per_second(),
        burst = config.rate_limit.burst(),
        read_timeout = ?config.read_timeout,
        "Starting Truerand API server"
    );

    // Build application state. One limiter for the whole process.
    let limiter = Arc::new(RateLimiter::new(config.rate_limit, Arc::new(SystemClock)));
    let entropy_source = Arc::new(DeviceEntropySource::new(&config.entropy_device));
    let app_state = AppState::new(limiter, entropy_source, config.read_timeout);

    // Build router.
    let mut app = build_router(app_state);
    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "serving static assets");
        app = app.fallback_service(ServeDir::new(dir));
    }
    let app = app.layer(TraceLayer::new_for_http());

    // Start server.
    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

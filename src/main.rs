//! Cat vs Dog Classification API
//!
//! JSON inference service: accepts a multipart image upload on /predict and
//! returns the predicted label with its confidence.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use catdog::api::{create_rest_router, AppState};
use catdog::config::Config;
use catdog::service::ClassifierService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting Cat vs Dog API v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load(Config::default_path()).unwrap_or_else(|e| {
        info!("Using default config ({})", e);
        Config::default()
    });

    info!("Configuration loaded:");
    info!("  API port: {}", config.server.api_port);
    info!("  Model path: {}", config.model.path.display());
    info!("  Input size: {0}x{0}", config.model.input_size);

    // One-time model load; on failure the server still starts and every
    // prediction reports the model as not loaded.
    let service = Arc::new(ClassifierService::new(&config.model));

    let state = Arc::new(AppState {
        service,
        upload_dir: config.uploads.dir.clone(),
        start_time: Instant::now(),
        requests_served: AtomicU64::new(0),
    });

    let router = create_rest_router(state);

    let addr = format!("0.0.0.0:{}", config.server.api_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("API listening on http://{}", addr);
    info!(
        "Try: curl -F file=@photo.jpg http://localhost:{}/predict",
        config.server.api_port
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    info!("Shutdown signal received, stopping server gracefully");
}

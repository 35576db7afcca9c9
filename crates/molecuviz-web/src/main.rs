//! MolecuViz Web Server
//!
//! Run with: cargo run -p molecuviz-web

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use molecuviz_web::config::Config;
use molecuviz_web::router::build_router;
use molecuviz_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("molecuviz=debug,info")),
        )
        .init();

    info!("Starting MolecuViz Web Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().inspect_err(|e| {
        tracing::error!(subsystem = "config", "Configuration error: {e:#}");
    })?;

    let state = AppState::from_config(&config)?;
    {
        let backend = state.gateway.backend();
        info!(
            ai_service = backend.service_name(),
            deployment = backend.model_id(),
            store_capacity = state.store.capacity(),
            static_dir = %state.static_dir.display(),
            "Application state ready"
        );
    }

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.server.host, config.server.port))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("MolecuViz Web Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

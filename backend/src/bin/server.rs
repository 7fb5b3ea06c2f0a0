//! EduClass HTTP Server Binary
//!
//! This is the main entry point for the EduClass REST API server.
//! It connects the repository, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run against MongoDB (default)
//! MONGODB_URI=mongodb://localhost:27017 cargo run --bin educlass-server
//!
//! # Run with the in-memory repository, seeded from a file
//! REPOSITORY_TYPE=local LESSONS_SEED_FILE=lessons.json cargo run --bin educlass-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `MONGODB_URI`: MongoDB connection string (required for the mongo backend)
//! - `REPOSITORY_TYPE`: `mongo` or `local`
//! - `LESSONS_SEED_FILE`: JSON array of lessons for the local backend
//! - `IMAGES_DIR`: Directory served under `/images` (default: images)
//! - `BODY_LIMIT_BYTES`: Maximum request body size (default: 102400)
//! - `RUST_LOG`: Log filter (default: info)

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use educlass::config::ServerConfig;
use educlass::db::RepositoryFactory;
use educlass::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting EduClass HTTP Server");

    let config = ServerConfig::from_env()?;

    // No route may run without a store, so a failed connection ends the process here.
    let repository = match RepositoryFactory::from_env().await {
        Ok(repository) => repository,
        Err(e) => {
            error!(error = %e, "Failed to initialize repository");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!("Repository initialized successfully");

    let state = AppState::from_config(repository, &config);
    let app = create_router(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Images served from {}", config.images_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(ExitCode::SUCCESS)
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

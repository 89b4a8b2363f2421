//! Task API server (v1)
//!
//! A small CRUD service over a single `tasks` resource, built with Tokio and
//! Axum, persisting to a flat JSON file.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  TASK API                     │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│ routing  │───▶│handlers │  │
//!                    │  │ server  │    │  table   │    │  CRUD   │  │
//!                    │  └─────────┘    └──────────┘    └────┬────┘  │
//!                    │                                      │       │
//!                    │                                      ▼       │
//!   Client Response  │                               ┌──────────┐   │
//!   ◀────────────────┼───────────────────────────────│ storage  │   │
//!                    │                               │  engine  │───┼──▶ db.json
//!                    │                               └──────────┘   │
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns          │ │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                    │  │  │ config │ │observability│ │lifecycle│ │ │
//!                    │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tokio::net::TcpListener;

use task_api::config::{load_config, ApiConfig};
use task_api::http::HttpServer;
use task_api::lifecycle::Shutdown;
use task_api::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration: explicit path as first argument, defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => ApiConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("task-api v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_path = %config.storage.data_path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics endpoint
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

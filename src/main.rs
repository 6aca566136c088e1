//! Fraudboard — credit-card transaction fraud analysis dashboard.
//!
//! Serves an upload-then-browse workflow:
//! - CSV upload parsed into a session-scoped in-memory dataset
//! - per-dimension summary tables (hourly, daily, gender, age bracket,
//!   state, city population) recomputed on every request
//! - a fixed navigation surface the external rendering layer walks

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use api::{router, AppState};
use dashboard_core::limits::{DATASET_TTL_SECS, MAX_ACTIVE_DATASETS, MAX_UPLOAD_BYTES};
use telemetry::{health, init_tracing_from_env};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Upload size cap in bytes.
    #[serde(default = "default_max_upload_bytes")]
    max_upload_bytes: usize,

    /// Dataset time-to-live in seconds.
    #[serde(default = "default_dataset_ttl_secs")]
    dataset_ttl_secs: u64,

    /// Maximum datasets held in memory at once.
    #[serde(default = "default_max_datasets")]
    max_datasets: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    MAX_UPLOAD_BYTES
}

fn default_dataset_ttl_secs() -> u64 {
    DATASET_TTL_SECS
}

fn default_max_datasets() -> u64 {
    MAX_ACTIVE_DATASETS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            dataset_ttl_secs: default_dataset_ttl_secs(),
            max_datasets: default_max_datasets(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting Fraudboard v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    info!(
        max_upload_bytes = config.max_upload_bytes,
        dataset_ttl_secs = config.dataset_ttl_secs,
        max_datasets = config.max_datasets,
        "Loaded configuration"
    );

    // Create application state
    let state = AppState::with_limits(
        config.max_upload_bytes,
        Duration::from_secs(config.dataset_ttl_secs),
        config.max_datasets,
    );

    // The dataset store is in-process memory; it is healthy as soon as
    // it exists.
    health().dataset_store.set_healthy();

    // Create router
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("FRAUDBOARD")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}

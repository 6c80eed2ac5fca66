//! Motor Cover Registry - API Server Binary
//!
//! This binary performs the one-time deployment phase (seed the catalog and
//! discount table, open the registry) and then serves the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin registry-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 API_SEED_PATH=registry-seed.json cargo run --bin registry-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_SEED_PATH` - Registry seed document (default: registry-seed.json)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use anyhow::Context;
use domain_registry::{PolicyRegistry, RegistrySeed};
use interface_api::{config::ApiConfig, create_router, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, seeds the registry, and starts
/// the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The seed document is missing or invalid
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Motor Cover Registry API Server"
    );

    // One-time deployment phase: seed and open the registry
    let registry = seed_registry(&config.seed_path)?;

    // Create the API router
    let app = create_router(AppState::new(registry, config.clone()));

    // Parse server address
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("invalid server address")?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind server address")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to default values if environment variables are not set.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        // Fall back to individual env vars or defaults
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: std::env::var("API_JWT_SECRET")
                .unwrap_or_else(|_| "dev-secret-change-in-production".to_string()),
            jwt_expiration_secs: std::env::var("API_JWT_EXPIRATION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            seed_path: std::env::var("API_SEED_PATH")
                .unwrap_or_else(|_| "registry-seed.json".to_string()),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Runs the one-time setup phase from the seed document.
///
/// # Arguments
///
/// * `seed_path` - Path to the JSON seed document
///
/// # Returns
///
/// An open registry ready to accept registrations
///
/// # Errors
///
/// Returns an error if the document cannot be read, parsed, or validated
fn seed_registry(seed_path: &str) -> anyhow::Result<PolicyRegistry> {
    tracing::info!(%seed_path, "Seeding registry...");

    let raw = std::fs::read_to_string(seed_path)
        .with_context(|| format!("failed to read seed document {seed_path}"))?;
    let seed: RegistrySeed =
        serde_json::from_str(&raw).context("failed to parse seed document")?;

    let mut registry =
        PolicyRegistry::from_seed(&seed).context("seed document failed validation")?;

    let events = registry.take_events();
    tracing::info!(
        policy_count = registry.policy_count(),
        setup_events = events.len(),
        "Registry open for registration"
    );

    Ok(registry)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

//! HTTP API Layer
//!
//! This crate exposes the policy registry over REST using Axum, preserving
//! the call shapes of the original contract client: `policyCount`,
//! `policies(i)`, and `registerUser(policyIndex, discountTier)`.
//!
//! # Architecture
//!
//! - **Handlers**: policy reads, registration, health
//! - **Middleware**: authentication (caller identity), audit logging
//! - **DTOs**: request/response shapes with integer-unit string amounts
//! - **Error Handling**: stable machine-readable kinds in every response
//!
//! The registry lives behind a read-write lock: read handlers share a read
//! guard and observe a consistent snapshot; `registerUser` takes the write
//! guard, which serializes its read-check-append sequence.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(registry, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use domain_registry::PolicyRegistry;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{health, policy, registration};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RwLock<PolicyRegistry>>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wraps an initialized registry for serving
    pub fn new(registry: PolicyRegistry, config: ApiConfig) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared registry and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Policy catalog routes
    let policy_routes = Router::new()
        .route("/", get(policy::list_policies))
        .route("/count", get(policy::policy_count))
        .route("/:index", get(policy::get_policy))
        .route("/:index/deactivate", post(policy::deactivate_policy));

    // Registration routes; the caller account comes from the authenticated
    // identity, never from the payload
    let registration_routes = Router::new()
        .route("/", post(registration::register_user))
        .route("/", get(registration::list_registrations))
        .route("/:policy_index", get(registration::get_registration));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/policies", policy_routes)
        .nest("/registrations", registration_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

//! Policy catalog handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::auth::{roles, CallerIdentity};
use crate::dto::policy::{PolicyCountResponse, PolicyResponse};
use crate::error::ApiError;
use crate::AppState;

/// Lists every catalog entry, inactive ones included
pub async fn list_policies(State(state): State<AppState>) -> Json<Vec<PolicyResponse>> {
    let registry = state.registry.read().await;
    Json(registry.policies().map(PolicyResponse::from).collect())
}

/// Returns the number of policies ever added (`policyCount`)
pub async fn policy_count(State(state): State<AppState>) -> Json<PolicyCountResponse> {
    let registry = state.registry.read().await;
    Json(PolicyCountResponse {
        count: registry.policy_count(),
    })
}

/// Resolves an active policy by index (`policies(i)`)
pub async fn get_policy(
    State(state): State<AppState>,
    Path(index): Path<u64>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let registry = state.registry.read().await;
    let policy = registry.policy(index)?;
    Ok(Json(PolicyResponse::from(policy)))
}

/// Takes a policy off the market; admin role required
pub async fn deactivate_policy(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(index): Path<u64>,
) -> Result<Json<PolicyResponse>, ApiError> {
    if !caller.has_role(roles::ADMIN) {
        return Err(ApiError::Forbidden(
            "admin role required to deactivate a policy".to_string(),
        ));
    }

    let mut registry = state.registry.write().await;
    registry.deactivate_policy(index)?;
    let policy = registry
        .policies()
        .find(|p| p.index() == index)
        .ok_or_else(|| ApiError::Internal("deactivated policy vanished".to_string()))?;
    Ok(Json(PolicyResponse::from(policy)))
}

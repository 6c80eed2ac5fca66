//! Registration handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use domain_registry::DiscountTier;

use crate::auth::CallerIdentity;
use crate::dto::registration::{RegisterRequest, RegistrationResponse};
use crate::error::ApiError;
use crate::AppState;

/// Registers the caller for a policy (`registerUser(policyIndex, tier)`)
///
/// The write guard serializes the whole read-check-append sequence, so two
/// concurrent submissions for the same (account, policy) pair cannot both
/// succeed.
pub async fn register_user(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), ApiError> {
    let mut registry = state.registry.write().await;
    let registration = registry.register_user(
        caller.account,
        request.policy_index,
        DiscountTier::new(request.discount_tier),
    )?;
    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(&registration))))
}

/// Returns the caller's registration for a policy (`registrationOf`)
pub async fn get_registration(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(policy_index): Path<u64>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let registry = state.registry.read().await;
    let registration = registry.registration_of(caller.account, policy_index)?;
    Ok(Json(RegistrationResponse::from(registration)))
}

/// Lists every registration the caller holds, in append order
pub async fn list_registrations(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Json<Vec<RegistrationResponse>> {
    let registry = state.registry.read().await;
    Json(
        registry
            .registrations_for(caller.account)
            .into_iter()
            .map(RegistrationResponse::from)
            .collect(),
    )
}

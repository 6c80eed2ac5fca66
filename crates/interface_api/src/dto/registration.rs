//! Registration DTOs

use chrono::{DateTime, Utc};
use core_kernel::{AccountAddress, Amount};
use domain_registry::Registration;
use serde::{Deserialize, Serialize};

/// Body of `registerUser(policyIndex, discountTier)`
///
/// The caller's account is taken from the authenticated session, never from
/// the payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub policy_index: u64,
    pub discount_tier: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub id: String,
    pub account: AccountAddress,
    pub policy_index: u64,
    pub discount_tier: u8,
    pub effective_premium: Amount,
    pub sequence: u64,
    pub registered_at: DateTime<Utc>,
}

impl From<&Registration> for RegistrationResponse {
    fn from(registration: &Registration) -> Self {
        Self {
            id: registration.id.to_string(),
            account: registration.account,
            policy_index: registration.policy_index,
            discount_tier: registration.tier.value(),
            effective_premium: registration.effective_premium,
            sequence: registration.sequence,
            registered_at: registration.registered_at,
        }
    }
}

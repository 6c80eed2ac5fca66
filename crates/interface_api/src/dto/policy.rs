//! Policy DTOs
//!
//! Amounts are exchanged in the ledger's smallest indivisible unit, as
//! decimal strings of integers; formatting to a human-readable native unit
//! is the presentation layer's concern.

use core_kernel::Amount;
use domain_registry::Policy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct PolicyResponse {
    pub index: u64,
    pub base_premium: Amount,
    pub active: bool,
}

impl From<&Policy> for PolicyResponse {
    fn from(policy: &Policy) -> Self {
        Self {
            index: policy.index(),
            base_premium: policy.base_premium(),
            active: policy.is_active(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PolicyCountResponse {
    pub count: u64,
}

//! Domain events for the registry aggregate
//!
//! Events capture every successful state change, in the role the contract
//! event log plays on chain. They are used for:
//! - Audit trails
//! - Event-driven integrations
//! - Verifying mutation behavior in tests

use chrono::{DateTime, Utc};
use core_kernel::{AccountAddress, Amount, RegistrationId};
use serde::{Deserialize, Serialize};

use crate::discount::DiscountTier;

/// Domain events emitted by the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A policy offer was added to the catalog during setup
    PolicyAdded {
        policy_index: u64,
        base_premium: Amount,
        timestamp: DateTime<Utc>,
    },

    /// A policy offer was taken off the market
    PolicyDeactivated {
        policy_index: u64,
        timestamp: DateTime<Utc>,
    },

    /// The registry moved from Setup to Ready
    RegistryOpened {
        policy_count: u64,
        tier_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// An account registered for a policy
    UserRegistered {
        registration_id: RegistrationId,
        account: AccountAddress,
        policy_index: u64,
        tier: DiscountTier,
        effective_premium: Amount,
        timestamp: DateTime<Utc>,
    },
}

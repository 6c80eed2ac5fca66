//! Registration ledger
//!
//! The ordered, append-only record of registrations. Uniqueness of the
//! (account, policy index) pair is enforced here, at the single point where
//! records are written, so the check and the append cannot be interleaved by
//! callers.

use chrono::{DateTime, Utc};
use core_kernel::{AccountAddress, Amount, RegistrationId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::discount::DiscountTier;
use crate::error::RegistryError;

/// A record binding an account to a policy at an effective premium
///
/// Registrations are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Surrogate record id (time-ordered)
    pub id: RegistrationId,
    /// Registered account
    pub account: AccountAddress,
    /// Catalog index of the registered policy
    pub policy_index: u64,
    /// Discount tier applied
    pub tier: DiscountTier,
    /// Premium actually charged, after the discount
    pub effective_premium: Amount,
    /// Position in the ledger's append order
    pub sequence: u64,
    /// Wall-clock time of the append
    pub registered_at: DateTime<Utc>,
}

/// The append-only registration ledger
///
/// # Invariants
///
/// - No two entries share an (account, policy index) pair
/// - Sequence numbers are contiguous from 0 in append order
/// - Entries are never modified or removed
#[derive(Debug, Clone, Default)]
pub struct RegistrationLedger {
    entries: Vec<Registration>,
    by_pair: HashMap<(AccountAddress, u64), usize>,
}

impl RegistrationLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a registration
    ///
    /// This is the idempotence boundary: a retried call for a pair that
    /// already registered fails without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if the (account, policy index) pair
    /// already holds a registration.
    pub fn append(
        &mut self,
        account: AccountAddress,
        policy_index: u64,
        tier: DiscountTier,
        effective_premium: Amount,
    ) -> Result<&Registration, RegistryError> {
        if self.by_pair.contains_key(&(account, policy_index)) {
            return Err(RegistryError::AlreadyRegistered {
                account,
                policy_index,
            });
        }

        let position = self.entries.len();
        self.entries.push(Registration {
            id: RegistrationId::new(),
            account,
            policy_index,
            tier,
            effective_premium,
            sequence: position as u64,
            registered_at: Utc::now(),
        });
        self.by_pair.insert((account, policy_index), position);

        Ok(&self.entries[position])
    }

    /// Resolves the registration for an (account, policy index) pair
    pub fn get(&self, account: AccountAddress, policy_index: u64) -> Option<&Registration> {
        self.by_pair
            .get(&(account, policy_index))
            .map(|&pos| &self.entries[pos])
    }

    /// Returns true if the pair holds a registration
    pub fn contains(&self, account: AccountAddress, policy_index: u64) -> bool {
        self.by_pair.contains_key(&(account, policy_index))
    }

    /// All registrations held by an account, in append order
    pub fn for_account(&self, account: AccountAddress) -> Vec<&Registration> {
        self.entries
            .iter()
            .filter(|r| r.account == account)
            .collect()
    }

    /// Total number of registrations
    pub fn count(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Iterates all registrations in append order
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }
}

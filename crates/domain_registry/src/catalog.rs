//! Policy catalog
//!
//! The catalog is the list of insurance policy offers. Entries are created
//! only during the registry's setup phase and are never deleted; indices are
//! sequential from zero and never reused. Taking an offer off the market is
//! a deactivation, not a removal.

use core_kernel::Amount;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// An insurance policy offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    index: u64,
    base_premium: Amount,
    active: bool,
}

impl Policy {
    /// Returns the catalog index
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns the undiscounted premium
    pub fn base_premium(&self) -> Amount {
        self.base_premium
    }

    /// Returns true if the policy accepts registrations
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// The catalog of policy offers
///
/// # Invariants
///
/// - Indices are assigned sequentially from 0 and never reused
/// - Every base premium is strictly positive
/// - `count()` is monotonically non-decreasing
#[derive(Debug, Clone, Default)]
pub struct PolicyCatalog {
    policies: Vec<Policy>,
}

impl PolicyCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a policy offer and returns its index
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the base premium is zero.
    pub fn add(&mut self, base_premium: Amount) -> Result<u64, RegistryError> {
        if base_premium.is_zero() {
            return Err(RegistryError::InvalidAmount(
                "base premium must be greater than zero".to_string(),
            ));
        }

        let index = self.policies.len() as u64;
        self.policies.push(Policy {
            index,
            base_premium,
            active: true,
        });
        Ok(index)
    }

    /// Resolves an active policy by index
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` if the index is out of range or the policy
    /// has been deactivated.
    pub fn get(&self, index: u64) -> Result<&Policy, RegistryError> {
        self.policies
            .get(index as usize)
            .filter(|p| p.active)
            .ok_or(RegistryError::PolicyNotFound(index))
    }

    /// Resolves a policy by index regardless of its active flag
    pub fn get_any(&self, index: u64) -> Option<&Policy> {
        self.policies.get(index as usize)
    }

    /// Takes a policy off the market
    ///
    /// Idempotent for already-inactive policies.
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` if the index is out of range.
    pub fn deactivate(&mut self, index: u64) -> Result<(), RegistryError> {
        let policy = self
            .policies
            .get_mut(index as usize)
            .ok_or(RegistryError::PolicyNotFound(index))?;
        policy.active = false;
        Ok(())
    }

    /// Number of policies ever added
    pub fn count(&self) -> u64 {
        self.policies.len() as u64
    }

    /// Returns true if no policy has been added
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Iterates all policies in index order, inactive ones included
    pub fn iter(&self) -> impl Iterator<Item = &Policy> {
        self.policies.iter()
    }
}

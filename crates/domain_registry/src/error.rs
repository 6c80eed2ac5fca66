//! Registry domain errors
//!
//! Every failure carries a stable machine-readable kind alongside the
//! human-readable message, so callers across the request/response boundary
//! can branch on the kind and surface the message verbatim.

use core_kernel::{AccountAddress, AmountError};
use thiserror::Error;

use crate::discount::DiscountTier;

/// Errors that can occur in the registry domain
///
/// All variants are recoverable at the caller; the core never retries
/// internally and reports every failure synchronously from the operation
/// that detected it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A premium or other amount failed validation
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A discount rate failed validation
    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    /// The discount table configuration repeats a tier
    #[error("Duplicate discount tier: {0}")]
    DuplicateTier(DiscountTier),

    /// Policy index out of range or policy inactive
    #[error("Policy not found: index {0}")]
    PolicyNotFound(u64),

    /// Discount tier absent from the discount table
    #[error("Invalid discount tier: {0}")]
    InvalidDiscountTier(DiscountTier),

    /// The (account, policy) pair already holds a registration
    #[error("Account {account} is already registered for policy {policy_index}")]
    AlreadyRegistered {
        account: AccountAddress,
        policy_index: u64,
    },

    /// No registration exists for the (account, policy) pair
    #[error("No registration for account {account} on policy {policy_index}")]
    RegistrationNotFound {
        account: AccountAddress,
        policy_index: u64,
    },

    /// Mutating call before the registry was opened
    #[error("Registry is not initialized")]
    NotInitialized,

    /// Setup-phase call after the registry was opened
    #[error("Registry is already initialized")]
    AlreadyInitialized,
}

impl RegistryError {
    /// Stable machine-readable kind for the request/response boundary
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::InvalidAmount(_) => "invalid_amount",
            RegistryError::InvalidRate(_) => "invalid_rate",
            RegistryError::DuplicateTier(_) => "duplicate_tier",
            RegistryError::PolicyNotFound(_) => "policy_not_found",
            RegistryError::InvalidDiscountTier(_) => "invalid_discount_tier",
            RegistryError::AlreadyRegistered { .. } => "already_registered",
            RegistryError::RegistrationNotFound { .. } => "registration_not_found",
            RegistryError::NotInitialized => "not_initialized",
            RegistryError::AlreadyInitialized => "already_initialized",
        }
    }
}

impl From<AmountError> for RegistryError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::InvalidRate(msg) => RegistryError::InvalidRate(msg),
            other => RegistryError::InvalidAmount(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_stable() {
        assert_eq!(RegistryError::NotInitialized.kind(), "not_initialized");
        assert_eq!(RegistryError::PolicyNotFound(3).kind(), "policy_not_found");
        assert_eq!(
            RegistryError::InvalidDiscountTier(DiscountTier::new(7)).kind(),
            "invalid_discount_tier"
        );
    }

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = RegistryError::AlreadyRegistered {
            account: AccountAddress::ZERO,
            policy_index: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("policy 2"));
        assert!(msg.contains(&AccountAddress::ZERO.to_string()));
    }

    #[test]
    fn test_amount_errors_map_to_registry_kinds() {
        let amount_err: RegistryError = AmountError::Overflow.into();
        assert_eq!(amount_err.kind(), "invalid_amount");

        let rate_err: RegistryError = AmountError::InvalidRate("too big".into()).into();
        assert_eq!(rate_err.kind(), "invalid_rate");
    }
}

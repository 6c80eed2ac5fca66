//! Policy registry aggregate
//!
//! The registry is the consistency boundary for the whole core: it owns the
//! catalog, the discount table, and the registration ledger, and every
//! mutation goes through it.
//!
//! # Invariants
//!
//! - Registrations only reference active catalog policies and defined tiers
//! - An (account, policy index) pair registers at most once
//! - The effective premium never exceeds the base premium
//! - No registration is accepted before `open()`
//!
//! # Concurrency
//!
//! The aggregate is a synchronous state machine: queries take `&self`,
//! mutations take `&mut self`. A hosting layer that shares it behind a
//! read-write lock gets the required semantics for free: read guards see a
//! consistent snapshot and the write guard serializes the
//! read-check-append sequence of `register_user`, so two concurrent calls
//! for the same pair cannot both succeed.

use chrono::Utc;
use core_kernel::{AccountAddress, Amount};
use tracing::{debug, info, warn};

use crate::catalog::{Policy, PolicyCatalog};
use crate::discount::{DiscountTable, DiscountTier};
use crate::error::RegistryError;
use crate::events::RegistryEvent;
use crate::ledger::{Registration, RegistrationLedger};

/// Registry lifecycle phase
///
/// The transition is one-way: catalog population happens in `Setup`,
/// registration happens in `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryPhase {
    /// Privileged initialization: the catalog is being populated
    Setup,
    /// Open for registration; the catalog is sealed
    Ready,
}

/// The policy registry and premium accounting core
#[derive(Debug)]
pub struct PolicyRegistry {
    phase: RegistryPhase,
    catalog: PolicyCatalog,
    discounts: DiscountTable,
    ledger: RegistrationLedger,
    events: Vec<RegistryEvent>,
}

impl PolicyRegistry {
    /// Creates a registry in the Setup phase with a sealed discount table
    pub fn new(discounts: DiscountTable) -> Self {
        Self {
            phase: RegistryPhase::Setup,
            catalog: PolicyCatalog::new(),
            discounts,
            ledger: RegistrationLedger::new(),
            events: Vec::new(),
        }
    }

    /// Returns the current lifecycle phase
    pub fn phase(&self) -> RegistryPhase {
        self.phase
    }

    /// Returns true once `open()` has succeeded
    pub fn is_ready(&self) -> bool {
        self.phase == RegistryPhase::Ready
    }

    /// Adds a policy offer during the Setup phase
    ///
    /// # Errors
    ///
    /// - `AlreadyInitialized` if the registry has been opened
    /// - `InvalidAmount` if the base premium is zero
    pub fn add_policy(&mut self, base_premium: Amount) -> Result<u64, RegistryError> {
        if self.phase != RegistryPhase::Setup {
            return Err(RegistryError::AlreadyInitialized);
        }

        let policy_index = self.catalog.add(base_premium)?;
        debug!(policy_index, %base_premium, "policy added to catalog");
        self.events.push(RegistryEvent::PolicyAdded {
            policy_index,
            base_premium,
            timestamp: Utc::now(),
        });
        Ok(policy_index)
    }

    /// Seals the catalog and opens the registry for registration
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInitialized` if called twice.
    pub fn open(&mut self) -> Result<(), RegistryError> {
        if self.phase != RegistryPhase::Setup {
            return Err(RegistryError::AlreadyInitialized);
        }

        if self.catalog.is_empty() {
            warn!("registry opened with an empty catalog");
        }

        self.phase = RegistryPhase::Ready;
        info!(
            policy_count = self.catalog.count(),
            tier_count = self.discounts.len(),
            "registry open for registration"
        );
        self.events.push(RegistryEvent::RegistryOpened {
            policy_count: self.catalog.count(),
            tier_count: self.discounts.len(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Takes a policy off the market
    ///
    /// Existing registrations for the policy are unaffected; only new
    /// registrations are refused.
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` if the index was never assigned.
    pub fn deactivate_policy(&mut self, policy_index: u64) -> Result<(), RegistryError> {
        self.catalog.deactivate(policy_index)?;
        info!(policy_index, "policy deactivated");
        self.events.push(RegistryEvent::PolicyDeactivated {
            policy_index,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Registers an account for a policy at a discount tier
    ///
    /// The caller identity is an explicit argument; the core never reads it
    /// from ambient state. On success the appended registration is
    /// returned. On any failure the ledger is untouched.
    ///
    /// # Errors
    ///
    /// - `NotInitialized` before `open()`
    /// - `PolicyNotFound` if the index is out of range or inactive
    /// - `InvalidDiscountTier` if the tier is not in the discount table
    /// - `AlreadyRegistered` if the (account, policy) pair already holds a
    ///   registration
    pub fn register_user(
        &mut self,
        account: AccountAddress,
        policy_index: u64,
        tier: DiscountTier,
    ) -> Result<Registration, RegistryError> {
        if self.phase != RegistryPhase::Ready {
            return Err(RegistryError::NotInitialized);
        }

        let policy = self.catalog.get(policy_index)?;
        let rate = self
            .discounts
            .rate(tier)
            .ok_or(RegistryError::InvalidDiscountTier(tier))?;

        let effective_premium = rate.apply_to(policy.base_premium());

        // Uniqueness is checked where the write happens, so the check and
        // the append cannot be separated.
        let registration = self
            .ledger
            .append(account, policy_index, tier, effective_premium)?
            .clone();

        debug!(
            %account,
            policy_index,
            tier = tier.value(),
            %effective_premium,
            sequence = registration.sequence,
            "user registered"
        );
        self.events.push(RegistryEvent::UserRegistered {
            registration_id: registration.id,
            account,
            policy_index,
            tier,
            effective_premium,
            timestamp: registration.registered_at,
        });

        Ok(registration)
    }

    /// Number of policies ever added; monotonically non-decreasing
    pub fn policy_count(&self) -> u64 {
        self.catalog.count()
    }

    /// Resolves an active policy by index
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` if the index is out of range or the policy
    /// is inactive.
    pub fn policy(&self, policy_index: u64) -> Result<&Policy, RegistryError> {
        self.catalog.get(policy_index)
    }

    /// Iterates all catalog entries in index order, inactive ones included
    pub fn policies(&self) -> impl Iterator<Item = &Policy> {
        self.catalog.iter()
    }

    /// Resolves the registration for an (account, policy index) pair
    ///
    /// # Errors
    ///
    /// Returns `RegistrationNotFound` when the pair holds no registration.
    pub fn registration_of(
        &self,
        account: AccountAddress,
        policy_index: u64,
    ) -> Result<&Registration, RegistryError> {
        self.ledger
            .get(account, policy_index)
            .ok_or(RegistryError::RegistrationNotFound {
                account,
                policy_index,
            })
    }

    /// All registrations held by an account, in append order
    pub fn registrations_for(&self, account: AccountAddress) -> Vec<&Registration> {
        self.ledger.for_account(account)
    }

    /// Total number of registrations in the ledger
    pub fn registration_count(&self) -> u64 {
        self.ledger.count()
    }

    /// Drains the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::DiscountRate;
    use rust_decimal_macros::dec;

    fn table() -> DiscountTable {
        DiscountTable::from_entries([
            (DiscountTier::new(0), DiscountRate::zero()),
            (DiscountTier::new(1), DiscountRate::from_percent(dec!(10)).unwrap()),
        ])
        .unwrap()
    }

    fn account(byte: u8) -> AccountAddress {
        AccountAddress::from_bytes([byte; 20])
    }

    #[test]
    fn test_register_before_open_fails() {
        let mut registry = PolicyRegistry::new(table());
        registry.add_policy(Amount::from_units(1_000_000)).unwrap();

        let err = registry
            .register_user(account(1), 0, DiscountTier::new(0))
            .unwrap_err();
        assert_eq!(err, RegistryError::NotInitialized);
    }

    #[test]
    fn test_add_policy_after_open_fails() {
        let mut registry = PolicyRegistry::new(table());
        registry.add_policy(Amount::from_units(1_000_000)).unwrap();
        registry.open().unwrap();

        let err = registry.add_policy(Amount::from_units(500)).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyInitialized);
        assert_eq!(registry.policy_count(), 1);
    }

    #[test]
    fn test_open_twice_fails() {
        let mut registry = PolicyRegistry::new(table());
        registry.open().unwrap();
        assert_eq!(registry.open().unwrap_err(), RegistryError::AlreadyInitialized);
    }

    #[test]
    fn test_queries_work_during_setup() {
        let mut registry = PolicyRegistry::new(table());
        registry.add_policy(Amount::from_units(1_000_000)).unwrap();

        assert_eq!(registry.policy_count(), 1);
        assert!(registry.policy(0).is_ok());
        assert!(!registry.is_ready());
    }

    #[test]
    fn test_register_applies_tier_discount() {
        let mut registry = PolicyRegistry::new(table());
        registry.add_policy(Amount::from_units(1_000_000)).unwrap();
        registry.open().unwrap();

        let registration = registry
            .register_user(account(1), 0, DiscountTier::new(1))
            .unwrap();

        assert_eq!(registration.effective_premium.units(), 900_000);
        assert_eq!(registration.tier, DiscountTier::new(1));
        assert_eq!(registration.policy_index, 0);
        assert_eq!(registration.sequence, 0);
    }

    #[test]
    fn test_register_unknown_tier_leaves_no_partial_state() {
        let mut registry = PolicyRegistry::new(table());
        registry.add_policy(Amount::from_units(1_000_000)).unwrap();
        registry.open().unwrap();

        let err = registry
            .register_user(account(2), 0, DiscountTier::new(9))
            .unwrap_err();

        assert_eq!(err, RegistryError::InvalidDiscountTier(DiscountTier::new(9)));
        assert_eq!(registry.registration_count(), 0);
        assert!(registry.registration_of(account(2), 0).is_err());
    }

    #[test]
    fn test_register_on_deactivated_policy_fails() {
        let mut registry = PolicyRegistry::new(table());
        registry.add_policy(Amount::from_units(1_000_000)).unwrap();
        registry.open().unwrap();
        registry.deactivate_policy(0).unwrap();

        let err = registry
            .register_user(account(1), 0, DiscountTier::new(0))
            .unwrap_err();
        assert_eq!(err, RegistryError::PolicyNotFound(0));
    }

    #[test]
    fn test_deactivation_keeps_existing_registrations() {
        let mut registry = PolicyRegistry::new(table());
        registry.add_policy(Amount::from_units(1_000_000)).unwrap();
        registry.open().unwrap();
        registry
            .register_user(account(1), 0, DiscountTier::new(0))
            .unwrap();

        registry.deactivate_policy(0).unwrap();

        assert!(registry.registration_of(account(1), 0).is_ok());
        assert_eq!(registry.registration_count(), 1);
    }

    #[test]
    fn test_events_record_every_mutation() {
        let mut registry = PolicyRegistry::new(table());
        registry.add_policy(Amount::from_units(1_000_000)).unwrap();
        registry.open().unwrap();
        registry
            .register_user(account(1), 0, DiscountTier::new(1))
            .unwrap();

        let events = registry.take_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RegistryEvent::PolicyAdded { policy_index: 0, .. }));
        assert!(matches!(events[1], RegistryEvent::RegistryOpened { policy_count: 1, .. }));
        assert!(matches!(
            events[2],
            RegistryEvent::UserRegistered { policy_index: 0, .. }
        ));

        // drained
        assert!(registry.take_events().is_empty());
    }

    #[test]
    fn test_failed_register_emits_no_event() {
        let mut registry = PolicyRegistry::new(table());
        registry.add_policy(Amount::from_units(1_000_000)).unwrap();
        registry.open().unwrap();
        registry.take_events();

        let _ = registry.register_user(account(1), 5, DiscountTier::new(0));
        assert!(registry.take_events().is_empty());
    }
}

//! Test Data Builders
//!
//! Builder patterns for constructing test registries with sensible
//! defaults. Tests specify only the relevant pieces and take the reference
//! configuration for everything else.

use core_kernel::{Amount, DiscountRate};
use domain_registry::{DiscountTable, DiscountTier, PolicyRegistry};

/// Builder for a test registry
///
/// Defaults to the reference configuration: one policy at 1_000_000 units,
/// tier 0 at 0% and tier 1 at 10%, opened for registration.
pub struct TestRegistryBuilder {
    premiums: Vec<Amount>,
    tiers: Vec<(u8, u16)>,
    open: bool,
}

impl Default for TestRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRegistryBuilder {
    /// Creates a builder with the reference configuration
    pub fn new() -> Self {
        Self {
            premiums: vec![Amount::from_units(1_000_000)],
            tiers: vec![(0, 0), (1, 1_000)],
            open: true,
        }
    }

    /// Starts from an empty catalog
    pub fn without_policies(mut self) -> Self {
        self.premiums.clear();
        self
    }

    /// Adds a policy offer
    pub fn with_policy(mut self, base_premium: Amount) -> Self {
        self.premiums.push(base_premium);
        self
    }

    /// Starts from an empty discount table
    pub fn without_tiers(mut self) -> Self {
        self.tiers.clear();
        self
    }

    /// Adds a discount tier in basis points
    pub fn with_tier(mut self, tier: u8, basis_points: u16) -> Self {
        self.tiers.push((tier, basis_points));
        self
    }

    /// Leaves the registry in the Setup phase
    pub fn unopened(mut self) -> Self {
        self.open = false;
        self
    }

    /// Builds the registry
    ///
    /// # Panics
    ///
    /// Panics on invalid builder input; test configuration errors should
    /// fail loudly.
    pub fn build(self) -> PolicyRegistry {
        let table = DiscountTable::from_entries(self.tiers.into_iter().map(|(tier, bps)| {
            (
                DiscountTier::new(tier),
                DiscountRate::from_basis_points(bps).expect("valid test rate"),
            )
        }))
        .expect("valid test discount table");

        let mut registry = PolicyRegistry::new(table);
        for premium in self.premiums {
            registry.add_policy(premium).expect("valid test premium");
        }
        if self.open {
            registry.open().expect("fresh registry opens");
        }
        registry.take_events();
        registry
    }
}

//! Registry seed documents
//!
//! A seed is the validated initialization document the admin/deploy path
//! feeds to the registry: the policy offers for the catalog and the
//! no-claims-discount table. Building a registry from a seed performs the
//! whole one-time setup phase and returns it already open.

use core_kernel::{Amount, DiscountRate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discount::{DiscountTable, DiscountTier};
use crate::error::RegistryError;
use crate::registry::PolicyRegistry;

/// One catalog entry in a seed document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySeed {
    /// Base premium in smallest units
    pub base_premium: Amount,
}

/// One discount-table entry in a seed document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSeed {
    /// Tier bracket number
    pub tier: DiscountTier,
    /// Percentage reduction, in `[0, 100)`
    pub percent: Decimal,
}

/// The full initialization document
///
/// ```json
/// {
///   "policies": [{ "base_premium": "1000000" }],
///   "discount_tiers": [
///     { "tier": 0, "percent": 0 },
///     { "tier": 1, "percent": 10 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySeed {
    pub policies: Vec<PolicySeed>,
    pub discount_tiers: Vec<TierSeed>,
}

impl RegistrySeed {
    /// Builds the sealed discount table from the seed entries
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` for a percentage outside `[0, 100)` and
    /// `DuplicateTier` for a repeated tier.
    pub fn discount_table(&self) -> Result<DiscountTable, RegistryError> {
        let mut entries = Vec::with_capacity(self.discount_tiers.len());
        for tier_seed in &self.discount_tiers {
            let rate = DiscountRate::from_percent(tier_seed.percent)?;
            entries.push((tier_seed.tier, rate));
        }
        DiscountTable::from_entries(entries)
    }
}

impl PolicyRegistry {
    /// Runs the one-time setup phase from a seed and opens the registry
    ///
    /// # Errors
    ///
    /// Returns the first validation error in the seed; nothing is partially
    /// applied because the registry under construction is discarded.
    pub fn from_seed(seed: &RegistrySeed) -> Result<Self, RegistryError> {
        let mut registry = PolicyRegistry::new(seed.discount_table()?);
        for policy in &seed.policies {
            registry.add_policy(policy.base_premium)?;
        }
        registry.open()?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn seed_json() -> &'static str {
        r#"{
            "policies": [
                { "base_premium": "1000000" },
                { "base_premium": "2500000" }
            ],
            "discount_tiers": [
                { "tier": 0, "percent": 0 },
                { "tier": 1, "percent": 10 },
                { "tier": 2, "percent": "12.5" }
            ]
        }"#
    }

    #[test]
    fn test_seed_parses_from_json() {
        let seed: RegistrySeed = serde_json::from_str(seed_json()).unwrap();
        assert_eq!(seed.policies.len(), 2);
        assert_eq!(seed.discount_tiers.len(), 3);
        assert_eq!(seed.discount_tiers[2].percent, dec!(12.5));
    }

    #[test]
    fn test_registry_from_seed_is_open_and_populated() {
        let seed: RegistrySeed = serde_json::from_str(seed_json()).unwrap();
        let registry = PolicyRegistry::from_seed(&seed).unwrap();

        assert!(registry.is_ready());
        assert_eq!(registry.policy_count(), 2);
        assert_eq!(registry.policy(0).unwrap().base_premium().units(), 1_000_000);
        assert_eq!(registry.policy(1).unwrap().base_premium().units(), 2_500_000);
    }

    #[test]
    fn test_seed_rejects_out_of_range_percent() {
        let seed = RegistrySeed {
            policies: vec![],
            discount_tiers: vec![TierSeed {
                tier: DiscountTier::new(0),
                percent: dec!(100),
            }],
        };
        assert!(matches!(
            PolicyRegistry::from_seed(&seed),
            Err(RegistryError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_seed_rejects_duplicate_tier() {
        let seed = RegistrySeed {
            policies: vec![],
            discount_tiers: vec![
                TierSeed { tier: DiscountTier::new(1), percent: dec!(5) },
                TierSeed { tier: DiscountTier::new(1), percent: dec!(10) },
            ],
        };
        assert_eq!(
            PolicyRegistry::from_seed(&seed).unwrap_err(),
            RegistryError::DuplicateTier(DiscountTier::new(1))
        );
    }

    #[test]
    fn test_seed_rejects_zero_premium() {
        let seed = RegistrySeed {
            policies: vec![PolicySeed { base_premium: Amount::zero() }],
            discount_tiers: vec![],
        };
        assert!(matches!(
            PolicyRegistry::from_seed(&seed),
            Err(RegistryError::InvalidAmount(_))
        ));
    }
}

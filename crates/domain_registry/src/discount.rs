//! No-claims discount table
//!
//! Maps a no-claims-discount tier to a percentage reduction of the base
//! premium. The table is built once from validated entries and exposes no
//! mutation afterwards. The tier-to-percentage mapping is configuration, not
//! discovered fact: tier 0 is conventionally 0%, but the table does not
//! require it.

use core_kernel::DiscountRate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::RegistryError;

/// A no-claims-discount bracket
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DiscountTier(u8);

impl DiscountTier {
    /// Creates a tier from its bracket number
    pub const fn new(tier: u8) -> Self {
        Self(tier)
    }

    /// Returns the bracket number
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DiscountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.0)
    }
}

impl From<u8> for DiscountTier {
    fn from(tier: u8) -> Self {
        Self(tier)
    }
}

/// The fixed tier-to-rate mapping
///
/// Sealed at construction; lookups for unknown tiers fail, they are never
/// defaulted.
#[derive(Debug, Clone, Default)]
pub struct DiscountTable {
    rates: BTreeMap<DiscountTier, DiscountRate>,
}

impl DiscountTable {
    /// Builds a table from (tier, rate) entries
    ///
    /// Rates arrive already validated by [`DiscountRate`] construction, so
    /// the only rejection here is a repeated tier.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTier` if a tier appears more than once.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (DiscountTier, DiscountRate)>,
    ) -> Result<Self, RegistryError> {
        let mut rates = BTreeMap::new();
        for (tier, rate) in entries {
            if rates.insert(tier, rate).is_some() {
                return Err(RegistryError::DuplicateTier(tier));
            }
        }
        Ok(Self { rates })
    }

    /// Looks up the rate for a tier
    pub fn rate(&self, tier: DiscountTier) -> Option<DiscountRate> {
        self.rates.get(&tier).copied()
    }

    /// Returns true if the tier is defined
    pub fn contains(&self, tier: DiscountTier) -> bool {
        self.rates.contains_key(&tier)
    }

    /// Number of defined tiers
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no tier is defined
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterates (tier, rate) pairs in tier order
    pub fn iter(&self) -> impl Iterator<Item = (DiscountTier, DiscountRate)> + '_ {
        self.rates.iter().map(|(t, r)| (*t, *r))
    }
}

//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the registry test suite. Fixtures are
//! consistent and predictable: the reference seed matches the documented
//! registration scenario (one policy at 1_000_000 units, tier 0 at 0%,
//! tier 1 at 10%).

use core_kernel::{AccountAddress, Amount};
use domain_registry::RegistrySeed;
use once_cell::sync::Lazy;

static REFERENCE_SEED: Lazy<RegistrySeed> = Lazy::new(|| {
    serde_json::from_str(
        r#"{
            "policies": [{ "base_premium": "1000000" }],
            "discount_tiers": [
                { "tier": 0, "percent": 0 },
                { "tier": 1, "percent": 10 }
            ]
        }"#,
    )
    .expect("reference seed is valid")
});

/// Fixture for Amount test data
pub struct AmountFixtures;

impl AmountFixtures {
    /// The reference base premium (1_000_000 smallest units)
    pub fn base_premium() -> Amount {
        Amount::from_units(1_000_000)
    }

    /// The reference premium after the 10% tier-1 discount
    pub fn discounted_premium() -> Amount {
        Amount::from_units(900_000)
    }

    /// A premium large enough to exercise wide integer paths
    pub fn large_premium() -> Amount {
        Amount::from_units(u128::from(u64::MAX) + 1)
    }
}

/// Fixture for account addresses
pub struct AddressFixtures;

impl AddressFixtures {
    /// The contract address from the original deployment, reused as a
    /// stable test account
    pub fn account_x() -> AccountAddress {
        "0xcf7ed3acca5a467e9e704c703e8d87f634fb0fc9"
            .parse()
            .expect("valid fixture address")
    }

    /// A second stable account
    pub fn account_y() -> AccountAddress {
        "0x1111111111111111111111111111111111111111"
            .parse()
            .expect("valid fixture address")
    }

    /// A numbered account for bulk scenarios
    pub fn numbered(byte: u8) -> AccountAddress {
        AccountAddress::from_bytes([byte; 20])
    }
}

/// Fixture for registry seed documents
pub struct SeedFixtures;

impl SeedFixtures {
    /// The reference scenario seed
    pub fn reference() -> RegistrySeed {
        REFERENCE_SEED.clone()
    }
}

//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use core_kernel::{AccountAddress, Amount, DiscountRate};
use domain_registry::DiscountTier;
use proptest::prelude::*;

/// Strategy for positive premium amounts in smallest units
pub fn positive_units_strategy() -> impl Strategy<Value = u128> {
    1u128..1_000_000_000_000u128
}

/// Strategy for valid positive amounts
pub fn positive_amount_strategy() -> impl Strategy<Value = Amount> {
    positive_units_strategy().prop_map(Amount::from_units)
}

/// Strategy for valid discount rates in `[0%, 100%)`
pub fn discount_rate_strategy() -> impl Strategy<Value = DiscountRate> {
    (0u16..10_000u16).prop_map(|bps| {
        DiscountRate::from_basis_points(bps).expect("strategy stays in range")
    })
}

/// Strategy for discount tiers
pub fn tier_strategy() -> impl Strategy<Value = DiscountTier> {
    any::<u8>().prop_map(DiscountTier::new)
}

/// Strategy for account addresses
pub fn address_strategy() -> impl Strategy<Value = AccountAddress> {
    proptest::array::uniform20(any::<u8>()).prop_map(AccountAddress::from_bytes)
}

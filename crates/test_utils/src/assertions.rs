//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful error
//! messages than standard assertions.

use core_kernel::AccountAddress;
use domain_registry::{PolicyRegistry, Registration, RegistryError};

/// Asserts that a result failed with the given stable error kind
///
/// # Panics
///
/// Panics if the result is `Ok` or the kind differs.
pub fn assert_error_kind<T: std::fmt::Debug>(
    result: Result<T, RegistryError>,
    expected_kind: &str,
) {
    match result {
        Ok(value) => panic!("expected `{expected_kind}` error, got Ok({value:?})"),
        Err(err) => assert_eq!(
            err.kind(),
            expected_kind,
            "expected `{expected_kind}`, got `{}`: {err}",
            err.kind()
        ),
    }
}

/// Asserts that a registration binds the expected pair at the expected
/// effective premium
pub fn assert_registration(
    registration: &Registration,
    account: AccountAddress,
    policy_index: u64,
    effective_units: u128,
) {
    assert_eq!(registration.account, account, "registration account");
    assert_eq!(registration.policy_index, policy_index, "registration policy");
    assert_eq!(
        registration.effective_premium.units(),
        effective_units,
        "effective premium for {account} on policy {policy_index}"
    );
}

/// Asserts that the ledger holds exactly one registration for the pair
pub fn assert_registered_once(
    registry: &PolicyRegistry,
    account: AccountAddress,
    policy_index: u64,
) {
    assert!(
        registry.registration_of(account, policy_index).is_ok(),
        "expected a registration for {account} on policy {policy_index}"
    );
    let held = registry
        .registrations_for(account)
        .iter()
        .filter(|r| r.policy_index == policy_index)
        .count();
    assert_eq!(held, 1, "duplicate registrations for {account} on policy {policy_index}");
}

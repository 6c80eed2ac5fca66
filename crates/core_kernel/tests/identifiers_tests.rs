//! Identifier integration tests

use core_kernel::{AccountAddress, AddressError, RegistrationId};

#[test]
fn address_parse_display_round_trip() {
    let raw = "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9";
    let addr: AccountAddress = raw.parse().unwrap();
    assert_eq!(addr.to_string(), raw.to_lowercase());
}

#[test]
fn address_is_usable_as_map_key() {
    use std::collections::HashMap;

    let a: AccountAddress = "0x1111111111111111111111111111111111111111".parse().unwrap();
    let b: AccountAddress = "0x2222222222222222222222222222222222222222".parse().unwrap();

    let mut map = HashMap::new();
    map.insert(a, 1u64);
    map.insert(b, 2u64);
    assert_eq!(map[&a], 1);
    assert_eq!(map[&b], 2);
}

#[test]
fn address_length_errors_report_digit_count() {
    let err = "0xabc".parse::<AccountAddress>().unwrap_err();
    assert_eq!(err, AddressError::InvalidLength(3));
}

#[test]
fn registration_id_parses_with_and_without_prefix() {
    let id = RegistrationId::new();
    let with_prefix: RegistrationId = id.to_string().parse().unwrap();
    let bare: RegistrationId = id.as_uuid().to_string().parse().unwrap();
    assert_eq!(id, with_prefix);
    assert_eq!(id, bare);
}

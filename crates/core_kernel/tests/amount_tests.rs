//! Amount and DiscountRate integration tests
//!
//! Exercises the public kernel surface the way domain code consumes it:
//! integer-unit amounts, basis-point rates, and the half-down rounding rule
//! for premium reduction.

use core_kernel::{Amount, AmountError, DiscountRate};
use rust_decimal_macros::dec;

mod amount_tests {
    use super::*;

    #[test]
    fn native_conversion_matches_wei_scale() {
        let one = Amount::from_native(dec!(1)).unwrap();
        assert_eq!(one.units(), 1_000_000_000_000_000_000);

        let half = Amount::from_native(dec!(0.5)).unwrap();
        assert_eq!(half.units(), 500_000_000_000_000_000);
    }

    #[test]
    fn display_round_trips_through_native_form() {
        let premium = Amount::from_native(dec!(0.025)).unwrap();
        assert_eq!(premium.to_string(), "0.025");
    }

    #[test]
    fn checked_arithmetic_reports_bounds() {
        let a = Amount::from_units(10);
        let b = Amount::from_units(20);

        assert_eq!(a.checked_add(b).unwrap().units(), 30);
        assert_eq!(a.checked_sub(b), Err(AmountError::Underflow));
    }

    #[test]
    fn json_wire_format_is_integer_unit_string() {
        let premium = Amount::from_units(900_000);
        assert_eq!(serde_json::to_string(&premium).unwrap(), "\"900000\"");
    }
}

mod rate_tests {
    use super::*;

    #[test]
    fn spec_scenario_ten_percent_off_one_million() {
        let base = Amount::from_units(1_000_000);
        let tier_one = DiscountRate::from_percent(dec!(10)).unwrap();

        assert_eq!(tier_one.apply_to(base).units(), 900_000);
    }

    #[test]
    fn zero_rate_is_identity() {
        let base = Amount::from_units(123_456_789);
        assert_eq!(DiscountRate::zero().apply_to(base), base);
        assert!(DiscountRate::zero().discount_on(base).is_zero());
    }

    #[test]
    fn effective_plus_discount_reconstructs_base() {
        let base = Amount::from_units(999_999_999);
        let rate = DiscountRate::from_basis_points(3_333).unwrap();

        let effective = rate.apply_to(base);
        let discount = rate.discount_on(base);
        assert_eq!(effective + discount, base);
    }

    #[test]
    fn rate_table_bounds_are_enforced() {
        assert!(DiscountRate::from_percent(dec!(99.99)).is_ok());
        assert!(DiscountRate::from_percent(dec!(100)).is_err());
    }
}

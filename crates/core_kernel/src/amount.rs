//! Ledger amounts and discount rates
//!
//! This module provides a type-safe representation of monetary values in the
//! ledger's smallest indivisible unit. All premium arithmetic is exact
//! integer arithmetic; decimal conversion happens only at the presentation
//! boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Number of decimal places between the smallest unit and the native
/// display unit (wei-style fixed point).
pub const NATIVE_DECIMALS: u32 = 18;

/// Basis points in one whole (100%).
const BPS_SCALE: u128 = 10_000;

/// Errors that can occur during amount operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Overflow during calculation")]
    Overflow,

    #[error("Underflow during calculation")]
    Underflow,
}

/// A monetary value in the ledger's smallest indivisible unit
///
/// Amounts are unsigned integers; the ledger never represents negative
/// value. Arithmetic is checked, and the `Add`/`Sub` operator impls panic
/// on overflow the same way the checked constructors would report it, so
/// non-test code should prefer `checked_add`/`checked_sub`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    units: u128,
}

impl Amount {
    /// Creates an amount from a count of smallest units
    pub const fn from_units(units: u128) -> Self {
        Self { units }
    }

    /// The zero amount
    pub const fn zero() -> Self {
        Self { units: 0 }
    }

    /// Creates an amount from a decimal value in native units
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative, does not scale to a whole
    /// number of smallest units, or overflows the scaled representation.
    pub fn from_native(native: Decimal) -> Result<Self, AmountError> {
        if native.is_sign_negative() {
            return Err(AmountError::InvalidAmount(format!(
                "native value must not be negative: {native}"
            )));
        }

        let scale = Decimal::from(10u64.pow(NATIVE_DECIMALS / 2));
        // Scale in two steps: 10^18 itself exceeds Decimal's preferred range
        // for intermediate products of large inputs.
        let scaled = native
            .checked_mul(scale)
            .and_then(|d| d.checked_mul(scale))
            .ok_or(AmountError::Overflow)?;

        if scaled.fract() != Decimal::ZERO {
            return Err(AmountError::InvalidAmount(format!(
                "native value has sub-unit precision: {native}"
            )));
        }

        scaled
            .to_u128()
            .map(Self::from_units)
            .ok_or(AmountError::Overflow)
    }

    /// Returns the amount as a count of smallest units
    pub const fn units(&self) -> u128 {
        self.units
    }

    /// Returns true if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: Amount) -> Result<Amount, AmountError> {
        self.units
            .checked_add(other.units)
            .map(Amount::from_units)
            .ok_or(AmountError::Overflow)
    }

    /// Checked subtraction; underflows instead of going negative
    pub fn checked_sub(&self, other: Amount) -> Result<Amount, AmountError> {
        self.units
            .checked_sub(other.units)
            .map(Amount::from_units)
            .ok_or(AmountError::Underflow)
    }
}

impl fmt::Display for Amount {
    /// Formats the amount in native units with trailing zeros trimmed
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = 10u128.pow(NATIVE_DECIMALS);
        let whole = self.units / scale;
        let frac = self.units % scale;

        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{frac:0width$}", width = NATIVE_DECIMALS as usize);
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(other).expect("Overflow in Amount::add")
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(other).expect("Underflow in Amount::sub")
    }
}

// Amounts cross the API boundary as decimal strings of integer smallest
// units: u128 does not survive a round-trip through JSON numbers.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.units.to_string())
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer count of smallest units, as a string or number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Amount, E> {
        value
            .parse::<u128>()
            .map(Amount::from_units)
            .map_err(|_| E::custom(format!("invalid amount: {value}")))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
        Ok(Amount::from_units(value as u128))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// A no-claims discount rate in `[0%, 100%)`
///
/// Rates are held in basis points so that applying a rate to an [`Amount`]
/// stays in exact integer arithmetic. The excluded upper bound means a
/// discount can never zero out a premium by rounding alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct DiscountRate {
    basis_points: u16,
}

impl TryFrom<u16> for DiscountRate {
    type Error = AmountError;

    fn try_from(basis_points: u16) -> Result<Self, Self::Error> {
        Self::from_basis_points(basis_points)
    }
}

impl From<DiscountRate> for u16 {
    fn from(rate: DiscountRate) -> u16 {
        rate.basis_points
    }
}

impl DiscountRate {
    /// Creates a rate from basis points (1 bps = 0.01%)
    ///
    /// # Errors
    ///
    /// Returns an error unless `basis_points < 10_000`.
    pub fn from_basis_points(basis_points: u16) -> Result<Self, AmountError> {
        if u128::from(basis_points) >= BPS_SCALE {
            return Err(AmountError::InvalidRate(format!(
                "rate must be below 100%: {basis_points} bps"
            )));
        }
        Ok(Self { basis_points })
    }

    /// Creates a rate from a percentage (e.g., `dec!(10)` for 10%)
    ///
    /// # Errors
    ///
    /// Returns an error if the percentage is outside `[0, 100)` or finer
    /// than 0.01%.
    pub fn from_percent(percent: Decimal) -> Result<Self, AmountError> {
        let bps = percent * Decimal::from(100u32);
        if bps.fract() != Decimal::ZERO {
            return Err(AmountError::InvalidRate(format!(
                "rate resolution is 0.01%: {percent}%"
            )));
        }
        let bps = bps
            .to_u16()
            .ok_or_else(|| AmountError::InvalidRate(format!("rate out of range: {percent}%")))?;
        Self::from_basis_points(bps)
    }

    /// The zero rate (no discount)
    pub const fn zero() -> Self {
        Self { basis_points: 0 }
    }

    /// Returns the rate in basis points
    pub const fn basis_points(&self) -> u16 {
        self.basis_points
    }

    /// Returns the rate as a percentage
    pub fn as_percent(&self) -> Decimal {
        Decimal::new(i64::from(self.basis_points), 2)
    }

    /// Returns true if the rate is zero
    pub const fn is_zero(&self) -> bool {
        self.basis_points == 0
    }

    /// Applies the discount to a base amount, rounding half-down to the
    /// smallest unit
    ///
    /// The result is always in `[0, base]`; exact halves round toward the
    /// smaller discounted value.
    pub fn apply_to(&self, base: Amount) -> Amount {
        let keep = BPS_SCALE - u128::from(self.basis_points);
        // Split the base so base * keep cannot overflow u128:
        // base = q * BPS_SCALE + r, so base * keep / BPS_SCALE
        //      = q * keep + r * keep / BPS_SCALE.
        let q = base.units() / BPS_SCALE;
        let r = base.units() % BPS_SCALE;
        Amount::from_units(q * keep + half_down(r * keep, BPS_SCALE))
    }

    /// Returns the discount portion of a base amount
    pub fn discount_on(&self, base: Amount) -> Amount {
        base - self.apply_to(base)
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent().normalize())
    }
}

/// Integer division rounding half-down: an exact half remainder truncates,
/// anything greater rounds up.
fn half_down(n: u128, d: u128) -> u128 {
    let q = n / d;
    let r = n % d;
    if r * 2 > d {
        q + 1
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_creation() {
        let a = Amount::from_units(1_000_000);
        assert_eq!(a.units(), 1_000_000);
        assert!(!a.is_zero());
        assert!(Amount::zero().is_zero());
    }

    #[test]
    fn test_amount_from_native() {
        let a = Amount::from_native(dec!(1.5)).unwrap();
        assert_eq!(a.units(), 1_500_000_000_000_000_000);

        let zero = Amount::from_native(dec!(0)).unwrap();
        assert!(zero.is_zero());
    }

    #[test]
    fn test_amount_from_native_rejects_negative() {
        let result = Amount::from_native(dec!(-1));
        assert!(matches!(result, Err(AmountError::InvalidAmount(_))));
    }

    #[test]
    fn test_amount_arithmetic() {
        let a = Amount::from_units(100);
        let b = Amount::from_units(40);

        assert_eq!((a + b).units(), 140);
        assert_eq!((a - b).units(), 60);
        assert_eq!(
            b.checked_sub(a),
            Err(AmountError::Underflow),
            "ledger amounts never go negative"
        );
        assert_eq!(
            Amount::from_units(u128::MAX).checked_add(Amount::from_units(1)),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_amount_display_native_units() {
        assert_eq!(Amount::from_units(10u128.pow(18)).to_string(), "1");
        assert_eq!(
            Amount::from_units(1_500_000_000_000_000_000).to_string(),
            "1.5"
        );
        assert_eq!(Amount::from_units(1).to_string(), "0.000000000000000001");
        assert_eq!(Amount::zero().to_string(), "0");
    }

    #[test]
    fn test_amount_serde_round_trip() {
        let a = Amount::from_units(u128::from(u64::MAX) + 1);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "\"18446744073709551616\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);

        // Small amounts may arrive as plain JSON numbers
        let from_number: Amount = serde_json::from_str("900000").unwrap();
        assert_eq!(from_number.units(), 900_000);
    }

    #[test]
    fn test_rate_bounds() {
        assert!(DiscountRate::from_basis_points(0).is_ok());
        assert!(DiscountRate::from_basis_points(9_999).is_ok());
        assert!(matches!(
            DiscountRate::from_basis_points(10_000),
            Err(AmountError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_rate_from_percent() {
        let rate = DiscountRate::from_percent(dec!(10)).unwrap();
        assert_eq!(rate.basis_points(), 1_000);
        assert_eq!(rate.as_percent(), dec!(10.00));

        assert!(DiscountRate::from_percent(dec!(100)).is_err());
        assert!(DiscountRate::from_percent(dec!(-1)).is_err());
        assert!(
            DiscountRate::from_percent(dec!(12.345)).is_err(),
            "finer than 0.01% is rejected"
        );
    }

    #[test]
    fn test_rate_application() {
        let base = Amount::from_units(1_000_000);
        let ten_percent = DiscountRate::from_percent(dec!(10)).unwrap();

        assert_eq!(ten_percent.apply_to(base).units(), 900_000);
        assert_eq!(ten_percent.discount_on(base).units(), 100_000);
        assert_eq!(DiscountRate::zero().apply_to(base), base);
    }

    #[test]
    fn test_rate_rounds_half_down() {
        // 15 units at 25% off keeps 11.25 -> 11
        let rate = DiscountRate::from_percent(dec!(25)).unwrap();
        assert_eq!(rate.apply_to(Amount::from_units(15)).units(), 11);

        // 2 units at 25% off keeps 1.5 exactly -> half rounds down to 1
        assert_eq!(rate.apply_to(Amount::from_units(2)).units(), 1);

        // 2 units at 24.99% off keeps 1.5002 -> rounds up to 2
        let just_under = DiscountRate::from_basis_points(2_499).unwrap();
        assert_eq!(just_under.apply_to(Amount::from_units(2)).units(), 2);
    }

    #[test]
    fn test_rate_display() {
        let rate = DiscountRate::from_basis_points(1_250).unwrap();
        assert_eq!(rate.to_string(), "12.5%");
        assert_eq!(DiscountRate::zero().to_string(), "0%");
    }
}

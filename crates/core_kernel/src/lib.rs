//! Core Kernel - Foundational types for the motor cover registry
//!
//! This crate provides the fundamental building blocks used across the
//! registry domain and interface layers:
//! - Ledger amounts in the smallest indivisible currency unit
//! - Discount rates with exact basis-point arithmetic
//! - Account identity and record identifiers

pub mod amount;
pub mod identifiers;

pub use amount::{Amount, AmountError, DiscountRate, NATIVE_DECIMALS};
pub use identifiers::{AccountAddress, AddressError, RegistrationId};

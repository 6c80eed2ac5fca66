//! Account identity and record identifiers
//!
//! Accounts are identified by their 20-byte ledger address, exchanged as
//! `0x`-prefixed hex. Registration records additionally carry a
//! time-ordered surrogate id for audit trails; record uniqueness is always
//! the (account, policy index) pair, never the surrogate.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur parsing an account address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid address length: expected 40 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("Invalid hex digit in address")]
    InvalidHex,
}

/// A 20-byte account address
///
/// The caller identity supplied by the transport layer. Parsing accepts
/// mixed-case hex with or without the `0x` prefix; display is always
/// lowercase `0x`-prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; 20]);

impl AccountAddress {
    /// The all-zero address
    pub const ZERO: AccountAddress = AccountAddress([0u8; 20]);

    /// Creates an address from raw bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the raw address bytes
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for AccountAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if hex.len() != 40 {
            return Err(AddressError::InvalidLength(hex.len()));
        }

        let mut bytes = [0u8; 20];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| AddressError::InvalidHex)?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| AddressError::InvalidHex)?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct AddressVisitor;

impl Visitor<'_> for AddressVisitor {
    type Value = AccountAddress;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a 0x-prefixed 40-digit hex account address")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<AccountAddress, E> {
        value.parse().map_err(|e: AddressError| E::custom(e))
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<AccountAddress, D::Error> {
        deserializer.deserialize_str(AddressVisitor)
    }
}

/// Surrogate identifier for a registration record
///
/// UUIDv7, so ids are time-ordered at millisecond resolution; the ledger
/// sequence number remains the ordering authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Creates a new time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REG-{}", self.0)
    }
}

impl FromStr for RegistrationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid_str = s.strip_prefix("REG-").unwrap_or(s);
        Ok(Self(Uuid::parse_str(uuid_str)?))
    }
}

//! Policy Registry Domain
//!
//! This crate implements the policy registry and premium accounting core:
//! the state-transition logic behind `policyCount`, `policies(i)`, and
//! `registerUser(policyIndex, discountTier)`.
//!
//! # Architecture
//!
//! The domain layer is infrastructure-agnostic, containing only business
//! logic:
//! - **Policy Catalog**: append-only list of policy offers with base premiums
//! - **Discount Table**: fixed no-claims-discount tier to rate mapping
//! - **Registration Ledger**: append-only record of account registrations
//! - **Policy Registry**: the aggregate orchestrating the three, enforcing
//!   every invariant
//! - **Domain Events**: `PolicyAdded`, `RegistryOpened`, `UserRegistered`
//!
//! # Registry Lifecycle
//!
//! ```text
//! Setup -> Ready
//! ```
//!
//! The catalog is populated during the one-time `Setup` phase; `open()` seals
//! it and enables registration. The transition is one-way.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_registry::{DiscountTable, DiscountTier, PolicyRegistry};
//!
//! let mut registry = PolicyRegistry::new(discount_table);
//! registry.add_policy(Amount::from_units(1_000_000))?;
//! registry.open()?;
//!
//! let registration = registry.register_user(account, 0, DiscountTier::new(1))?;
//! ```

pub mod catalog;
pub mod discount;
pub mod error;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod seed;

pub use catalog::{Policy, PolicyCatalog};
pub use discount::{DiscountTable, DiscountTier};
pub use error::RegistryError;
pub use events::RegistryEvent;
pub use ledger::{Registration, RegistrationLedger};
pub use registry::{PolicyRegistry, RegistryPhase};
pub use seed::{PolicySeed, RegistrySeed, TierSeed};

//! Core Kernel - Foundational types and utilities for the brokerage platform
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for every entity
//! - Money types with precise decimal arithmetic
//! - The authenticated `Principal` actor and its roles
//! - Shared error classification and port infrastructure
//! - Engine settings carrying the tunable business rules

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;
pub mod principal;
pub mod settings;
pub mod temporal;

pub use error::ErrorKind;
pub use identifiers::{AuditEntryId, ClaimId, PaymentId, ProductId, UserId, UserPolicyId};
pub use money::{Currency, Money, MoneyError, Rate};
pub use ports::{DomainPort, OperationMetadata, PortError};
pub use principal::{Principal, Role};
pub use settings::EngineSettings;

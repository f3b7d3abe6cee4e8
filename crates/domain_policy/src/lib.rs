//! Policy Domain
//!
//! A customer's purchased instance of a catalog product and the rules
//! governing its lifecycle: the purchase saga, the 15-day cancellation
//! window, and the monotonic status machine.
//!
//! # Policy Lifecycle
//!
//! ```text
//! Pending -> Active -> Cancelled | Expired
//!        \-> Cancelled
//! ```
//!
//! `Pending` exists only between the policy write and the payment write of
//! the purchase saga; `Cancelled` and `Expired` are terminal.

pub mod error;
pub mod policy;
pub mod ports;
pub mod product;
pub mod service;

pub use error::PolicyError;
pub use policy::{Nominee, PolicyStatus, UserPolicy};
pub use ports::PolicyPort;
pub use product::{CatalogPort, PolicyProduct};
pub use service::{PolicyService, PurchaseRequest};

//! Claims Domain
//!
//! A customer's reimbursement request against a purchased policy, and the
//! rules governing who may move it where.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -> Approved | Rejected | Cancelled | NeedsInfo
//! NeedsInfo -> Approved | Rejected
//! ```
//!
//! `Approved`, `Rejected`, and `Cancelled` are terminal for agents and
//! customers; only an administrator override may rewrite a decided claim.

pub mod claim;
pub mod error;
pub mod ports;
pub mod service;

pub use claim::{Claim, ClaimDecision, ClaimStatus};
pub use error::ClaimError;
pub use ports::{ClaimsPort, MessagingPort};
pub use service::{ClaimService, FileClaimRequest, RequestInfoRequest};

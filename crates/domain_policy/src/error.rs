//! Policy domain errors
//!
//! Every rejection names the specific invariant that was violated; the
//! transport layer maps `kind()` to the caller-visible response.

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};
use domain_billing::BillingError;
use domain_party::PartyError;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Policy product not found: {0}")]
    ProductNotFound(String),

    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    #[error("You can only cancel your own policies")]
    NotPolicyOwner,

    #[error("Policy is already cancelled")]
    AlreadyCancelled,

    #[error("Cannot cancel an expired policy")]
    CannotCancelExpired,

    #[error("Policy cannot be cancelled after {window_days} days of purchase")]
    CancellationWindowExpired { window_days: u32 },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Payment(#[from] BillingError),

    #[error(transparent)]
    Party(#[from] PartyError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl PolicyError {
    /// Classifies the error for transport mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolicyError::ProductNotFound(_) | PolicyError::PolicyNotFound(_) => ErrorKind::NotFound,
            PolicyError::NotPolicyOwner => ErrorKind::Forbidden,
            PolicyError::AlreadyCancelled
            | PolicyError::CannotCancelExpired
            | PolicyError::InvalidStatusTransition { .. } => ErrorKind::InvalidState,
            PolicyError::CancellationWindowExpired { .. } => ErrorKind::WindowExpired,
            PolicyError::Validation(_) => ErrorKind::Validation,
            PolicyError::Payment(e) => e.kind(),
            PolicyError::Party(e) => e.kind(),
            PolicyError::Port(e) => e.kind(),
        }
    }
}

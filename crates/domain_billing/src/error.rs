//! Billing domain errors

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    #[error("You can only make payments for your own policies")]
    NotPolicyOwner,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl BillingError {
    /// Classifies the error for transport mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            BillingError::PolicyNotFound(_) => ErrorKind::NotFound,
            BillingError::NotPolicyOwner => ErrorKind::Forbidden,
            BillingError::Validation(_) => ErrorKind::Validation,
            BillingError::Port(e) => e.kind(),
        }
    }
}

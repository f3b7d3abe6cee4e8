//! Claims domain errors
//!
//! Each rejection names the violated rule; `kind()` classifies it for the
//! transport layer.

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};
use domain_party::PartyError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("User policy not found: {0}")]
    PolicyNotFound(String),

    #[error("You can only claim on your own policies")]
    NotPolicyOwner,

    #[error("You can only cancel your own claims")]
    NotClaimOwner,

    #[error("You can only update claims assigned to you")]
    NotAssignedAgent,

    #[error("Only agents can update claim status")]
    AgentRoleRequired,

    #[error("Only administrators can override claim status")]
    AdminRoleRequired,

    #[error("Claim has already been decided")]
    AlreadyDecided,

    #[error("Only pending claims can be cancelled")]
    OnlyPendingCancellable,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Party(#[from] PartyError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl ClaimError {
    /// Classifies the error for transport mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::ClaimNotFound(_) | ClaimError::PolicyNotFound(_) => ErrorKind::NotFound,
            ClaimError::NotPolicyOwner
            | ClaimError::NotClaimOwner
            | ClaimError::NotAssignedAgent
            | ClaimError::AgentRoleRequired
            | ClaimError::AdminRoleRequired => ErrorKind::Forbidden,
            ClaimError::AlreadyDecided
            | ClaimError::OnlyPendingCancellable
            | ClaimError::InvalidStatusTransition { .. } => ErrorKind::InvalidState,
            ClaimError::Validation(_) => ErrorKind::Validation,
            ClaimError::Party(e) => e.kind(),
            ClaimError::Port(e) => e.kind(),
        }
    }
}

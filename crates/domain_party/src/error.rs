//! Party domain errors

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl PartyError {
    /// Classifies the error for transport mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            PartyError::CustomerNotFound(_) => ErrorKind::NotFound,
            PartyError::Port(e) => e.kind(),
        }
    }
}

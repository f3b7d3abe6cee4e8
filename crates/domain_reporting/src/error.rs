//! Reporting domain errors

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};

/// Errors that can occur building dashboard views
#[derive(Debug, Error)]
pub enum ReportingError {
    #[error("Agent access required")]
    AgentRoleRequired,

    #[error("Admin access required")]
    AdminRoleRequired,

    #[error(transparent)]
    Port(#[from] PortError),
}

impl ReportingError {
    /// Classifies the error for transport mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportingError::AgentRoleRequired | ReportingError::AdminRoleRequired => {
                ErrorKind::Forbidden
            }
            ReportingError::Port(e) => e.kind(),
        }
    }
}

//! Shared error classification
//!
//! Each domain defines its own error enum; `ErrorKind` is the closed set of
//! categories the transport layer maps to caller-visible responses. Every
//! domain error exposes `kind()` returning one of these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a rejected operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced entity is absent
    NotFound,
    /// Ownership or role violation
    Forbidden,
    /// Operation invalid for the entity's current status
    InvalidState,
    /// Cancellation attempted past the allowed window
    WindowExpired,
    /// Malformed or missing required input
    Validation,
    /// Infrastructure failure (storage, adapter)
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Forbidden => write!(f, "forbidden"),
            ErrorKind::InvalidState => write!(f, "invalid_state"),
            ErrorKind::WindowExpired => write!(f, "window_expired"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::WindowExpired).unwrap();
        assert_eq!(json, "\"window_expired\"");
    }
}

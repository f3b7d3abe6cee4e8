//! Authenticated principals
//!
//! Every lifecycle operation receives an already-authenticated `Principal`;
//! credential verification happens upstream in the transport layer. Lifecycle
//! code only ever checks ownership and role.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::UserId;

/// Role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Agent,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Agent => write!(f, "agent"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// An authenticated actor performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn customer(id: UserId) -> Self {
        Self::new(id, Role::Customer)
    }

    pub fn agent(id: UserId) -> Self {
        Self::new(id, Role::Agent)
    }

    pub fn admin(id: UserId) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn is_customer(&self) -> bool {
        self.role == Role::Customer
    }

    pub fn is_agent(&self) -> bool {
        self.role == Role::Agent
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let agent = Principal::agent(UserId::new());
        assert!(agent.is_agent());
        assert!(!agent.is_admin());
        assert!(!agent.is_customer());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Customer).unwrap();
        assert_eq!(json, "\"customer\"");
    }
}

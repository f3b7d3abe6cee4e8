//! Sales agent records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::UserId;

/// Agent account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
    Suspended,
}

/// A sales agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub status: AgentStatus,
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Creates a new active agent
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new_v7(),
            name: name.into(),
            email: email.into(),
            status: AgentStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// True when the agent can take on new customers and claims
    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }
}

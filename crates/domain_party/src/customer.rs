//! Customer records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::UserId;

/// A customer of the brokerage
///
/// Only the fields the lifecycle engine reads are modelled here; profile,
/// preferences, and KYC details belong to the account service upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// The agent responsible for this customer, once one has been assigned
    pub assigned_agent_id: Option<UserId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new active customer with no assigned agent
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new_v7(),
            name: name.into(),
            email: email.into(),
            assigned_agent_id: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

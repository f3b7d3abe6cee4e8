//! Audit entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AuditEntryId, UserId};

/// The closed set of auditable action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Login,
    Logout,
    PolicyCreated,
    PolicyUpdated,
    PolicyCancelled,
    ClaimCreated,
    ClaimUpdated,
    ClaimApproved,
    ClaimRejected,
    AgentAssigned,
    UserCreated,
    UserUpdated,
    UserActivated,
    UserDeactivated,
    PaymentProcessed,
}

/// An immutable record of a state-changing action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier
    pub id: AuditEntryId,
    /// What happened
    pub action: AuditAction,
    /// Who did it
    pub actor_id: UserId,
    /// The user the action was aimed at, where applicable
    pub target_id: Option<UserId>,
    /// Human-readable description
    pub details: String,
    /// Client IP as reported by the transport layer
    pub ip_address: String,
    /// When the entry was recorded
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates a new entry stamped now
    pub fn new(
        action: AuditAction,
        actor_id: UserId,
        target_id: Option<UserId>,
        details: impl Into<String>,
        ip_address: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditEntryId::new_v7(),
            action,
            actor_id,
            target_id,
            details: details.into(),
            ip_address: ip_address.into(),
            created_at: Utc::now(),
        }
    }
}

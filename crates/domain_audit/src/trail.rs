//! Audit trail service

use std::sync::Arc;
use tracing::{debug, instrument};

use core_kernel::{PortError, UserId};

use crate::entry::{AuditAction, AuditEntry};
use crate::ports::{AuditPort, AuditQuery};

/// Append-only recorder for state-changing actions
///
/// Lifecycle services hold an `AuditTrail` and call [`AuditTrail::record`]
/// after each successful state change. The trail never exposes mutation of
/// existing entries.
#[derive(Clone)]
pub struct AuditTrail {
    port: Arc<dyn AuditPort>,
}

impl AuditTrail {
    /// Creates a trail over the given storage port
    pub fn new(port: Arc<dyn AuditPort>) -> Self {
        Self { port }
    }

    /// Records a state-changing action
    #[instrument(skip_all, fields(action = ?action, actor = %actor_id))]
    pub async fn record(
        &self,
        action: AuditAction,
        actor_id: UserId,
        target_id: Option<UserId>,
        details: impl Into<String>,
        ip_address: impl Into<String>,
    ) -> Result<AuditEntry, PortError> {
        let entry = AuditEntry::new(action, actor_id, target_id, details, ip_address);
        debug!(entry_id = %entry.id, "appending audit entry");
        self.port.append(entry).await
    }

    /// Lists entries for the admin activity views, newest first
    pub async fn list(&self, query: AuditQuery) -> Result<Vec<AuditEntry>, PortError> {
        self.port.find(query).await
    }
}

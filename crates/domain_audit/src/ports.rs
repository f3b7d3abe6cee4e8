//! Audit Domain Ports
//!
//! The `AuditPort` trait is deliberately narrow: append and query. There is
//! no update or delete operation, and adapters must not offer one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, PortError, UserId};

use crate::entry::{AuditAction, AuditEntry};

/// Filter parameters for the read-only audit listing
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Filter by action kind
    pub action: Option<AuditAction>,
    /// Filter by acting user
    pub actor_id: Option<UserId>,
    /// Only entries created at or after this instant
    pub created_after: Option<DateTime<Utc>>,
    /// Only entries created before this instant
    pub created_before: Option<DateTime<Utc>>,
    /// Maximum number of entries, newest first
    pub limit: Option<u32>,
}

impl AuditQuery {
    /// Creates a query for one action kind
    pub fn by_action(action: AuditAction) -> Self {
        Self {
            action: Some(action),
            ..Default::default()
        }
    }

    /// Creates a query for one actor
    pub fn by_actor(actor_id: UserId) -> Self {
        Self {
            actor_id: Some(actor_id),
            ..Default::default()
        }
    }

    /// Restricts the query to a created-at range
    pub fn between(mut self, after: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        self.created_after = Some(after);
        self.created_before = Some(before);
        self
    }

    /// Caps the number of returned entries
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Storage port for the audit trail
#[async_trait]
pub trait AuditPort: DomainPort {
    /// Appends an entry; entries are immutable once written
    async fn append(&self, entry: AuditEntry) -> Result<AuditEntry, PortError>;

    /// Lists entries matching the query, newest first
    async fn find(&self, query: AuditQuery) -> Result<Vec<AuditEntry>, PortError>;
}

/// In-memory mock implementation of `AuditPort` for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Append-only in-memory audit store
    #[derive(Debug, Default)]
    pub struct MockAuditPort {
        entries: Arc<RwLock<Vec<AuditEntry>>>,
    }

    impl MockAuditPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns every recorded entry, oldest first
        pub async fn all(&self) -> Vec<AuditEntry> {
            self.entries.read().await.clone()
        }
    }

    impl DomainPort for MockAuditPort {}

    #[async_trait]
    impl AuditPort for MockAuditPort {
        async fn append(&self, entry: AuditEntry) -> Result<AuditEntry, PortError> {
            self.entries.write().await.push(entry.clone());
            Ok(entry)
        }

        async fn find(&self, query: AuditQuery) -> Result<Vec<AuditEntry>, PortError> {
            let entries = self.entries.read().await;
            let mut results: Vec<_> = entries
                .iter()
                .filter(|e| {
                    if let Some(action) = query.action {
                        if e.action != action {
                            return false;
                        }
                    }
                    if let Some(actor_id) = query.actor_id {
                        if e.actor_id != actor_id {
                            return false;
                        }
                    }
                    if let Some(after) = query.created_after {
                        if e.created_at < after {
                            return false;
                        }
                    }
                    if let Some(before) = query.created_before {
                        if e.created_at >= before {
                            return false;
                        }
                    }
                    true
                })
                .cloned()
                .collect();

            results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            if let Some(limit) = query.limit {
                results.truncate(limit as usize);
            }
            Ok(results)
        }
    }
}

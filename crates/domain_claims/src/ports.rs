//! Claims Domain Ports

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{ClaimId, DomainPort, PortError, UserId};

use crate::claim::{Claim, ClaimStatus};

/// Storage port for claims
#[async_trait]
pub trait ClaimsPort: DomainPort {
    /// Inserts a new claim
    async fn insert(&self, claim: Claim) -> Result<Claim, PortError>;

    /// Retrieves a claim by ID
    async fn get(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Replaces a stored claim (last write wins)
    async fn update(&self, claim: Claim) -> Result<Claim, PortError>;

    /// Returns a customer's claims, newest first
    async fn find_by_customer(&self, customer_id: UserId) -> Result<Vec<Claim>, PortError>;

    /// Returns an agent's assigned claims, newest first, optionally by status
    async fn find_by_agent(
        &self,
        agent_id: UserId,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<Claim>, PortError>;

    /// Counts a customer's claims, optionally restricted to one status
    async fn count_by_customer(
        &self,
        customer_id: UserId,
        status: Option<ClaimStatus>,
    ) -> Result<u64, PortError>;

    /// Counts an agent's assigned claims, optionally restricted to one status
    async fn count_by_agent(
        &self,
        agent_id: UserId,
        status: Option<ClaimStatus>,
    ) -> Result<u64, PortError>;

    /// Counts an agent's claims decided into `status` at or after `since`
    async fn count_decided_by_agent_since(
        &self,
        agent_id: UserId,
        status: ClaimStatus,
        since: DateTime<Utc>,
    ) -> Result<u64, PortError>;

    /// Counts all claims on the platform
    async fn count_all(&self) -> Result<u64, PortError>;

    /// Counts claims grouped by status
    async fn count_by_status(&self) -> Result<Vec<(ClaimStatus, u64)>, PortError>;

    /// Counts claims filed at or after the given instant
    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, PortError>;
}

/// Fire-and-forget customer messaging
///
/// Delivery (email, in-app, SMS) belongs to another system. The lifecycle
/// engine logs and swallows notification failures; a lost message never
/// fails a decision.
#[async_trait]
pub trait MessagingPort: DomainPort {
    /// Sends a notification to a user
    async fn notify(
        &self,
        to_user_id: UserId,
        subject: &str,
        body: &str,
        related_claim_id: Option<ClaimId>,
    ) -> Result<(), PortError>;
}

/// In-memory mock implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory claim store
    #[derive(Debug, Default)]
    pub struct MockClaimsPort {
        claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
    }

    impl MockClaimsPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockClaimsPort {}

    #[async_trait]
    impl ClaimsPort for MockClaimsPort {
        async fn insert(&self, claim: Claim) -> Result<Claim, PortError> {
            self.claims.write().await.insert(claim.id, claim.clone());
            Ok(claim)
        }

        async fn get(&self, id: ClaimId) -> Result<Claim, PortError> {
            self.claims
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn update(&self, claim: Claim) -> Result<Claim, PortError> {
            let mut claims = self.claims.write().await;
            if !claims.contains_key(&claim.id) {
                return Err(PortError::not_found("Claim", claim.id));
            }
            claims.insert(claim.id, claim.clone());
            Ok(claim)
        }

        async fn find_by_customer(&self, customer_id: UserId) -> Result<Vec<Claim>, PortError> {
            let mut results: Vec<_> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.customer_id == customer_id)
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(results)
        }

        async fn find_by_agent(
            &self,
            agent_id: UserId,
            status: Option<ClaimStatus>,
        ) -> Result<Vec<Claim>, PortError> {
            let mut results: Vec<_> = self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.assigned_agent_id == Some(agent_id))
                .filter(|c| status.map_or(true, |s| c.status == s))
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(results)
        }

        async fn count_by_customer(
            &self,
            customer_id: UserId,
            status: Option<ClaimStatus>,
        ) -> Result<u64, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.customer_id == customer_id)
                .filter(|c| status.map_or(true, |s| c.status == s))
                .count() as u64)
        }

        async fn count_by_agent(
            &self,
            agent_id: UserId,
            status: Option<ClaimStatus>,
        ) -> Result<u64, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.assigned_agent_id == Some(agent_id))
                .filter(|c| status.map_or(true, |s| c.status == s))
                .count() as u64)
        }

        async fn count_decided_by_agent_since(
            &self,
            agent_id: UserId,
            status: ClaimStatus,
            since: DateTime<Utc>,
        ) -> Result<u64, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.assigned_agent_id == Some(agent_id))
                .filter(|c| c.status == status)
                .filter(|c| c.decided_at.map_or(false, |at| at >= since))
                .count() as u64)
        }

        async fn count_all(&self) -> Result<u64, PortError> {
            Ok(self.claims.read().await.len() as u64)
        }

        async fn count_by_status(&self) -> Result<Vec<(ClaimStatus, u64)>, PortError> {
            let claims = self.claims.read().await;
            let mut counts: HashMap<ClaimStatus, u64> = HashMap::new();
            for claim in claims.values() {
                *counts.entry(claim.status).or_default() += 1;
            }
            Ok(counts.into_iter().collect())
        }

        async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .values()
                .filter(|c| c.created_at >= since)
                .count() as u64)
        }
    }

    /// A notification captured by the mock messenger
    #[derive(Debug, Clone)]
    pub struct SentNotification {
        pub to_user_id: UserId,
        pub subject: String,
        pub body: String,
        pub related_claim_id: Option<ClaimId>,
    }

    /// In-memory messenger that records every notification
    #[derive(Debug, Default)]
    pub struct MockMessagingPort {
        sent: Arc<RwLock<Vec<SentNotification>>>,
    }

    impl MockMessagingPort {
        /// Creates a new mock messenger
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns every sent notification, oldest first
        pub async fn sent(&self) -> Vec<SentNotification> {
            self.sent.read().await.clone()
        }
    }

    impl DomainPort for MockMessagingPort {}

    #[async_trait]
    impl MessagingPort for MockMessagingPort {
        async fn notify(
            &self,
            to_user_id: UserId,
            subject: &str,
            body: &str,
            related_claim_id: Option<ClaimId>,
        ) -> Result<(), PortError> {
            self.sent.write().await.push(SentNotification {
                to_user_id,
                subject: subject.to_string(),
                body: body.to_string(),
                related_claim_id,
            });
            Ok(())
        }
    }

    /// Messenger whose sends always fail, for fire-and-forget tests
    #[derive(Debug, Default)]
    pub struct FailingMessagingPort;

    impl DomainPort for FailingMessagingPort {}

    #[async_trait]
    impl MessagingPort for FailingMessagingPort {
        async fn notify(
            &self,
            _to_user_id: UserId,
            _subject: &str,
            _body: &str,
            _related_claim_id: Option<ClaimId>,
        ) -> Result<(), PortError> {
            Err(PortError::connection("messaging gateway unavailable"))
        }
    }
}

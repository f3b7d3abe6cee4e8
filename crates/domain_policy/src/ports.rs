//! Policy Domain Ports

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, Money, PortError, UserId, UserPolicyId};

use crate::policy::{PolicyStatus, UserPolicy};

/// Storage port for purchased policies
///
/// The count/sum operations at the bottom exist only for the dashboard
/// rollups and must reflect a direct scan of the store at read time.
#[async_trait]
pub trait PolicyPort: DomainPort {
    /// Inserts a new policy
    async fn insert(&self, policy: UserPolicy) -> Result<UserPolicy, PortError>;

    /// Retrieves a policy by ID
    async fn get(&self, id: UserPolicyId) -> Result<UserPolicy, PortError>;

    /// Replaces a stored policy (last write wins)
    async fn update(&self, policy: UserPolicy) -> Result<UserPolicy, PortError>;

    /// Returns a customer's policies, newest first
    async fn find_by_customer(&self, customer_id: UserId) -> Result<Vec<UserPolicy>, PortError>;

    /// Counts a customer's policies, optionally restricted to one status
    async fn count_by_customer(
        &self,
        customer_id: UserId,
        status: Option<PolicyStatus>,
    ) -> Result<u64, PortError>;

    /// Counts policies assigned to an agent
    async fn count_by_agent(&self, agent_id: UserId) -> Result<u64, PortError>;

    /// Sums the premiums of policies assigned to an agent
    async fn sum_premiums_by_agent(&self, agent_id: UserId) -> Result<Money, PortError>;

    /// Counts all policies on the platform
    async fn count_all(&self) -> Result<u64, PortError>;

    /// Counts policies created at or after the given instant
    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, PortError>;
}

/// In-memory mock implementation of `PolicyPort` for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use core_kernel::Currency;
    use domain_billing::PolicyOwnershipPort;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory policy store
    #[derive(Debug, Default)]
    pub struct MockPolicyPort {
        policies: Arc<RwLock<HashMap<UserPolicyId, UserPolicy>>>,
    }

    impl MockPolicyPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockPolicyPort {}

    #[async_trait]
    impl PolicyPort for MockPolicyPort {
        async fn insert(&self, policy: UserPolicy) -> Result<UserPolicy, PortError> {
            self.policies
                .write()
                .await
                .insert(policy.id, policy.clone());
            Ok(policy)
        }

        async fn get(&self, id: UserPolicyId) -> Result<UserPolicy, PortError> {
            self.policies
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("UserPolicy", id))
        }

        async fn update(&self, policy: UserPolicy) -> Result<UserPolicy, PortError> {
            let mut policies = self.policies.write().await;
            if !policies.contains_key(&policy.id) {
                return Err(PortError::not_found("UserPolicy", policy.id));
            }
            policies.insert(policy.id, policy.clone());
            Ok(policy)
        }

        async fn find_by_customer(
            &self,
            customer_id: UserId,
        ) -> Result<Vec<UserPolicy>, PortError> {
            let mut results: Vec<_> = self
                .policies
                .read()
                .await
                .values()
                .filter(|p| p.customer_id == customer_id)
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(results)
        }

        async fn count_by_customer(
            &self,
            customer_id: UserId,
            status: Option<PolicyStatus>,
        ) -> Result<u64, PortError> {
            Ok(self
                .policies
                .read()
                .await
                .values()
                .filter(|p| p.customer_id == customer_id)
                .filter(|p| status.map_or(true, |s| p.status == s))
                .count() as u64)
        }

        async fn count_by_agent(&self, agent_id: UserId) -> Result<u64, PortError> {
            Ok(self
                .policies
                .read()
                .await
                .values()
                .filter(|p| p.assigned_agent_id == Some(agent_id))
                .count() as u64)
        }

        async fn sum_premiums_by_agent(&self, agent_id: UserId) -> Result<Money, PortError> {
            let policies = self.policies.read().await;
            let mut total = Money::zero(Currency::INR);
            for policy in policies
                .values()
                .filter(|p| p.assigned_agent_id == Some(agent_id))
            {
                total = total
                    .checked_add(&policy.premium_paid)
                    .map_err(|e| PortError::internal(e.to_string()))?;
            }
            Ok(total)
        }

        async fn count_all(&self) -> Result<u64, PortError> {
            Ok(self.policies.read().await.len() as u64)
        }

        async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, PortError> {
            Ok(self
                .policies
                .read()
                .await
                .values()
                .filter(|p| p.created_at >= since)
                .count() as u64)
        }
    }

    // The billing recorder's narrow view onto the same store
    #[async_trait]
    impl PolicyOwnershipPort for MockPolicyPort {
        async fn owner_of(&self, user_policy_id: UserPolicyId) -> Result<UserId, PortError> {
            Ok(self.get(user_policy_id).await?.customer_id)
        }
    }
}

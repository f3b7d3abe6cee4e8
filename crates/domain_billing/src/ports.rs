//! Billing Domain Ports

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, Money, PortError, UserId, UserPolicyId};

use crate::payment::Payment;

/// Storage port for payment records
///
/// Payments are append-only on the simulated path; no update operation is
/// exposed. The sum operations exist for the dashboard rollups.
#[async_trait]
pub trait PaymentsPort: DomainPort {
    /// Inserts a payment record
    async fn insert(&self, payment: Payment) -> Result<Payment, PortError>;

    /// Returns a customer's payments, newest first
    async fn find_by_customer(&self, customer_id: UserId) -> Result<Vec<Payment>, PortError>;

    /// Sums all recorded payment amounts
    async fn sum_amounts(&self) -> Result<Money, PortError>;

    /// Sums payment amounts recorded at or after the given instant
    async fn sum_amounts_since(&self, since: DateTime<Utc>) -> Result<Money, PortError>;
}

/// Narrow read port onto the policy store
///
/// The recorder only needs to know that a policy exists and who owns it;
/// depending on the full policy domain would invert the crate dependency,
/// so the adapter implements this one-method view instead.
#[async_trait]
pub trait PolicyOwnershipPort: DomainPort {
    /// Returns the owning customer of the policy, or NotFound
    async fn owner_of(&self, user_policy_id: UserPolicyId) -> Result<UserId, PortError>;
}

/// In-memory mock implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use core_kernel::Currency;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory payment store
    #[derive(Debug, Default)]
    pub struct MockPaymentsPort {
        payments: Arc<RwLock<Vec<Payment>>>,
    }

    impl MockPaymentsPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns every stored payment
        pub async fn all(&self) -> Vec<Payment> {
            self.payments.read().await.clone()
        }
    }

    impl DomainPort for MockPaymentsPort {}

    #[async_trait]
    impl PaymentsPort for MockPaymentsPort {
        async fn insert(&self, payment: Payment) -> Result<Payment, PortError> {
            self.payments.write().await.push(payment.clone());
            Ok(payment)
        }

        async fn find_by_customer(
            &self,
            customer_id: UserId,
        ) -> Result<Vec<Payment>, PortError> {
            let mut results: Vec<_> = self
                .payments
                .read()
                .await
                .iter()
                .filter(|p| p.customer_id == customer_id)
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(results)
        }

        async fn sum_amounts(&self) -> Result<Money, PortError> {
            let payments = self.payments.read().await;
            sum(payments.iter())
        }

        async fn sum_amounts_since(&self, since: DateTime<Utc>) -> Result<Money, PortError> {
            let payments = self.payments.read().await;
            sum(payments.iter().filter(|p| p.created_at >= since))
        }
    }

    fn sum<'a>(payments: impl Iterator<Item = &'a Payment>) -> Result<Money, PortError> {
        let mut total = Money::zero(Currency::INR);
        for payment in payments {
            total = total
                .checked_add(&payment.amount)
                .map_err(|e| PortError::internal(e.to_string()))?;
        }
        Ok(total)
    }

    /// In-memory policy-ownership lookup
    #[derive(Debug, Default)]
    pub struct MockPolicyOwnershipPort {
        owners: Arc<RwLock<HashMap<UserPolicyId, UserId>>>,
    }

    impl MockPolicyOwnershipPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers a policy's owner
        pub async fn insert(&self, user_policy_id: UserPolicyId, owner: UserId) {
            self.owners.write().await.insert(user_policy_id, owner);
        }
    }

    impl DomainPort for MockPolicyOwnershipPort {}

    #[async_trait]
    impl PolicyOwnershipPort for MockPolicyOwnershipPort {
        async fn owner_of(&self, user_policy_id: UserPolicyId) -> Result<UserId, PortError> {
            self.owners
                .read()
                .await
                .get(&user_policy_id)
                .copied()
                .ok_or_else(|| PortError::not_found("UserPolicy", user_policy_id))
        }
    }
}

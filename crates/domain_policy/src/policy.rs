//! The UserPolicy aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Money, ProductId, UserId, UserPolicyId};

use crate::error::PolicyError;

/// Lifecycle status of a purchased policy
///
/// Transitions are monotonic; `Cancelled` and `Expired` are terminal.
/// `Pending` is the provisional state between the policy write and the
/// payment write of the purchase saga.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    Pending,
    Active,
    Cancelled,
    Expired,
}

impl PolicyStatus {
    /// True when no further transition is allowed
    pub fn is_terminal(&self) -> bool {
        matches!(self, PolicyStatus::Cancelled | PolicyStatus::Expired)
    }

    /// The single source of transition legality
    pub fn can_transition_to(&self, target: PolicyStatus) -> bool {
        use PolicyStatus::*;
        matches!(
            (self, target),
            (Pending, Active) | (Pending, Cancelled) | (Active, Cancelled) | (Active, Expired)
        )
    }
}

/// Beneficiary named on the policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Nominee {
    #[validate(length(min = 1, message = "nominee name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "nominee relation is required"))]
    pub relation: String,
}

/// A customer's purchased instance of a policy product
///
/// Created on purchase, mutated only by the purchase saga's activation and
/// by cancellation, never deleted. `end_date` passing does not flip the
/// status; there is no expiry sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPolicy {
    /// Unique identifier
    pub id: UserPolicyId,
    /// Owning customer
    pub customer_id: UserId,
    /// The catalog product purchased
    pub product_id: ProductId,
    /// Coverage start
    pub start_date: DateTime<Utc>,
    /// Coverage end (start + term)
    pub end_date: DateTime<Utc>,
    /// Premium paid at purchase
    pub premium_paid: Money,
    /// Current status
    pub status: PolicyStatus,
    /// Agent responsible for this policy, when one could be resolved
    pub assigned_agent_id: Option<UserId>,
    /// Named beneficiary
    pub nominee: Option<Nominee>,
    /// Purchase timestamp; anchors the cancellation window
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl UserPolicy {
    /// Creates a provisional (`Pending`) policy for the purchase saga
    #[allow(clippy::too_many_arguments)]
    pub fn provisional(
        customer_id: UserId,
        product_id: ProductId,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        premium_paid: Money,
        assigned_agent_id: Option<UserId>,
        nominee: Option<Nominee>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserPolicyId::new_v7(),
            customer_id,
            product_id,
            start_date,
            end_date,
            premium_paid,
            status: PolicyStatus::Pending,
            assigned_agent_id,
            nominee,
            created_at: now,
            updated_at: now,
        }
    }

    /// True while the policy is in force
    pub fn is_active(&self) -> bool {
        self.status == PolicyStatus::Active
    }

    /// Moves the policy to a new status, enforcing the transition table
    pub fn transition(&mut self, target: PolicyStatus) -> Result<(), PolicyError> {
        if !self.status.can_transition_to(target) {
            return Err(PolicyError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{target:?}"),
            });
        }
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn provisional_policy() -> UserPolicy {
        let start = Utc::now();
        UserPolicy::provisional(
            UserId::new(),
            ProductId::new(),
            start,
            core_kernel::temporal::add_months(start, 12),
            Money::inr(dec!(5000)),
            None,
            Some(Nominee {
                name: "Asha Verma".to_string(),
                relation: "spouse".to_string(),
            }),
        )
    }

    #[test]
    fn test_provisional_policy_starts_pending() {
        let policy = provisional_policy();
        assert_eq!(policy.status, PolicyStatus::Pending);
        assert!(!policy.is_active());
    }

    #[test]
    fn test_activation_and_cancellation_path() {
        let mut policy = provisional_policy();
        policy.transition(PolicyStatus::Active).unwrap();
        assert!(policy.is_active());
        policy.transition(PolicyStatus::Cancelled).unwrap();
        assert_eq!(policy.status, PolicyStatus::Cancelled);
    }

    #[test]
    fn test_terminal_statuses_reject_transitions() {
        let mut policy = provisional_policy();
        policy.transition(PolicyStatus::Active).unwrap();
        policy.transition(PolicyStatus::Expired).unwrap();

        let err = policy.transition(PolicyStatus::Active).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn test_pending_cannot_expire() {
        let mut policy = provisional_policy();
        assert!(policy.transition(PolicyStatus::Expired).is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&PolicyStatus::Active).unwrap();
        assert_eq!(json, "\"ACTIVE\"");
        let json = serde_json::to_string(&PolicyStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");
    }
}

//! The Claim aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Money, UserId, UserPolicyId};

use crate::error::ClaimError;

/// Lifecycle status of a claim
///
/// Every transition originates from `Pending` except deciding a claim that
/// is waiting on documents. There is no path from `NeedsInfo` back to
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    NeedsInfo,
}

impl ClaimStatus {
    /// True once the claim is decided or withdrawn
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClaimStatus::Approved | ClaimStatus::Rejected | ClaimStatus::Cancelled
        )
    }

    /// The single source of transition legality
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self, target),
            (Pending, Approved)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Pending, NeedsInfo)
                | (NeedsInfo, Approved)
                | (NeedsInfo, Rejected)
        )
    }
}

/// An agent's decision on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimDecision {
    Approved,
    Rejected,
}

impl ClaimDecision {
    /// The status this decision moves the claim to
    pub fn to_status(self) -> ClaimStatus {
        match self {
            ClaimDecision::Approved => ClaimStatus::Approved,
            ClaimDecision::Rejected => ClaimStatus::Rejected,
        }
    }

    /// Lowercase wording used in customer notifications
    pub fn as_past_tense(&self) -> &'static str {
        match self {
            ClaimDecision::Approved => "approved",
            ClaimDecision::Rejected => "rejected",
        }
    }
}

/// A reimbursement request filed against a purchased policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Filing customer
    pub customer_id: UserId,
    /// The policy claimed against
    pub user_policy_id: UserPolicyId,
    /// Date of the incident
    pub incident_date: NaiveDate,
    /// What happened
    pub description: String,
    /// Amount requested
    pub amount_claimed: Money,
    /// Current status
    pub status: ClaimStatus,
    /// Decision rationale, or the cancellation note
    pub decision_notes: Option<String>,
    /// Who decided the claim
    pub decided_by_agent_id: Option<UserId>,
    /// When the claim was decided or cancelled
    pub decided_at: Option<DateTime<Utc>>,
    /// Agent responsible for this claim, copied at creation
    pub assigned_agent_id: Option<UserId>,
    /// Documents requested from the customer
    pub required_documents: Vec<String>,
    /// Filing timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Files a new `Pending` claim
    pub fn file(
        customer_id: UserId,
        user_policy_id: UserPolicyId,
        incident_date: NaiveDate,
        description: impl Into<String>,
        amount_claimed: Money,
        assigned_agent_id: Option<UserId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ClaimId::new_v7(),
            customer_id,
            user_policy_id,
            incident_date,
            description: description.into(),
            amount_claimed,
            status: ClaimStatus::Pending,
            decision_notes: None,
            decided_by_agent_id: None,
            decided_at: None,
            assigned_agent_id,
            required_documents: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the claim to a new status, enforcing the transition table
    pub fn transition(&mut self, target: ClaimStatus) -> Result<(), ClaimError> {
        if !self.status.can_transition_to(target) {
            return Err(ClaimError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{target:?}"),
            });
        }
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Sets the status without consulting the transition table
    ///
    /// Reserved for administrator overrides.
    pub fn force_status(&mut self, target: ClaimStatus) {
        self.status = target;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pending_claim() -> Claim {
        Claim::file(
            UserId::new(),
            UserPolicyId::new(),
            Utc::now().date_naive(),
            "Hospitalisation after road accident",
            Money::inr(dec!(25000)),
            None,
        )
    }

    #[test]
    fn test_filed_claim_is_pending() {
        let claim = pending_claim();
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert!(claim.decided_at.is_none());
        assert!(claim.required_documents.is_empty());
    }

    #[test]
    fn test_pending_to_approved() {
        let mut claim = pending_claim();
        claim.transition(ClaimStatus::Approved).unwrap();
        assert_eq!(claim.status, ClaimStatus::Approved);
    }

    #[test]
    fn test_needs_info_remains_decidable() {
        let mut claim = pending_claim();
        claim.transition(ClaimStatus::NeedsInfo).unwrap();
        claim.transition(ClaimStatus::Rejected).unwrap();
        assert_eq!(claim.status, ClaimStatus::Rejected);
    }

    #[test]
    fn test_needs_info_has_no_path_back_to_pending() {
        let mut claim = pending_claim();
        claim.transition(ClaimStatus::NeedsInfo).unwrap();
        assert!(claim.transition(ClaimStatus::Pending).is_err());
    }

    #[test]
    fn test_terminal_statuses_reject_transitions() {
        let mut claim = pending_claim();
        claim.transition(ClaimStatus::Cancelled).unwrap();
        let err = claim.transition(ClaimStatus::Approved).unwrap_err();
        assert!(matches!(err, ClaimError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn test_force_status_bypasses_the_table() {
        let mut claim = pending_claim();
        claim.transition(ClaimStatus::Rejected).unwrap();
        claim.force_status(ClaimStatus::Approved);
        assert_eq!(claim.status, ClaimStatus::Approved);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ClaimStatus::NeedsInfo).unwrap();
        assert_eq!(json, "\"NEEDS_INFO\"");
    }
}

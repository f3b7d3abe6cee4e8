//! Dashboard view models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Money, UserPolicyId};
use domain_claims::ClaimStatus;
use domain_policy::PolicyStatus;

/// A policy line on the customer dashboard
///
/// `product_title` renders as "unknown" when the catalog cannot resolve the
/// product; a missing join never fails the whole view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySummary {
    pub id: UserPolicyId,
    pub product_title: String,
    pub status: PolicyStatus,
    pub premium_paid: Money,
    pub created_at: DateTime<Utc>,
}

/// A claim line on the customer dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub id: ClaimId,
    pub status: ClaimStatus,
    pub amount_claimed: Money,
    pub created_at: DateTime<Utc>,
}

/// Per-customer rollup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDashboard {
    pub total_policies: u64,
    pub active_policies: u64,
    pub total_claims: u64,
    pub pending_claims: u64,
    pub recent_policies: Vec<PolicySummary>,
    pub recent_claims: Vec<ClaimSummary>,
}

/// Per-agent rollup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDashboard {
    pub total_customers: u64,
    pub assigned_policies: u64,
    pub pending_claims: u64,
    /// Claims this agent moved to `Approved` within the trailing window
    pub resolved_claims_in_window: u64,
    /// Display figure: the commission rate applied to summed assigned
    /// premiums. Not a ledger entry.
    pub commission: Money,
    /// The agent's most recently filed assigned claims
    pub recent_claims: Vec<ClaimSummary>,
}

/// Platform-wide rollup for administrators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub total_users: u64,
    pub total_customers: u64,
    pub total_agents: u64,
    pub total_policies_sold: u64,
    pub total_claims: u64,
    pub claims_by_status: Vec<(ClaimStatus, u64)>,
    pub total_payments: Money,
    /// Payments recorded within the trailing window
    pub revenue_in_window: Money,
    pub new_policies_in_window: u64,
    pub new_claims_in_window: u64,
}

impl AdminDashboard {
    /// Count of claims currently in the given status
    pub fn claims_with_status(&self, status: ClaimStatus) -> u64 {
        self.claims_by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

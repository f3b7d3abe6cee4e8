//! Dashboard aggregation
//!
//! Each view is assembled from the storage ports' count/sum operations at
//! request time, so the numbers always match a direct scan of the entities.

use std::sync::Arc;
use tracing::{debug, instrument};

use chrono::Utc;
use core_kernel::{temporal::trailing_window_start, EngineSettings, Principal, Role};
use domain_billing::PaymentsPort;
use domain_claims::{ClaimStatus, ClaimsPort};
use domain_party::PartyPort;
use domain_policy::{CatalogPort, PolicyPort, PolicyStatus, UserPolicy};

use crate::error::ReportingError;
use crate::views::{
    AdminDashboard, AgentDashboard, ClaimSummary, CustomerDashboard, PolicySummary,
};

/// Number of recent policies/claims shown on the customer dashboard
const RECENT_LIMIT: usize = 5;

/// Builds role-scoped dashboard views
#[derive(Clone)]
pub struct DashboardAggregator {
    parties: Arc<dyn PartyPort>,
    policies: Arc<dyn PolicyPort>,
    claims: Arc<dyn ClaimsPort>,
    payments: Arc<dyn PaymentsPort>,
    catalog: Arc<dyn CatalogPort>,
    settings: EngineSettings,
}

impl DashboardAggregator {
    /// Creates an aggregator over the given read ports
    pub fn new(
        parties: Arc<dyn PartyPort>,
        policies: Arc<dyn PolicyPort>,
        claims: Arc<dyn ClaimsPort>,
        payments: Arc<dyn PaymentsPort>,
        catalog: Arc<dyn CatalogPort>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            parties,
            policies,
            claims,
            payments,
            catalog,
            settings,
        }
    }

    /// Per-customer counts and recent activity
    #[instrument(skip(self), fields(customer = %customer.id))]
    pub async fn customer_dashboard(
        &self,
        customer: &Principal,
    ) -> Result<CustomerDashboard, ReportingError> {
        let total_policies = self.policies.count_by_customer(customer.id, None).await?;
        let active_policies = self
            .policies
            .count_by_customer(customer.id, Some(PolicyStatus::Active))
            .await?;
        let total_claims = self.claims.count_by_customer(customer.id, None).await?;
        let pending_claims = self
            .claims
            .count_by_customer(customer.id, Some(ClaimStatus::Pending))
            .await?;

        let mut recent_policies = Vec::new();
        for policy in self
            .policies
            .find_by_customer(customer.id)
            .await?
            .into_iter()
            .take(RECENT_LIMIT)
        {
            recent_policies.push(self.policy_summary(policy).await);
        }

        let recent_claims = self
            .claims
            .find_by_customer(customer.id)
            .await?
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|c| ClaimSummary {
                id: c.id,
                status: c.status,
                amount_claimed: c.amount_claimed,
                created_at: c.created_at,
            })
            .collect();

        Ok(CustomerDashboard {
            total_policies,
            active_policies,
            total_claims,
            pending_claims,
            recent_policies,
            recent_claims,
        })
    }

    /// Per-agent workload and commission display figure
    #[instrument(skip(self), fields(agent = %agent.id))]
    pub async fn agent_dashboard(
        &self,
        agent: &Principal,
    ) -> Result<AgentDashboard, ReportingError> {
        if !agent.is_agent() {
            return Err(ReportingError::AgentRoleRequired);
        }

        let window_start =
            trailing_window_start(Utc::now(), self.settings.trailing_window_days);

        let total_customers = self.parties.count_customers_assigned_to(agent.id).await?;
        let assigned_policies = self.policies.count_by_agent(agent.id).await?;
        let pending_claims = self
            .claims
            .count_by_agent(agent.id, Some(ClaimStatus::Pending))
            .await?;
        let resolved_claims_in_window = self
            .claims
            .count_decided_by_agent_since(agent.id, ClaimStatus::Approved, window_start)
            .await?;

        let summed_premiums = self.policies.sum_premiums_by_agent(agent.id).await?;
        let commission = self.settings.commission_rate().apply(&summed_premiums);
        debug!(%summed_premiums, %commission, "commission computed");

        let recent_claims = self
            .claims
            .find_by_agent(agent.id, None)
            .await?
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|c| ClaimSummary {
                id: c.id,
                status: c.status,
                amount_claimed: c.amount_claimed,
                created_at: c.created_at,
            })
            .collect();

        Ok(AgentDashboard {
            total_customers,
            assigned_policies,
            pending_claims,
            resolved_claims_in_window,
            commission,
            recent_claims,
        })
    }

    /// Platform-wide totals and trailing-window activity
    #[instrument(skip(self), fields(admin = %admin.id))]
    pub async fn admin_dashboard(
        &self,
        admin: &Principal,
    ) -> Result<AdminDashboard, ReportingError> {
        if !admin.is_admin() {
            return Err(ReportingError::AdminRoleRequired);
        }

        let window_start =
            trailing_window_start(Utc::now(), self.settings.trailing_window_days);

        let total_customers = self.parties.count_by_role(Role::Customer).await?;
        let total_agents = self.parties.count_by_role(Role::Agent).await?;
        let total_admins = self.parties.count_by_role(Role::Admin).await?;

        Ok(AdminDashboard {
            total_users: total_customers + total_agents + total_admins,
            total_customers,
            total_agents,
            total_policies_sold: self.policies.count_all().await?,
            total_claims: self.claims.count_all().await?,
            claims_by_status: self.claims.count_by_status().await?,
            total_payments: self.payments.sum_amounts().await?,
            revenue_in_window: self.payments.sum_amounts_since(window_start).await?,
            new_policies_in_window: self.policies.count_created_since(window_start).await?,
            new_claims_in_window: self.claims.count_created_since(window_start).await?,
        })
    }

    /// Joins the product title, degrading to "unknown" when the catalog
    /// cannot resolve it
    async fn policy_summary(&self, policy: UserPolicy) -> PolicySummary {
        let product_title = match self.catalog.get_product(policy.product_id).await {
            Ok(product) => product.title,
            Err(_) => "unknown".to_string(),
        };
        PolicySummary {
            id: policy.id,
            product_title,
            status: policy.status,
            premium_paid: policy.premium_paid,
            created_at: policy.created_at,
        }
    }
}

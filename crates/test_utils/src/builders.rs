//! Test Data Builders
//!
//! Builder patterns for constructing test entities with sensible defaults,
//! so tests specify only the fields they care about.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{temporal::add_months, Money, ProductId, UserId, UserPolicyId};
use domain_claims::Claim;
use domain_policy::{Nominee, PolicyProduct, PolicyStatus, UserPolicy};

use crate::fixtures::MoneyFixtures;

/// Builder for catalog products
pub struct ProductBuilder {
    code: String,
    title: String,
    premium: Money,
    term_months: u32,
    is_active: bool,
}

impl Default for ProductBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            code: "HLTH-SECURE".to_string(),
            title: "Secure Health Cover".to_string(),
            premium: MoneyFixtures::premium_5000(),
            term_months: 12,
            is_active: true,
        }
    }

    /// Sets the product code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the premium
    pub fn with_premium(mut self, premium: Money) -> Self {
        self.premium = premium;
        self
    }

    /// Sets the term in months
    pub fn with_term_months(mut self, term_months: u32) -> Self {
        self.term_months = term_months;
        self
    }

    /// Builds the product
    pub fn build(self) -> PolicyProduct {
        PolicyProduct {
            id: ProductId::new(),
            code: self.code,
            title: self.title,
            premium: self.premium,
            term_months: self.term_months,
            is_active: self.is_active,
        }
    }
}

/// Builder for purchased policies
pub struct UserPolicyBuilder {
    customer_id: UserId,
    product_id: ProductId,
    start_date: DateTime<Utc>,
    term_months: u32,
    premium_paid: Money,
    status: PolicyStatus,
    assigned_agent_id: Option<UserId>,
    nominee: Option<Nominee>,
    created_at: Option<DateTime<Utc>>,
}

impl Default for UserPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPolicyBuilder {
    /// Creates a builder producing an active 12-month policy
    pub fn new() -> Self {
        Self {
            customer_id: UserId::new(),
            product_id: ProductId::new(),
            start_date: Utc::now(),
            term_months: 12,
            premium_paid: MoneyFixtures::premium_5000(),
            status: PolicyStatus::Active,
            assigned_agent_id: None,
            nominee: None,
            created_at: None,
        }
    }

    /// Sets the owning customer
    pub fn with_customer(mut self, customer_id: UserId) -> Self {
        self.customer_id = customer_id;
        self
    }

    /// Sets the product
    pub fn with_product(mut self, product_id: ProductId) -> Self {
        self.product_id = product_id;
        self
    }

    /// Sets the premium paid
    pub fn with_premium(mut self, premium: Money) -> Self {
        self.premium_paid = premium;
        self
    }

    /// Sets the target status
    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the assigned agent
    pub fn with_agent(mut self, agent_id: UserId) -> Self {
        self.assigned_agent_id = Some(agent_id);
        self
    }

    /// Backdates the purchase timestamp
    pub fn created_days_ago(mut self, days: i64) -> Self {
        self.created_at = Some(Utc::now() - chrono::Duration::days(days));
        self
    }

    /// Builds the policy, walking the status machine to the target
    pub fn build(self) -> UserPolicy {
        let mut policy = UserPolicy::provisional(
            self.customer_id,
            self.product_id,
            self.start_date,
            add_months(self.start_date, self.term_months),
            self.premium_paid,
            self.assigned_agent_id,
            self.nominee,
        );
        match self.status {
            PolicyStatus::Pending => {}
            PolicyStatus::Active => {
                policy.transition(PolicyStatus::Active).unwrap();
            }
            PolicyStatus::Cancelled => {
                policy.transition(PolicyStatus::Active).unwrap();
                policy.transition(PolicyStatus::Cancelled).unwrap();
            }
            PolicyStatus::Expired => {
                policy.transition(PolicyStatus::Active).unwrap();
                policy.transition(PolicyStatus::Expired).unwrap();
            }
        }
        if let Some(created_at) = self.created_at {
            policy.created_at = created_at;
        }
        policy
    }
}

/// Builder for claims
pub struct ClaimBuilder {
    customer_id: UserId,
    user_policy_id: UserPolicyId,
    incident_date: NaiveDate,
    description: String,
    amount_claimed: Money,
    assigned_agent_id: Option<UserId>,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a builder producing a pending claim
    pub fn new() -> Self {
        Self {
            customer_id: UserId::new(),
            user_policy_id: UserPolicyId::new(),
            incident_date: Utc::now().date_naive(),
            description: "Hospitalisation after road accident".to_string(),
            amount_claimed: MoneyFixtures::claim_amount(),
            assigned_agent_id: None,
        }
    }

    /// Sets the filing customer
    pub fn with_customer(mut self, customer_id: UserId) -> Self {
        self.customer_id = customer_id;
        self
    }

    /// Sets the claimed policy
    pub fn with_policy(mut self, user_policy_id: UserPolicyId) -> Self {
        self.user_policy_id = user_policy_id;
        self
    }

    /// Sets the claimed amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount_claimed = amount;
        self
    }

    /// Sets the assigned agent
    pub fn with_agent(mut self, agent_id: UserId) -> Self {
        self.assigned_agent_id = Some(agent_id);
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        Claim::file(
            self.customer_id,
            self.user_policy_id,
            self.incident_date,
            self.description,
            self.amount_claimed,
            self.assigned_agent_id,
        )
    }
}

//! The in-memory test world
//!
//! Wires every in-memory adapter and service together the way the
//! composition root would, so integration tests can drive whole flows
//! (purchase, file, decide, dashboards) against one consistent state.

use std::sync::Arc;

use core_kernel::{EngineSettings, Money, Principal, ProductId};
use domain_audit::ports::mock::MockAuditPort;
use domain_audit::AuditTrail;
use domain_billing::ports::mock::MockPaymentsPort;
use domain_billing::PaymentRecorder;
use domain_claims::ports::mock::{MockClaimsPort, MockMessagingPort};
use domain_claims::ClaimService;
use domain_party::ports::mock::MockPartyPort;
use domain_party::{Agent, AgentAssignmentResolver, Customer};
use domain_policy::ports::mock::MockPolicyPort;
use domain_policy::product::mock::MockCatalogPort;
use domain_policy::{PolicyProduct, PolicyService};
use domain_reporting::DashboardAggregator;

/// Every mock port plus the fully-wired services
pub struct TestWorld {
    pub parties: Arc<MockPartyPort>,
    pub policies: Arc<MockPolicyPort>,
    pub claims: Arc<MockClaimsPort>,
    pub payments: Arc<MockPaymentsPort>,
    pub catalog: Arc<MockCatalogPort>,
    pub audit: Arc<MockAuditPort>,
    pub messaging: Arc<MockMessagingPort>,
    pub audit_trail: AuditTrail,
    pub policy_service: PolicyService,
    pub claim_service: ClaimService,
    pub payment_recorder: PaymentRecorder,
    pub dashboards: DashboardAggregator,
}

impl TestWorld {
    /// Builds a world with default engine settings
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    /// Builds a world with custom engine settings
    pub fn with_settings(settings: EngineSettings) -> Self {
        let parties = Arc::new(MockPartyPort::new());
        let policies = Arc::new(MockPolicyPort::new());
        let claims = Arc::new(MockClaimsPort::new());
        let payments = Arc::new(MockPaymentsPort::new());
        let catalog = Arc::new(MockCatalogPort::new());
        let audit = Arc::new(MockAuditPort::new());
        let messaging = Arc::new(MockMessagingPort::new());

        let audit_trail = AuditTrail::new(audit.clone());
        let resolver = AgentAssignmentResolver::new(parties.clone(), audit_trail.clone());
        let payment_recorder = PaymentRecorder::new(
            payments.clone(),
            policies.clone(),
            audit_trail.clone(),
        );
        let policy_service = PolicyService::new(
            catalog.clone(),
            policies.clone(),
            resolver.clone(),
            payment_recorder.clone(),
            audit_trail.clone(),
            settings.clone(),
        );
        let claim_service = ClaimService::new(
            claims.clone(),
            policies.clone(),
            resolver,
            messaging.clone(),
            audit_trail.clone(),
        );
        let dashboards = DashboardAggregator::new(
            parties.clone(),
            policies.clone(),
            claims.clone(),
            payments.clone(),
            catalog.clone(),
            settings,
        );

        Self {
            parties,
            policies,
            claims,
            payments,
            catalog,
            audit,
            messaging,
            audit_trail,
            policy_service,
            claim_service,
            payment_recorder,
            dashboards,
        }
    }

    /// Seeds an active customer and returns their principal
    pub async fn seed_customer(&self, name: &str, email: &str) -> Principal {
        let customer = Customer::new(name, email);
        let principal = Principal::customer(customer.id);
        self.parties.insert_customer(customer).await;
        principal
    }

    /// Seeds an active agent and returns their principal
    pub async fn seed_agent(&self, name: &str, email: &str) -> Principal {
        let agent = Agent::new(name, email);
        let principal = Principal::agent(agent.id);
        self.parties.insert_agent(agent).await;
        principal
    }

    /// Seeds a catalog product and returns its id
    pub async fn seed_product(&self, code: &str, premium: Money, term_months: u32) -> ProductId {
        let product = PolicyProduct {
            id: ProductId::new(),
            code: code.to_string(),
            title: format!("{code} cover"),
            premium,
            term_months,
            is_active: true,
        };
        let id = product.id;
        self.catalog.insert(product).await;
        id
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

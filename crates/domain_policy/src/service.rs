//! Policy lifecycle service
//!
//! Orchestrates purchase and cancellation: catalog lookup, agent
//! resolution, the policy/payment saga, and audit emission.

use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use chrono::{DateTime, Utc};
use core_kernel::{
    temporal::{add_months, within_window_days},
    EngineSettings, OperationMetadata, Principal, ProductId, UserPolicyId,
};
use domain_audit::{AuditAction, AuditTrail};
use domain_billing::{PaymentMethod, PaymentRecorder, RecordPaymentRequest};
use domain_party::AgentAssignmentResolver;

use crate::error::PolicyError;
use crate::policy::{Nominee, PolicyStatus, UserPolicy};
use crate::ports::PolicyPort;
use crate::product::CatalogPort;

/// Request to purchase a policy product
#[derive(Debug, Clone, Validate)]
pub struct PurchaseRequest {
    pub product_id: ProductId,
    /// Coverage start; defaults to now
    pub start_date: Option<DateTime<Utc>>,
    /// Term override; defaults to the product's term
    #[validate(range(min = 1, max = 600, message = "term must be between 1 and 600 months"))]
    pub term_months: Option<u32>,
    #[validate(nested)]
    pub nominee: Option<Nominee>,
}

/// Creates and transitions a customer's purchased policy instance
#[derive(Clone)]
pub struct PolicyService {
    catalog: Arc<dyn CatalogPort>,
    policies: Arc<dyn PolicyPort>,
    resolver: AgentAssignmentResolver,
    recorder: PaymentRecorder,
    audit: AuditTrail,
    settings: EngineSettings,
}

impl PolicyService {
    /// Creates the service over its collaborator ports
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        policies: Arc<dyn PolicyPort>,
        resolver: AgentAssignmentResolver,
        recorder: PaymentRecorder,
        audit: AuditTrail,
        settings: EngineSettings,
    ) -> Self {
        Self {
            catalog,
            policies,
            resolver,
            recorder,
            audit,
            settings,
        }
    }

    /// Purchases a policy product for the customer
    ///
    /// The policy is written provisionally (`Pending`), the simulated
    /// payment is recorded, and only then does the policy flip `Active`.
    /// There is no transaction spanning the two writes: a failure between
    /// them leaves an observable `Pending` policy with no payment, to be
    /// reconciled out of band.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` when the product is absent from the catalog
    /// - `Validation` for malformed input
    /// - `Payment` when the payment write fails (policy stays `Pending`)
    #[instrument(skip(self, request, meta), fields(customer = %customer.id, product = %request.product_id))]
    pub async fn purchase(
        &self,
        customer: &Principal,
        request: PurchaseRequest,
        meta: &OperationMetadata,
    ) -> Result<UserPolicy, PolicyError> {
        request
            .validate()
            .map_err(|e| PolicyError::Validation(e.to_string()))?;

        let product = self
            .catalog
            .get_product(request.product_id)
            .await
            .map_err(|e| match e {
                e if e.is_not_found() => {
                    PolicyError::ProductNotFound(request.product_id.to_string())
                }
                e => PolicyError::Port(e),
            })?;

        let start = request.start_date.unwrap_or_else(Utc::now);
        let term_months = request.term_months.unwrap_or(if product.term_months > 0 {
            product.term_months
        } else {
            self.settings.default_term_months
        });
        let end = add_months(start, term_months);

        // No active agent is fine: the policy is created unassigned
        let assigned_agent_id = self.resolver.resolve(customer.id, meta).await?;

        let policy = UserPolicy::provisional(
            customer.id,
            product.id,
            start,
            end,
            product.premium,
            assigned_agent_id,
            request.nominee,
        );
        let mut policy = self.policies.insert(policy).await?;

        // Second, independent write of the saga. On failure the Pending
        // policy stays behind for out-of-band reconciliation.
        if let Err(e) = self
            .recorder
            .record(
                customer,
                RecordPaymentRequest {
                    user_policy_id: policy.id,
                    amount: product.premium,
                    method: PaymentMethod::Simulated,
                    reference: None,
                },
                meta,
            )
            .await
        {
            warn!(policy_id = %policy.id, error = %e, "payment write failed; policy left Pending");
            return Err(e.into());
        }

        policy.transition(PolicyStatus::Active)?;
        let policy = self.policies.update(policy).await?;

        self.audit
            .record(
                AuditAction::PolicyCreated,
                customer.id,
                None,
                format!("Policy {} purchased (product {})", policy.id, product.code),
                meta.ip_or_unknown(),
            )
            .await?;

        info!(policy_id = %policy.id, "policy purchased and activated");
        Ok(policy)
    }

    /// Cancels a policy, within the cancellation window
    ///
    /// # Errors
    ///
    /// - `PolicyNotFound` when the policy is absent
    /// - `NotPolicyOwner` when the caller does not own the policy
    /// - `AlreadyCancelled` / `CannotCancelExpired` for terminal statuses
    /// - `CancellationWindowExpired` past the configured window
    #[instrument(skip(self, meta), fields(customer = %customer.id, policy = %policy_id))]
    pub async fn cancel(
        &self,
        customer: &Principal,
        policy_id: UserPolicyId,
        meta: &OperationMetadata,
    ) -> Result<UserPolicy, PolicyError> {
        let mut policy = self.policies.get(policy_id).await.map_err(|e| match e {
            e if e.is_not_found() => PolicyError::PolicyNotFound(policy_id.to_string()),
            e => PolicyError::Port(e),
        })?;

        if policy.customer_id != customer.id {
            return Err(PolicyError::NotPolicyOwner);
        }

        match policy.status {
            PolicyStatus::Cancelled => return Err(PolicyError::AlreadyCancelled),
            PolicyStatus::Expired => return Err(PolicyError::CannotCancelExpired),
            PolicyStatus::Pending | PolicyStatus::Active => {}
        }

        let window_days = self.settings.cancellation_window_days;
        if !within_window_days(policy.created_at, Utc::now(), window_days) {
            return Err(PolicyError::CancellationWindowExpired { window_days });
        }

        policy.transition(PolicyStatus::Cancelled)?;
        let policy = self.policies.update(policy).await?;

        self.audit
            .record(
                AuditAction::PolicyCancelled,
                customer.id,
                None,
                format!("Policy {} cancelled by user", policy.id),
                meta.ip_or_unknown(),
            )
            .await?;

        info!(policy_id = %policy.id, "policy cancelled");
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockPolicyPort;
    use crate::product::mock::MockCatalogPort;
    use crate::product::PolicyProduct;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use core_kernel::{DomainPort, Money, PortError, UserId};
    use domain_audit::ports::mock::MockAuditPort;
    use domain_audit::{AuditPort, AuditQuery};
    use domain_billing::ports::mock::MockPaymentsPort;
    use domain_billing::{Payment, PaymentStatus, PaymentsPort};
    use domain_party::ports::mock::MockPartyPort;
    use domain_party::{Agent, Customer};
    use rust_decimal_macros::dec;

    struct World {
        catalog: Arc<MockCatalogPort>,
        policies: Arc<MockPolicyPort>,
        parties: Arc<MockPartyPort>,
        payments: Arc<MockPaymentsPort>,
        audit: Arc<MockAuditPort>,
        service: PolicyService,
    }

    fn build_service(
        catalog: Arc<MockCatalogPort>,
        policies: Arc<MockPolicyPort>,
        parties: Arc<MockPartyPort>,
        payments: Arc<dyn domain_billing::PaymentsPort>,
        audit: Arc<MockAuditPort>,
    ) -> PolicyService {
        let trail = AuditTrail::new(audit);
        let resolver = AgentAssignmentResolver::new(parties, trail.clone());
        let recorder = PaymentRecorder::new(payments, policies.clone(), trail.clone());
        PolicyService::new(
            catalog,
            policies,
            resolver,
            recorder,
            trail,
            EngineSettings::default(),
        )
    }

    async fn world() -> World {
        let catalog = Arc::new(MockCatalogPort::new());
        let policies = Arc::new(MockPolicyPort::new());
        let parties = Arc::new(MockPartyPort::new());
        let payments = Arc::new(MockPaymentsPort::new());
        let audit = Arc::new(MockAuditPort::new());
        let service = build_service(
            catalog.clone(),
            policies.clone(),
            parties.clone(),
            payments.clone(),
            audit.clone(),
        );
        World {
            catalog,
            policies,
            parties,
            payments,
            audit,
            service,
        }
    }

    async fn seed_customer(world: &World) -> Principal {
        let customer = Customer::new("Priya Sharma", "priya@example.com");
        let principal = Principal::customer(customer.id);
        world.parties.insert_customer(customer).await;
        principal
    }

    async fn seed_product(world: &World, premium: Money, term_months: u32) -> ProductId {
        let product = PolicyProduct {
            id: ProductId::new(),
            code: "HLTH-SECURE".to_string(),
            title: "Secure Health Cover".to_string(),
            premium,
            term_months,
            is_active: true,
        };
        let id = product.id;
        world.catalog.insert(product).await;
        id
    }

    fn purchase_request(product_id: ProductId) -> PurchaseRequest {
        PurchaseRequest {
            product_id,
            start_date: None,
            term_months: None,
            nominee: Some(Nominee {
                name: "Asha Verma".to_string(),
                relation: "spouse".to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn test_purchase_activates_policy_and_records_payment() {
        let world = world().await;
        let customer = seed_customer(&world).await;
        world.parties.insert_agent(Agent::new("Ravi", "ravi@example.com")).await;
        let product_id = seed_product(&world, Money::inr(dec!(5000)), 12).await;

        let policy = world
            .service
            .purchase(
                &customer,
                purchase_request(product_id),
                &OperationMetadata::default(),
            )
            .await
            .unwrap();

        assert_eq!(policy.status, PolicyStatus::Active);
        assert_eq!(policy.premium_paid, Money::inr(dec!(5000)));
        assert!(policy.assigned_agent_id.is_some());

        let payments = world.payments.all().await;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].status, PaymentStatus::Success);
        assert_eq!(payments[0].amount, Money::inr(dec!(5000)));
        assert_eq!(payments[0].user_policy_id, policy.id);

        let audited = world
            .audit
            .find(AuditQuery::by_action(AuditAction::PolicyCreated))
            .await
            .unwrap();
        assert_eq!(audited.len(), 1);
    }

    #[tokio::test]
    async fn test_purchase_scenario_a_term_dates() {
        // premium 5000, 12 months, purchased effective 2025-01-01
        let world = world().await;
        let customer = seed_customer(&world).await;
        let product_id = seed_product(&world, Money::inr(dec!(5000)), 12).await;

        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut request = purchase_request(product_id);
        request.start_date = Some(start);

        let policy = world
            .service
            .purchase(&customer, request, &OperationMetadata::default())
            .await
            .unwrap();

        assert_eq!(policy.start_date, start);
        assert_eq!(
            policy.end_date,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(policy.premium_paid.amount(), dec!(5000));
    }

    #[tokio::test]
    async fn test_purchase_with_no_active_agent_leaves_policy_unassigned() {
        let world = world().await;
        let customer = seed_customer(&world).await;
        let product_id = seed_product(&world, Money::inr(dec!(3000)), 6).await;

        let policy = world
            .service
            .purchase(
                &customer,
                purchase_request(product_id),
                &OperationMetadata::default(),
            )
            .await
            .unwrap();

        assert_eq!(policy.status, PolicyStatus::Active);
        assert!(policy.assigned_agent_id.is_none());
    }

    #[tokio::test]
    async fn test_purchase_unknown_product_fails_not_found() {
        let world = world().await;
        let customer = seed_customer(&world).await;

        let err = world
            .service
            .purchase(
                &customer,
                purchase_request(ProductId::new()),
                &OperationMetadata::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_purchase_rejects_blank_nominee_name() {
        let world = world().await;
        let customer = seed_customer(&world).await;
        let product_id = seed_product(&world, Money::inr(dec!(5000)), 12).await;

        let mut request = purchase_request(product_id);
        request.nominee = Some(Nominee {
            name: String::new(),
            relation: "spouse".to_string(),
        });

        let err = world
            .service
            .purchase(&customer, request, &OperationMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::Validation(_)));
    }

    /// Payments port whose writes always fail
    struct FailingPaymentsPort;

    impl DomainPort for FailingPaymentsPort {}

    #[async_trait]
    impl PaymentsPort for FailingPaymentsPort {
        async fn insert(&self, _payment: Payment) -> Result<Payment, PortError> {
            Err(PortError::connection("payments store unavailable"))
        }

        async fn find_by_customer(&self, _: UserId) -> Result<Vec<Payment>, PortError> {
            Ok(vec![])
        }

        async fn sum_amounts(&self) -> Result<Money, PortError> {
            Ok(Money::zero(core_kernel::Currency::INR))
        }

        async fn sum_amounts_since(
            &self,
            _: DateTime<Utc>,
        ) -> Result<Money, PortError> {
            Ok(Money::zero(core_kernel::Currency::INR))
        }
    }

    #[tokio::test]
    async fn test_payment_failure_leaves_observable_pending_policy() {
        let catalog = Arc::new(MockCatalogPort::new());
        let policies = Arc::new(MockPolicyPort::new());
        let parties = Arc::new(MockPartyPort::new());
        let audit = Arc::new(MockAuditPort::new());
        let service = build_service(
            catalog.clone(),
            policies.clone(),
            parties.clone(),
            Arc::new(FailingPaymentsPort),
            audit.clone(),
        );

        let customer = Customer::new("Priya", "priya@example.com");
        let principal = Principal::customer(customer.id);
        parties.insert_customer(customer).await;
        let product = PolicyProduct {
            id: ProductId::new(),
            code: "HLTH-SECURE".to_string(),
            title: "Secure Health Cover".to_string(),
            premium: Money::inr(dec!(5000)),
            term_months: 12,
            is_active: true,
        };
        let product_id = product.id;
        catalog.insert(product).await;

        let err = service
            .purchase(
                &principal,
                purchase_request(product_id),
                &OperationMetadata::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::Payment(_)));

        // The first write of the saga is still visible: policy exists, Pending
        let stranded = policies.find_by_customer(principal.id).await.unwrap();
        assert_eq!(stranded.len(), 1);
        assert_eq!(stranded[0].status, PolicyStatus::Pending);
    }

    async fn purchased_policy(world: &World, customer: &Principal) -> UserPolicy {
        let product_id = seed_product(world, Money::inr(dec!(5000)), 12).await;
        world
            .service
            .purchase(
                customer,
                purchase_request(product_id),
                &OperationMetadata::default(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_cancel_within_window_succeeds() {
        let world = world().await;
        let customer = seed_customer(&world).await;
        let policy = purchased_policy(&world, &customer).await;

        let cancelled = world
            .service
            .cancel(&customer, policy.id, &OperationMetadata::default())
            .await
            .unwrap();
        assert_eq!(cancelled.status, PolicyStatus::Cancelled);

        let audited = world
            .audit
            .find(AuditQuery::by_action(AuditAction::PolicyCancelled))
            .await
            .unwrap();
        assert_eq!(audited.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_scenario_b_window_expired_on_day_20() {
        let world = world().await;
        let customer = seed_customer(&world).await;
        let mut policy = purchased_policy(&world, &customer).await;

        // Backdate the purchase 20 days
        policy.created_at = Utc::now() - Duration::days(20);
        world.policies.update(policy.clone()).await.unwrap();

        let err = world
            .service
            .cancel(&customer, policy.id, &OperationMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PolicyError::CancellationWindowExpired { window_days: 15 }
        ));
    }

    #[tokio::test]
    async fn test_cancel_already_cancelled_fails_invalid_state() {
        let world = world().await;
        let customer = seed_customer(&world).await;
        let policy = purchased_policy(&world, &customer).await;

        world
            .service
            .cancel(&customer, policy.id, &OperationMetadata::default())
            .await
            .unwrap();
        let err = world
            .service
            .cancel(&customer, policy.id, &OperationMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::AlreadyCancelled));
    }

    #[tokio::test]
    async fn test_cancel_expired_policy_fails_invalid_state() {
        let world = world().await;
        let customer = seed_customer(&world).await;
        let mut policy = purchased_policy(&world, &customer).await;

        policy.transition(PolicyStatus::Expired).unwrap();
        world.policies.update(policy.clone()).await.unwrap();

        let err = world
            .service
            .cancel(&customer, policy.id, &OperationMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::CannotCancelExpired));
    }

    #[tokio::test]
    async fn test_cancel_someone_elses_policy_fails_forbidden() {
        let world = world().await;
        let customer = seed_customer(&world).await;
        let policy = purchased_policy(&world, &customer).await;

        let other = seed_customer(&world).await;
        let err = world
            .service
            .cancel(&other, policy.id, &OperationMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::NotPolicyOwner));
    }

    #[tokio::test]
    async fn test_cancel_missing_policy_fails_not_found() {
        let world = world().await;
        let customer = seed_customer(&world).await;

        let err = world
            .service
            .cancel(
                &customer,
                UserPolicyId::new(),
                &OperationMetadata::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::PolicyNotFound(_)));
    }
}

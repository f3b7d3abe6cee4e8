//! Payment recorder
//!
//! Records a simulated, always-successful payment against a purchased
//! policy. This engine never models gateway failure, retries, or
//! asynchronous confirmation.

use std::sync::Arc;
use tracing::{info, instrument};

use core_kernel::{Money, OperationMetadata, Principal, UserPolicyId};
use domain_audit::{AuditAction, AuditTrail};

use crate::error::BillingError;
use crate::payment::{generate_reference, Payment, PaymentMethod};
use crate::ports::{PaymentsPort, PolicyOwnershipPort};

/// Request to record a payment
#[derive(Debug, Clone)]
pub struct RecordPaymentRequest {
    pub user_policy_id: UserPolicyId,
    pub amount: Money,
    pub method: PaymentMethod,
    /// Transaction reference; a `TXN-` identifier is generated when absent
    pub reference: Option<String>,
}

/// Records simulated payments
#[derive(Clone)]
pub struct PaymentRecorder {
    payments: Arc<dyn PaymentsPort>,
    policies: Arc<dyn PolicyOwnershipPort>,
    audit: AuditTrail,
}

impl PaymentRecorder {
    /// Creates a recorder over the given ports
    pub fn new(
        payments: Arc<dyn PaymentsPort>,
        policies: Arc<dyn PolicyOwnershipPort>,
        audit: AuditTrail,
    ) -> Self {
        Self {
            payments,
            policies,
            audit,
        }
    }

    /// Records a payment for a policy
    ///
    /// The policy must exist, and a customer principal must own it. The
    /// created record is `SUCCESS` and is never mutated afterwards.
    ///
    /// # Errors
    ///
    /// - `PolicyNotFound` when the policy is absent
    /// - `NotPolicyOwner` when a customer pays on someone else's policy
    /// - `Validation` when the amount is not positive
    #[instrument(skip(self, request, meta), fields(principal = %principal.id, policy = %request.user_policy_id))]
    pub async fn record(
        &self,
        principal: &Principal,
        request: RecordPaymentRequest,
        meta: &OperationMetadata,
    ) -> Result<Payment, BillingError> {
        if !request.amount.is_positive() {
            return Err(BillingError::Validation(
                "Payment amount must be positive".to_string(),
            ));
        }

        let owner = self
            .policies
            .owner_of(request.user_policy_id)
            .await
            .map_err(|e| match e {
                e if e.is_not_found() => {
                    BillingError::PolicyNotFound(request.user_policy_id.to_string())
                }
                e => BillingError::Port(e),
            })?;

        if principal.is_customer() && owner != principal.id {
            return Err(BillingError::NotPolicyOwner);
        }

        let reference = request.reference.unwrap_or_else(generate_reference);
        let payment = Payment::succeeded(
            owner,
            request.user_policy_id,
            request.amount,
            request.method,
            reference,
        );
        let payment = self.payments.insert(payment).await?;

        self.audit
            .record(
                AuditAction::PaymentProcessed,
                principal.id,
                None,
                format!(
                    "Payment of {} recorded for policy {}",
                    payment.amount, payment.user_policy_id
                ),
                meta.ip_or_unknown(),
            )
            .await?;

        info!(payment_id = %payment.id, reference = %payment.reference, "payment recorded");
        Ok(payment)
    }
}

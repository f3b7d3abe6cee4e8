//! Claim lifecycle service
//!
//! Filing inherits the policy's agent (or resolves one), decisions are
//! bound to the assigned agent, and administrators may override anything.

use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use chrono::{NaiveDate, Utc};
use core_kernel::{ClaimId, Money, OperationMetadata, Principal, UserId, UserPolicyId};
use domain_audit::{AuditAction, AuditTrail};
use domain_party::AgentAssignmentResolver;
use domain_policy::PolicyPort;

use crate::claim::{Claim, ClaimDecision, ClaimStatus};
use crate::error::ClaimError;
use crate::ports::{ClaimsPort, MessagingPort};

/// Request to file a claim
#[derive(Debug, Clone, Validate)]
pub struct FileClaimRequest {
    pub user_policy_id: UserPolicyId,
    pub incident_date: NaiveDate,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub amount_claimed: Money,
}

/// Request for additional documents on a claim
#[derive(Debug, Clone, Validate)]
pub struct RequestInfoRequest {
    #[validate(length(min = 1, message = "at least one document must be requested"))]
    pub required_documents: Vec<String>,
    pub message: Option<String>,
}

/// Creates and transitions claims filed against purchased policies
#[derive(Clone)]
pub struct ClaimService {
    claims: Arc<dyn ClaimsPort>,
    policies: Arc<dyn PolicyPort>,
    resolver: AgentAssignmentResolver,
    messaging: Arc<dyn MessagingPort>,
    audit: AuditTrail,
}

impl ClaimService {
    /// Creates the service over its collaborator ports
    pub fn new(
        claims: Arc<dyn ClaimsPort>,
        policies: Arc<dyn PolicyPort>,
        resolver: AgentAssignmentResolver,
        messaging: Arc<dyn MessagingPort>,
        audit: AuditTrail,
    ) -> Self {
        Self {
            claims,
            policies,
            resolver,
            messaging,
            audit,
        }
    }

    /// Files a claim against a policy the customer owns
    ///
    /// The assigned agent is inherited from the policy; failing that, the
    /// resolver falls back to the customer's persisted agent or assigns a
    /// fresh one. An unassigned claim is accepted when no agent exists.
    #[instrument(skip(self, request, meta), fields(customer = %customer.id, policy = %request.user_policy_id))]
    pub async fn file(
        &self,
        customer: &Principal,
        request: FileClaimRequest,
        meta: &OperationMetadata,
    ) -> Result<Claim, ClaimError> {
        request
            .validate()
            .map_err(|e| ClaimError::Validation(e.to_string()))?;
        if !request.amount_claimed.is_positive() {
            return Err(ClaimError::Validation(
                "Claimed amount must be positive".to_string(),
            ));
        }

        let policy = self
            .policies
            .get(request.user_policy_id)
            .await
            .map_err(|e| match e {
                e if e.is_not_found() => {
                    ClaimError::PolicyNotFound(request.user_policy_id.to_string())
                }
                e => ClaimError::Port(e),
            })?;

        if policy.customer_id != customer.id {
            return Err(ClaimError::NotPolicyOwner);
        }

        // Inheritance order: policy's agent, then the customer's persisted
        // agent, then a fresh resolution
        let assigned_agent_id = match policy.assigned_agent_id {
            Some(agent_id) => Some(agent_id),
            None => self.resolver.resolve(customer.id, meta).await?,
        };

        let claim = Claim::file(
            customer.id,
            request.user_policy_id,
            request.incident_date,
            request.description,
            request.amount_claimed,
            assigned_agent_id,
        );
        let claim = self.claims.insert(claim).await?;

        self.audit
            .record(
                AuditAction::ClaimCreated,
                customer.id,
                None,
                format!(
                    "Claim {} filed against policy {}",
                    claim.id, claim.user_policy_id
                ),
                meta.ip_or_unknown(),
            )
            .await?;

        info!(claim_id = %claim.id, agent = ?claim.assigned_agent_id, "claim filed");
        Ok(claim)
    }

    /// Decides a claim (approve or reject)
    ///
    /// Only the assigned agent may decide; a claim with no assigned agent
    /// is claimed by the first agent to touch it. Terminal claims are
    /// immutable to agents.
    #[instrument(skip(self, meta), fields(agent = %agent.id, claim = %claim_id))]
    pub async fn decide(
        &self,
        agent: &Principal,
        claim_id: ClaimId,
        decision: ClaimDecision,
        notes: Option<String>,
        meta: &OperationMetadata,
    ) -> Result<Claim, ClaimError> {
        if !agent.is_agent() {
            return Err(ClaimError::AgentRoleRequired);
        }

        let mut claim = self.load_for_agent(agent, claim_id).await?;

        claim.transition(decision.to_status())?;
        claim.decision_notes = notes.clone();
        claim.decided_by_agent_id = Some(agent.id);
        claim.decided_at = Some(Utc::now());
        let claim = self.claims.update(claim).await?;

        let action = match decision {
            ClaimDecision::Approved => AuditAction::ClaimApproved,
            ClaimDecision::Rejected => AuditAction::ClaimRejected,
        };
        self.audit
            .record(
                action,
                agent.id,
                Some(claim.customer_id),
                format!("Claim {} {}", claim.id, decision.as_past_tense()),
                meta.ip_or_unknown(),
            )
            .await?;

        let body = match &notes {
            Some(notes) => format!(
                "Your claim has been {}. Notes: {notes}",
                decision.as_past_tense()
            ),
            None => format!("Your claim has been {}.", decision.as_past_tense()),
        };
        self.notify_quietly(claim.customer_id, "Claim Status Updated", &body, claim.id)
            .await;

        info!(claim_id = %claim.id, status = ?claim.status, "claim decided");
        Ok(claim)
    }

    /// Requests additional documents from the customer
    ///
    /// Same authorization as [`ClaimService::decide`]. Moves a `Pending`
    /// claim to `NeedsInfo`; re-requesting on a `NeedsInfo` claim replaces
    /// the document list.
    #[instrument(skip(self, request, meta), fields(agent = %agent.id, claim = %claim_id))]
    pub async fn request_info(
        &self,
        agent: &Principal,
        claim_id: ClaimId,
        request: RequestInfoRequest,
        meta: &OperationMetadata,
    ) -> Result<Claim, ClaimError> {
        if !agent.is_agent() {
            return Err(ClaimError::AgentRoleRequired);
        }
        request
            .validate()
            .map_err(|e| ClaimError::Validation(e.to_string()))?;

        let mut claim = self.load_for_agent(agent, claim_id).await?;

        if claim.status == ClaimStatus::Pending {
            claim.transition(ClaimStatus::NeedsInfo)?;
        }
        claim.required_documents = request.required_documents.clone();
        claim.updated_at = Utc::now();
        let claim = self.claims.update(claim).await?;

        self.audit
            .record(
                AuditAction::ClaimUpdated,
                agent.id,
                Some(claim.customer_id),
                format!("Additional documents requested for claim {}", claim.id),
                meta.ip_or_unknown(),
            )
            .await?;

        let mut body = format!(
            "Please provide the following documents: {}.",
            request.required_documents.join(", ")
        );
        if let Some(message) = &request.message {
            body.push(' ');
            body.push_str(message);
        }
        self.notify_quietly(
            claim.customer_id,
            "Additional Documents Required",
            &body,
            claim.id,
        )
        .await;

        info!(claim_id = %claim.id, "documents requested");
        Ok(claim)
    }

    /// Cancels the customer's own claim while it is still pending
    #[instrument(skip(self, meta), fields(customer = %customer.id, claim = %claim_id))]
    pub async fn cancel(
        &self,
        customer: &Principal,
        claim_id: ClaimId,
        meta: &OperationMetadata,
    ) -> Result<Claim, ClaimError> {
        let mut claim = self.claims.get(claim_id).await.map_err(|e| match e {
            e if e.is_not_found() => ClaimError::ClaimNotFound(claim_id.to_string()),
            e => ClaimError::Port(e),
        })?;

        if claim.customer_id != customer.id {
            return Err(ClaimError::NotClaimOwner);
        }
        if claim.status != ClaimStatus::Pending {
            return Err(ClaimError::OnlyPendingCancellable);
        }

        claim.transition(ClaimStatus::Cancelled)?;
        claim.decision_notes = Some("Cancelled by customer".to_string());
        claim.decided_at = Some(Utc::now());
        let claim = self.claims.update(claim).await?;

        self.audit
            .record(
                AuditAction::ClaimUpdated,
                customer.id,
                None,
                format!("Claim {} cancelled by customer", claim.id),
                meta.ip_or_unknown(),
            )
            .await?;

        info!(claim_id = %claim.id, "claim cancelled by customer");
        Ok(claim)
    }

    /// Administrator override: sets any status unconditionally
    ///
    /// Bypasses both the assignment check and the transition table; the
    /// administrator is recorded as the decider.
    #[instrument(skip(self, meta), fields(admin = %admin.id, claim = %claim_id))]
    pub async fn admin_override(
        &self,
        admin: &Principal,
        claim_id: ClaimId,
        status: ClaimStatus,
        notes: Option<String>,
        meta: &OperationMetadata,
    ) -> Result<Claim, ClaimError> {
        if !admin.is_admin() {
            return Err(ClaimError::AdminRoleRequired);
        }

        let mut claim = self.claims.get(claim_id).await.map_err(|e| match e {
            e if e.is_not_found() => ClaimError::ClaimNotFound(claim_id.to_string()),
            e => ClaimError::Port(e),
        })?;

        claim.force_status(status);
        if notes.is_some() {
            claim.decision_notes = notes;
        }
        claim.decided_by_agent_id = Some(admin.id);
        claim.decided_at = Some(Utc::now());
        let claim = self.claims.update(claim).await?;

        let action = match status {
            ClaimStatus::Approved => AuditAction::ClaimApproved,
            ClaimStatus::Rejected => AuditAction::ClaimRejected,
            _ => AuditAction::ClaimUpdated,
        };
        self.audit
            .record(
                action,
                admin.id,
                Some(claim.customer_id),
                format!(
                    "Claim {} status set to {:?} by administrator",
                    claim.id, claim.status
                ),
                meta.ip_or_unknown(),
            )
            .await?;

        let phrase = match status {
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Cancelled => "cancelled",
            ClaimStatus::Pending => "reopened for review",
            ClaimStatus::NeedsInfo => "marked as needing more information",
        };
        let body = format!("Your claim has been {phrase}.");
        self.notify_quietly(claim.customer_id, "Claim Status Updated", &body, claim.id)
            .await;

        info!(claim_id = %claim.id, status = ?claim.status, "claim overridden by administrator");
        Ok(claim)
    }

    /// Loads a claim for an agent operation, enforcing assignment
    ///
    /// First touch assigns: an unassigned claim is bound to the calling
    /// agent here, so the assignment and the subsequent update land in the
    /// same write.
    async fn load_for_agent(
        &self,
        agent: &Principal,
        claim_id: ClaimId,
    ) -> Result<Claim, ClaimError> {
        let mut claim = self.claims.get(claim_id).await.map_err(|e| match e {
            e if e.is_not_found() => ClaimError::ClaimNotFound(claim_id.to_string()),
            e => ClaimError::Port(e),
        })?;

        if let Some(assigned) = claim.assigned_agent_id {
            if assigned != agent.id {
                return Err(ClaimError::NotAssignedAgent);
            }
        }
        if claim.status.is_terminal() {
            return Err(ClaimError::AlreadyDecided);
        }
        if claim.assigned_agent_id.is_none() {
            claim.assigned_agent_id = Some(agent.id);
        }
        Ok(claim)
    }

    /// Fire-and-forget notification; failures are logged, never surfaced
    async fn notify_quietly(&self, to: UserId, subject: &str, body: &str, claim_id: ClaimId) {
        if let Err(e) = self
            .messaging
            .notify(to, subject, body, Some(claim_id))
            .await
        {
            warn!(claim_id = %claim_id, error = %e, "customer notification failed");
        }
    }
}

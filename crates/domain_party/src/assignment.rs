//! Agent assignment
//!
//! When a customer first needs an agent (at purchase or claim time) the
//! resolver picks one from the active set, persists the choice on the
//! customer record so later resolutions are stable, and records the
//! assignment. No active agent is not an error: callers must accept an
//! unassigned policy or claim.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use core_kernel::{OperationMetadata, UserId};
use domain_audit::{AuditAction, AuditTrail};

use crate::agent::Agent;
use crate::error::PartyError;
use crate::ports::PartyPort;

/// Picks an agent from the candidate set
///
/// Injectable so load-balancing policies can be swapped without touching
/// lifecycle code.
pub trait AssignmentStrategy: Send + Sync + 'static {
    /// Returns the chosen agent's id, or `None` if no candidate is usable
    fn assign(&self, candidates: &[Agent]) -> Option<UserId>;
}

/// Default strategy: the first active agent found
///
/// No load balancing; concurrent first-time resolutions may pile onto the
/// same agent, an accepted imbalance.
#[derive(Debug, Default)]
pub struct FirstActiveStrategy;

impl AssignmentStrategy for FirstActiveStrategy {
    fn assign(&self, candidates: &[Agent]) -> Option<UserId> {
        candidates.iter().find(|a| a.is_active()).map(|a| a.id)
    }
}

/// Resolves and persists the agent responsible for a customer
#[derive(Clone)]
pub struct AgentAssignmentResolver {
    parties: Arc<dyn PartyPort>,
    audit: AuditTrail,
    strategy: Arc<dyn AssignmentStrategy>,
}

impl AgentAssignmentResolver {
    /// Creates a resolver with the default first-active strategy
    pub fn new(parties: Arc<dyn PartyPort>, audit: AuditTrail) -> Self {
        Self::with_strategy(parties, audit, Arc::new(FirstActiveStrategy))
    }

    /// Creates a resolver with an injected strategy
    pub fn with_strategy(
        parties: Arc<dyn PartyPort>,
        audit: AuditTrail,
        strategy: Arc<dyn AssignmentStrategy>,
    ) -> Self {
        Self {
            parties,
            audit,
            strategy,
        }
    }

    /// Returns the agent responsible for the customer
    ///
    /// An already-persisted assignment is returned unchanged. Otherwise a
    /// new agent is selected, persisted on the customer record, and
    /// returned. `Ok(None)` means no active agent exists.
    #[instrument(skip(self, meta), fields(customer = %customer_id))]
    pub async fn resolve(
        &self,
        customer_id: UserId,
        meta: &OperationMetadata,
    ) -> Result<Option<UserId>, PartyError> {
        let customer = self
            .parties
            .get_customer(customer_id)
            .await
            .map_err(|e| match e {
                e if e.is_not_found() => PartyError::CustomerNotFound(customer_id.to_string()),
                e => PartyError::Port(e),
            })?;

        if let Some(agent_id) = customer.assigned_agent_id {
            debug!(%agent_id, "existing assignment reused");
            return Ok(Some(agent_id));
        }

        let candidates = self.parties.find_active_agents().await?;
        let Some(agent_id) = self.strategy.assign(&candidates) else {
            warn!("no active agent available; leaving customer unassigned");
            return Ok(None);
        };

        self.parties
            .set_assigned_agent(customer_id, agent_id)
            .await?;
        self.audit
            .record(
                AuditAction::AgentAssigned,
                customer_id,
                Some(agent_id),
                format!("Agent {agent_id} auto-assigned to customer {customer_id}"),
                meta.ip_or_unknown(),
            )
            .await?;

        debug!(%agent_id, "new assignment persisted");
        Ok(Some(agent_id))
    }
}

//! Party Domain Ports
//!
//! The `PartyPort` trait defines everything the lifecycle engine needs from
//! the user store: customer lookup, the active-agent set, persisting an
//! assignment, and the handful of counts the dashboards read.
//!
//! Adapters can be internal (database) or external (account service API);
//! the in-memory mock below is the adapter used throughout the test suite.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, Role, UserId};

use crate::agent::Agent;
use crate::customer::Customer;

/// Storage port for customers and agents
#[async_trait]
pub trait PartyPort: DomainPort {
    /// Retrieves a customer by ID
    async fn get_customer(&self, id: UserId) -> Result<Customer, PortError>;

    /// Retrieves an agent by ID
    async fn get_agent(&self, id: UserId) -> Result<Agent, PortError>;

    /// Returns all currently-active agents
    ///
    /// Read without locking; concurrent first-time resolutions may observe
    /// the same set (spec'd last-write-wins on the assignment).
    async fn find_active_agents(&self) -> Result<Vec<Agent>, PortError>;

    /// Persists a customer's agent assignment
    async fn set_assigned_agent(
        &self,
        customer_id: UserId,
        agent_id: UserId,
    ) -> Result<Customer, PortError>;

    /// Counts users holding the given role
    async fn count_by_role(&self, role: Role) -> Result<u64, PortError>;

    /// Counts customers assigned to the given agent
    async fn count_customers_assigned_to(&self, agent_id: UserId) -> Result<u64, PortError>;
}

/// In-memory mock implementation of `PartyPort` for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory user store
    ///
    /// Active agents are returned in insertion order, so the first inserted
    /// active agent is what the first-active strategy will pick.
    #[derive(Debug, Default)]
    pub struct MockPartyPort {
        customers: Arc<RwLock<HashMap<UserId, Customer>>>,
        agents: Arc<RwLock<Vec<Agent>>>,
        admin_count: Arc<RwLock<u64>>,
    }

    impl MockPartyPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a customer to the store
        pub async fn insert_customer(&self, customer: Customer) {
            self.customers
                .write()
                .await
                .insert(customer.id, customer);
        }

        /// Adds an agent to the store
        pub async fn insert_agent(&self, agent: Agent) {
            self.agents.write().await.push(agent);
        }

        /// Bumps the admin tally used by `count_by_role`
        pub async fn add_admins(&self, count: u64) {
            *self.admin_count.write().await += count;
        }
    }

    impl DomainPort for MockPartyPort {}

    #[async_trait]
    impl PartyPort for MockPartyPort {
        async fn get_customer(&self, id: UserId) -> Result<Customer, PortError> {
            self.customers
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Customer", id))
        }

        async fn get_agent(&self, id: UserId) -> Result<Agent, PortError> {
            self.agents
                .read()
                .await
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Agent", id))
        }

        async fn find_active_agents(&self) -> Result<Vec<Agent>, PortError> {
            Ok(self
                .agents
                .read()
                .await
                .iter()
                .filter(|a| a.is_active())
                .cloned()
                .collect())
        }

        async fn set_assigned_agent(
            &self,
            customer_id: UserId,
            agent_id: UserId,
        ) -> Result<Customer, PortError> {
            let mut customers = self.customers.write().await;
            let customer = customers
                .get_mut(&customer_id)
                .ok_or_else(|| PortError::not_found("Customer", customer_id))?;
            customer.assigned_agent_id = Some(agent_id);
            Ok(customer.clone())
        }

        async fn count_by_role(&self, role: Role) -> Result<u64, PortError> {
            match role {
                Role::Customer => Ok(self.customers.read().await.len() as u64),
                Role::Agent => Ok(self.agents.read().await.len() as u64),
                Role::Admin => Ok(*self.admin_count.read().await),
            }
        }

        async fn count_customers_assigned_to(&self, agent_id: UserId) -> Result<u64, PortError> {
            Ok(self
                .customers
                .read()
                .await
                .values()
                .filter(|c| c.assigned_agent_id == Some(agent_id))
                .count() as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockPartyPort;
    use super::*;
    use crate::agent::AgentStatus;

    #[tokio::test]
    async fn test_mock_port_customer_round_trip() {
        let port = MockPartyPort::new();
        let customer = Customer::new("Priya Sharma", "priya@example.com");
        let id = customer.id;
        port.insert_customer(customer).await;

        let loaded = port.get_customer(id).await.unwrap();
        assert_eq!(loaded.email, "priya@example.com");
    }

    #[tokio::test]
    async fn test_mock_port_customer_not_found() {
        let port = MockPartyPort::new();
        let result = port.get_customer(UserId::new()).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_find_active_agents_excludes_inactive() {
        let port = MockPartyPort::new();
        let mut inactive = Agent::new("Dormant", "dormant@example.com");
        inactive.status = AgentStatus::Inactive;
        port.insert_agent(inactive).await;
        port.insert_agent(Agent::new("Ravi", "ravi@example.com")).await;

        let active = port.find_active_agents().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Ravi");
    }

    #[tokio::test]
    async fn test_get_agent_round_trip() {
        let port = MockPartyPort::new();
        let agent = Agent::new("Ravi", "ravi@example.com");
        let id = agent.id;
        port.insert_agent(agent).await;

        let loaded = port.get_agent(id).await.unwrap();
        assert_eq!(loaded.email, "ravi@example.com");
        assert!(port.get_agent(UserId::new()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_set_assigned_agent_persists() {
        let port = MockPartyPort::new();
        let customer = Customer::new("Priya", "priya@example.com");
        let customer_id = customer.id;
        port.insert_customer(customer).await;
        let agent_id = UserId::new();

        port.set_assigned_agent(customer_id, agent_id).await.unwrap();
        let loaded = port.get_customer(customer_id).await.unwrap();
        assert_eq!(loaded.assigned_agent_id, Some(agent_id));
    }
}

//! Party Domain
//!
//! Customers, agents, and the rules binding them: how a sales agent becomes
//! responsible for a customer, and how that responsibility stays stable
//! once persisted.

pub mod agent;
pub mod assignment;
pub mod customer;
pub mod error;
pub mod ports;

pub use agent::{Agent, AgentStatus};
pub use assignment::{AgentAssignmentResolver, AssignmentStrategy, FirstActiveStrategy};
pub use customer::Customer;
pub use error::PartyError;
pub use ports::PartyPort;

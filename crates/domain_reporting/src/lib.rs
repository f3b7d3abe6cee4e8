//! Reporting Domain
//!
//! Role-scoped, read-only rollups over policies, claims, payments, and
//! parties. Every figure is computed by a direct scan of the stores at
//! read time; nothing here caches, and nothing here mutates.

pub mod aggregator;
pub mod error;
pub mod views;

pub use aggregator::DashboardAggregator;
pub use error::ReportingError;
pub use views::{
    AdminDashboard, AgentDashboard, ClaimSummary, CustomerDashboard, PolicySummary,
};

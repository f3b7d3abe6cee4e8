//! Test Utilities Crate
//!
//! Shared test infrastructure for the brokerage lifecycle engine suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators
//! - `logging`: One-shot tracing initialisation for test output
//! - `world`: The in-memory world wiring every mock port and service

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod logging;
pub mod world;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use logging::init_tracing;
pub use world::TestWorld;

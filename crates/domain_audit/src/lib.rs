//! Audit Trail Domain
//!
//! Append-only recording of every state-changing action on the platform.
//! Entries are never updated or deleted; listing and filtering exist only
//! for the admin activity views.

pub mod entry;
pub mod ports;
pub mod trail;

pub use entry::{AuditAction, AuditEntry};
pub use ports::{AuditPort, AuditQuery};
pub use trail::AuditTrail;

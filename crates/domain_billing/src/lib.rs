//! Billing Domain
//!
//! Payment recording for policy purchases. Payments here are simulated:
//! once recorded they are `SUCCESS` and never mutated. Gateway failure,
//! retries, and asynchronous confirmation are deliberately out of scope.

pub mod error;
pub mod payment;
pub mod ports;
pub mod recorder;

pub use error::BillingError;
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use ports::{PaymentsPort, PolicyOwnershipPort};
pub use recorder::{PaymentRecorder, RecordPaymentRequest};

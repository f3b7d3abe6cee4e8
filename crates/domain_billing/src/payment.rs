//! Payment records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PaymentId, UserId, UserPolicyId};

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Netbanking,
    Offline,
    Simulated,
    Upi,
}

/// Payment status
///
/// The simulated path creates payments already `Success`; `Pending` and
/// `Failed` exist for data recorded by earlier system versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

/// A recorded payment tied to a purchased policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Paying customer
    pub customer_id: UserId,
    /// The purchased policy this payment covers
    pub user_policy_id: UserPolicyId,
    /// Amount paid
    pub amount: Money,
    /// Payment method
    pub method: PaymentMethod,
    /// Transaction reference
    pub reference: String,
    /// Status
    pub status: PaymentStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a successful payment record
    pub fn succeeded(
        customer_id: UserId,
        user_policy_id: UserPolicyId,
        amount: Money,
        method: PaymentMethod,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            id: PaymentId::new_v7(),
            customer_id,
            user_policy_id,
            amount,
            method,
            reference: reference.into(),
            status: PaymentStatus::Success,
            created_at: Utc::now(),
        }
    }
}

/// Generates a transaction reference for payments submitted without one
pub(crate) fn generate_reference() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("TXN-{}", duration.as_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_succeeded_payment_is_success() {
        let payment = Payment::succeeded(
            UserId::new(),
            UserPolicyId::new(),
            Money::inr(dec!(5000)),
            PaymentMethod::Simulated,
            "TXN-1",
        );
        assert_eq!(payment.status, PaymentStatus::Success);
    }

    #[test]
    fn test_method_wire_format() {
        let json = serde_json::to_string(&PaymentMethod::Netbanking).unwrap();
        assert_eq!(json, "\"NETBANKING\"");
        let json = serde_json::to_string(&PaymentMethod::Upi).unwrap();
        assert_eq!(json, "\"UPI\"");
    }

    #[test]
    fn test_generated_reference_shape() {
        let reference = generate_reference();
        assert!(reference.starts_with("TXN-"));
        assert!(reference.len() > 4);
    }
}

//! Pre-built Test Fixtures
//!
//! Ready-to-use, predictable test data for common entities.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{ClaimId, Money, ProductId, UserId, UserPolicyId};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standard health-cover premium used across scenarios
    pub fn premium_5000() -> Money {
        Money::inr(dec!(5000.00))
    }

    /// A large premium for commission calculations
    pub fn premium_100000() -> Money {
        Money::inr(dec!(100000.00))
    }

    /// A typical claimed amount
    pub fn claim_amount() -> Money {
        Money::inr(dec!(25000.00))
    }

    /// A zero amount
    pub fn zero() -> Money {
        Money::inr(dec!(0))
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard purchase timestamp (Jan 1, 2025)
    pub fn purchase_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    /// The end of a 12-month term started at [`Self::purchase_date`]
    pub fn one_year_later() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    /// Standard incident date for claims
    pub fn incident_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// A deterministic user ID
    pub fn user_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// A deterministic product ID
    pub fn product_id() -> ProductId {
        ProductId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// A deterministic policy ID
    pub fn user_policy_id() -> UserPolicyId {
        UserPolicyId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// A deterministic claim ID
    pub fn claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }
}

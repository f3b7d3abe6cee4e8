//! Property-Based Test Generators
//!
//! Proptest strategies for generating random domain data that maintains
//! invariants.

use core_kernel::{Currency, Money};
use domain_claims::ClaimStatus;
use domain_policy::PolicyStatus;
use proptest::prelude::*;

/// Strategy for positive amounts in minor units (paise)
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for positive INR Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::INR))
}

/// Strategy for policy term lengths in months
pub fn term_months_strategy() -> impl Strategy<Value = u32> {
    1u32..=120u32
}

/// Strategy for any policy status
pub fn policy_status_strategy() -> impl Strategy<Value = PolicyStatus> {
    prop_oneof![
        Just(PolicyStatus::Pending),
        Just(PolicyStatus::Active),
        Just(PolicyStatus::Cancelled),
        Just(PolicyStatus::Expired),
    ]
}

/// Strategy for any claim status
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
        Just(ClaimStatus::Cancelled),
        Just(ClaimStatus::NeedsInfo),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_money_is_positive(money in positive_money_strategy()) {
            prop_assert!(money.is_positive());
        }

        #[test]
        fn generated_terms_are_usable(term in term_months_strategy()) {
            prop_assert!(term >= 1);
            prop_assert!(term <= 600);
        }
    }
}

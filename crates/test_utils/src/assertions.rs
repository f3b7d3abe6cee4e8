//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than the standard macros.

use core_kernel::{ErrorKind, Money};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {money}"
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {money}");
}

/// Asserts that an error classifies to the expected kind
pub fn assert_kind(actual: ErrorKind, expected: ErrorKind) {
    assert_eq!(
        actual, expected,
        "Expected error kind {expected}, got {actual}"
    );
}

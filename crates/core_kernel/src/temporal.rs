//! Temporal helpers for policy terms and rule windows
//!
//! Policy terms are expressed in calendar months and the cancellation rule
//! is a day-count window from the purchase timestamp; both live here so the
//! arithmetic is identical everywhere it is applied.

use chrono::{DateTime, Duration, Months, Utc};

/// Adds a number of calendar months to a timestamp.
///
/// Day-of-month overflow clamps to the last day of the target month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(start: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    start
        .checked_add_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Returns true if `now` is within `window_days` days of `since` (inclusive).
pub fn within_window_days(since: DateTime<Utc>, now: DateTime<Utc>, window_days: u32) -> bool {
    now - since <= Duration::days(window_days as i64)
}

/// Returns the timestamp `days` days before `now`, for trailing-window queries.
pub fn trailing_window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(days as i64)
}

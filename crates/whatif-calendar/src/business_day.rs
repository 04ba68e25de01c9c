//! Working-day walker and counters
//!
//! All functions operate on [`NaiveDate`], so callers normalize to a single
//! time zone before calling in.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Working days in any run of seven consecutive calendar days
pub const BUSINESS_DAYS_PER_WEEK: u64 = 5;

const DAYS_PER_WEEK: u64 = 7;

/// Check whether `date` is a working day (Monday to Friday)
#[inline]
#[must_use]
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Signed number of calendar days from `from` to `to`
///
/// Positive when `to` is later than `from`.
#[inline]
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Advance `start` by `days` working days
///
/// Only days that are not Saturday or Sunday count toward `days`. The start
/// date itself is never counted, so `days == 0` returns `start` unchanged even
/// when `start` falls on a weekend.
///
/// Returns `None` if the walk runs past the last representable date.
#[must_use]
pub fn add_business_days(start: NaiveDate, days: u64) -> Option<NaiveDate> {
    if days == 0 {
        return Some(start);
    }

    // Every 7 calendar days hold exactly 5 working days, so whole weeks can be
    // skipped as long as at least one working day is left to walk.
    let whole_weeks = (days - 1) / BUSINESS_DAYS_PER_WEEK;
    let mut current = start.checked_add_days(Days::new(whole_weeks * DAYS_PER_WEEK))?;
    let mut remaining = days - whole_weeks * BUSINESS_DAYS_PER_WEEK;

    while remaining > 0 {
        current = current.succ_opt()?;
        if is_business_day(current) {
            remaining -= 1;
        }
    }

    Some(current)
}

/// Roll `date` forward to the first working day on or after it
#[must_use]
pub fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    let mut current = date;
    while !is_business_day(current) {
        current = current.succ_opt()?;
    }
    Some(current)
}

/// Count working days in the half-open range `(from, to]`
///
/// Negative when `to` is earlier than `from`, mirroring [`days_between`].
#[must_use]
pub fn business_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    if to < from {
        return -business_days_between(to, from);
    }

    let span = days_between(from, to).unsigned_abs();
    let whole_weeks = span / DAYS_PER_WEEK;
    let mut count = whole_weeks * BUSINESS_DAYS_PER_WEEK;

    let mut current = from + Days::new(whole_weeks * DAYS_PER_WEEK);
    while current < to {
        current = current + Days::new(1);
        if is_business_day(current) {
            count += 1;
        }
    }

    i64::try_from(count).unwrap_or(i64::MAX)
}

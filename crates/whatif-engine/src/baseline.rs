//! Baseline resolution
//!
//! Normalizes the due date to a UTC calendar date and measures it against
//! today. The anchor for day-counting is always today, so an overdue item is
//! never walked from a date already in the past.

use crate::error::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use whatif_calendar::days_between;

/// Tracker timestamps carry offsets without a colon (`+0000`)
const TRACKER_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Resolved anchor and deadline figures for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    /// Anchor for walking; always the simulation date
    pub today: NaiveDate,
    /// Normalized due date
    pub original_date: Option<NaiveDate>,
    /// Calendar days from today to the due date, floored at zero
    pub remaining_days: u64,
    /// Due date strictly before today
    pub is_overdue: bool,
}

/// Resolve the baseline for an already-parsed due date
#[must_use]
pub fn resolve_baseline(due_date: Option<NaiveDate>, today: NaiveDate) -> Baseline {
    let remaining_days = due_date
        .map(|due| days_between(today, due).max(0).unsigned_abs())
        .unwrap_or(0);

    Baseline {
        today,
        original_date: due_date,
        remaining_days,
        is_overdue: due_date.is_some_and(|due| due < today),
    }
}

/// Resolve the baseline for an unparsed due date
///
/// # Errors
/// Returns [`ValidationError::MalformedDate`] if the due date cannot be parsed.
pub fn resolve_baseline_str(
    due_date: Option<&str>,
    today: NaiveDate,
) -> Result<Baseline, ValidationError> {
    let due_date = due_date.map(parse_due_date).transpose()?;
    Ok(resolve_baseline(due_date, today))
}

/// Parse a due date into a UTC calendar date
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and tracker timestamps with a
/// colon-less offset. Timestamps are converted to UTC before the time of day
/// is dropped.
///
/// # Errors
/// Returns [`ValidationError::MalformedDate`] for anything else, including the
/// empty string.
pub fn parse_due_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::malformed_date(input, "empty input"));
    }

    if !trimmed.contains('T') {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|e| ValidationError::malformed_date(input, e));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, TRACKER_TIMESTAMP))
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|e| ValidationError::malformed_date(input, e))
}

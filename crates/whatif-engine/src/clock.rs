//! Injected notion of "today"
//!
//! The engine never reads the system clock itself; callers pass a [`Clock`].

use chrono::{NaiveDate, Utc};

/// Source of the current UTC calendar date
pub trait Clock: Send + Sync {
    /// Current date in UTC
    fn today(&self) -> NaiveDate;
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    #[inline]
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Wall clock, read in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_stable() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        let clock = FixedClock(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.today(), clock.today());
    }
}

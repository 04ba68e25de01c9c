//! Business-day calendar arithmetic
//!
//! Pure date helpers with no knowledge of backlogs or forecasting:
//! - Walking forward a number of working days
//! - Counting working days between two dates
//! - Signed calendar-day differences
//!
//! A business day is any day that is not Saturday or Sunday.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use whatif_calendar::add_business_days;
//!
//! let tuesday = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
//! let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
//! assert_eq!(add_business_days(tuesday, 4), Some(monday));
//! ```

#![warn(unreachable_pub)]

pub mod business_day;

pub use business_day::{
    add_business_days, business_days_between, days_between, is_business_day, next_business_day,
    BUSINESS_DAYS_PER_WEEK,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

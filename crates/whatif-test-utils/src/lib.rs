//! Testing utilities for the what-if workspace
//!
//! Shared fixtures for the reference week around New Year 2026, which
//! crosses a weekend right after the Tuesday used as "today".

#![allow(missing_docs)]

use chrono::NaiveDate;
use whatif_engine::{BacklogItem, FixedClock, RawBacklogItem, RiskDrivers};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Tuesday 2025-12-30
pub fn reference_today() -> NaiveDate {
    date(2025, 12, 30)
}

pub fn reference_clock() -> FixedClock {
    FixedClock(reference_today())
}

/// Item due Wednesday 2025-12-31, one day after the reference today
pub fn item_due_tomorrow(key: &str) -> BacklogItem {
    BacklogItem::new(key).with_due_date(date(2025, 12, 31))
}

pub fn drivers(cognitive_load: f64, system_complexity: f64, absence_risk: f64) -> RiskDrivers {
    RiskDrivers::new(cognitive_load, system_complexity, absence_risk).unwrap()
}

pub fn raw_item(key: &str, due_date: Option<&str>, assignee_id: Option<&str>) -> RawBacklogItem {
    RawBacklogItem {
        key: key.to_string(),
        due_date: due_date.map(str::to_string),
        assignee_id: assignee_id.map(str::to_string),
        summary: None,
        status: None,
        priority: None,
    }
}

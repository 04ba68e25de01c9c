//! Risk classification and result assembly

use crate::baseline::Baseline;
use crate::config::EngineConfig;
use crate::types::{DurationBreakdown, ForecastResult, RiskLevel};
use chrono::NaiveDate;
use whatif_calendar::days_between;

/// Tier a risk-day count against the configured thresholds
#[inline]
#[must_use]
pub fn classify_risk(risk_days: u64, config: &EngineConfig) -> RiskLevel {
    if risk_days >= config.high_threshold {
        RiskLevel::High
    } else if risk_days >= config.medium_threshold {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Days the forecast lands past the original due date
///
/// Without a due date the delay is the risk-day count itself.
#[inline]
#[must_use]
pub fn delay_days(original_date: Option<NaiveDate>, simulated_date: NaiveDate, risk_days: u64) -> u64 {
    match original_date {
        Some(due) => days_between(due, simulated_date).max(0).unsigned_abs(),
        None => risk_days,
    }
}

/// Assemble the final result from the pipeline stages
#[must_use]
pub fn assemble_result(
    baseline: &Baseline,
    breakdown: DurationBreakdown,
    simulated_date: NaiveDate,
    config: &EngineConfig,
) -> ForecastResult {
    let risk_days = breakdown.risk_days();

    ForecastResult {
        simulated_date,
        risk_days,
        delay_days: delay_days(baseline.original_date, simulated_date, risk_days),
        is_sick: breakdown.is_sick,
        is_shocked: breakdown.is_shocked,
        is_overdue: baseline.is_overdue,
        risk_level: classify_risk(risk_days, config),
        original_date: baseline.original_date,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tier_boundaries() {
        let config = EngineConfig::default();
        assert_eq!(classify_risk(0, &config), RiskLevel::Low);
        assert_eq!(classify_risk(4, &config), RiskLevel::Low);
        assert_eq!(classify_risk(5, &config), RiskLevel::Medium);
        assert_eq!(classify_risk(14, &config), RiskLevel::Medium);
        assert_eq!(classify_risk(15, &config), RiskLevel::High);
        assert_eq!(classify_risk(400, &config), RiskLevel::High);
    }

    #[test]
    fn custom_thresholds() {
        let config = EngineConfig::new().with_thresholds(2, 3);
        assert_eq!(classify_risk(1, &config), RiskLevel::Low);
        assert_eq!(classify_risk(2, &config), RiskLevel::Medium);
        assert_eq!(classify_risk(3, &config), RiskLevel::High);
    }

    #[test]
    fn delay_against_due_date() {
        assert_eq!(delay_days(Some(date(2025, 12, 31)), date(2026, 1, 5), 3), 5);
        assert_eq!(delay_days(Some(date(2025, 12, 31)), date(2025, 12, 31), 0), 0);
        // Finishing early is not a negative delay
        assert_eq!(delay_days(Some(date(2026, 1, 9)), date(2026, 1, 5), 0), 0);
    }

    #[test]
    fn delay_without_due_date_is_risk_days() {
        assert_eq!(delay_days(None, date(2026, 1, 5), 7), 7);
    }
}

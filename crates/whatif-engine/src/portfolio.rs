//! Portfolio batch forecasting
//!
//! Forecasts a whole backlog under one scenario. Every item gets a sampler
//! seeded from its own key, so an item's absence outcome does not depend on
//! its position in the batch or on the other items.

use crate::advice::StrategicAdvice;
use crate::clock::{Clock, FixedClock};
use crate::engine::ForecastEngine;
use crate::error::{BatchError, ValidationError};
use crate::sampling::SeededSampler;
use crate::types::{BacklogItem, ForecastResult, RawBacklogItem, RiskLevel, Scenario};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;

/// Aggregate score at which the portfolio counts as High risk
pub const PORTFOLIO_HIGH_SCORE: u8 = 60;

/// Aggregate score at which the portfolio counts as Medium risk
pub const PORTFOLIO_MEDIUM_SCORE: u8 = 30;

/// What to do with items that fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Record the failure and summarize the rest
    #[default]
    SkipInvalid,
    /// Fail the whole batch on the first invalid item
    Abort,
}

/// Outcome for one item of the batch
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioEntry {
    /// Item key
    pub key: String,
    /// Forecast, or the reason the item was skipped
    pub outcome: Result<ForecastResult, ValidationError>,
}

impl PortfolioEntry {
    /// Forecast if the item succeeded
    #[inline]
    #[must_use]
    pub fn forecast(&self) -> Option<&ForecastResult> {
        self.outcome.as_ref().ok()
    }
}

/// Per-item outcomes plus their summary
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioForecast {
    /// Outcomes in input order
    pub entries: Vec<PortfolioEntry>,
    /// Aggregate figures over successful forecasts
    pub summary: PortfolioSummary,
}

/// Aggregate figures for a forecast batch
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub item_count: usize,
    pub forecast_count: usize,
    pub skipped_count: usize,
    pub low_count: usize,
    pub medium_count: usize,
    pub high_count: usize,
    pub overdue_count: usize,
    pub sick_count: usize,
    pub shocked_count: usize,
    pub total_risk_days: u64,
    pub mean_risk_days: f64,
    pub max_delay_days: u64,
    /// Latest simulated completion date
    pub latest_date: Option<NaiveDate>,
    /// 0 to 100; High items weigh 100, Medium 50, Low 0
    pub risk_score: u8,
    /// Tier of `risk_score`
    pub risk_level: RiskLevel,
}

impl PortfolioSummary {
    /// Summarize batch entries
    #[must_use]
    pub fn from_entries(entries: &[PortfolioEntry]) -> Self {
        let mut summary = Self {
            item_count: entries.len(),
            ..Self::default()
        };

        for result in entries.iter().filter_map(PortfolioEntry::forecast) {
            summary.forecast_count += 1;
            match result.risk_level {
                RiskLevel::Low => summary.low_count += 1,
                RiskLevel::Medium => summary.medium_count += 1,
                RiskLevel::High => summary.high_count += 1,
            }
            summary.overdue_count += usize::from(result.is_overdue);
            summary.sick_count += usize::from(result.is_sick);
            summary.shocked_count += usize::from(result.is_shocked);
            summary.total_risk_days += result.risk_days;
            summary.max_delay_days = summary.max_delay_days.max(result.delay_days);
            summary.latest_date = summary.latest_date.max(Some(result.simulated_date));
        }
        summary.skipped_count = summary.item_count - summary.forecast_count;

        if summary.forecast_count > 0 {
            #[allow(clippy::cast_precision_loss)]
            let mean = summary.total_risk_days as f64 / summary.forecast_count as f64;
            summary.mean_risk_days = mean;
            summary.risk_score = aggregate_score(
                summary.high_count,
                summary.medium_count,
                summary.forecast_count,
            );
        }
        summary.risk_level = match summary.risk_score {
            s if s >= PORTFOLIO_HIGH_SCORE => RiskLevel::High,
            s if s >= PORTFOLIO_MEDIUM_SCORE => RiskLevel::Medium,
            _ => RiskLevel::Low,
        };

        summary
    }

    /// Advice for the aggregate tier
    #[inline]
    #[must_use]
    pub fn advice(&self) -> StrategicAdvice {
        StrategicAdvice::for_level(self.risk_level)
    }
}

/// Rounded weighted share of Medium and High items
fn aggregate_score(high: usize, medium: usize, total: usize) -> u8 {
    let weighted = 100 * high + 50 * medium;
    let score = (weighted + total / 2) / total;
    u8::try_from(score).unwrap_or(100)
}

/// Forecasts backlogs in parallel under one scenario
#[derive(Debug, Clone, Default)]
pub struct PortfolioForecaster {
    engine: ForecastEngine,
    policy: BatchPolicy,
}

impl PortfolioForecaster {
    /// Create forecaster around an engine
    #[inline]
    #[must_use]
    pub fn new(engine: ForecastEngine) -> Self {
        Self {
            engine,
            policy: BatchPolicy::default(),
        }
    }

    /// With batch policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active batch policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// Forecast every item under `scenario`
    ///
    /// Today is read once, so every item in the batch shares one anchor.
    ///
    /// # Errors
    /// Returns [`BatchError::InvalidScenario`] if the drivers are out of range,
    /// and under [`BatchPolicy::Abort`] [`BatchError::ItemFailed`] for the first
    /// failing item in input order.
    pub fn forecast<C>(
        &self,
        items: &[RawBacklogItem],
        scenario: &Scenario,
        clock: &C,
    ) -> Result<PortfolioForecast, BatchError>
    where
        C: Clock + ?Sized,
    {
        scenario.drivers.validate()?;

        let today = FixedClock(clock.today());
        tracing::info!("Forecasting {} items as of {}", items.len(), today.0);

        let entries: Vec<PortfolioEntry> = items
            .par_iter()
            .map(|raw| PortfolioEntry {
                key: raw.key.clone(),
                outcome: self.forecast_item(raw, scenario, &today),
            })
            .collect();

        if let Some(entry) = entries.iter().find(|e| e.outcome.is_err()) {
            if let (BatchPolicy::Abort, Err(source)) = (self.policy, &entry.outcome) {
                tracing::error!("Aborting batch at {}: {}", entry.key, source);
                return Err(BatchError::ItemFailed {
                    key: entry.key.clone(),
                    source: source.clone(),
                });
            }
        }

        for entry in &entries {
            if let Err(e) = &entry.outcome {
                tracing::warn!("Skipping {}: {}", entry.key, e);
            }
        }

        let summary = PortfolioSummary::from_entries(&entries);
        tracing::info!(
            "Forecast {} of {} items, portfolio risk {} (score {})",
            summary.forecast_count,
            summary.item_count,
            summary.risk_level,
            summary.risk_score
        );

        Ok(PortfolioForecast { entries, summary })
    }

    fn forecast_item(
        &self,
        raw: &RawBacklogItem,
        scenario: &Scenario,
        today: &FixedClock,
    ) -> Result<ForecastResult, ValidationError> {
        let item = BacklogItem::try_from(raw.clone())?;
        let mut sampler = SeededSampler::for_key(&item.key);
        self.engine.forecast(
            &item,
            &scenario.drivers,
            scenario.shock.as_ref(),
            today,
            &mut sampler,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_score_weights() {
        assert_eq!(aggregate_score(0, 0, 4), 0);
        assert_eq!(aggregate_score(4, 0, 4), 100);
        assert_eq!(aggregate_score(1, 1, 4), 38);
        assert_eq!(aggregate_score(0, 1, 3), 17);
    }

    #[test]
    fn empty_summary() {
        let summary = PortfolioSummary::from_entries(&[]);
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.risk_score, 0);
        assert_eq!(summary.risk_level, RiskLevel::Low);
        assert_eq!(summary.latest_date, None);
    }

    #[test]
    fn skipped_entries_do_not_count() {
        let entries = vec![PortfolioEntry {
            key: "PRJ-1".to_string(),
            outcome: Err(ValidationError::malformed_date("x", "bad")),
        }];
        let summary = PortfolioSummary::from_entries(&entries);
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.forecast_count, 0);
        assert_eq!(summary.skipped_count, 1);
        assert_eq!(summary.mean_risk_days, 0.0);
    }
}

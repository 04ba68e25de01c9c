//! Single-item forecast pipeline
//!
//! Runs the four stages in order for one backlog item:
//! 1. Resolve the baseline against today
//! 2. Aggregate the simulated duration
//! 3. Walk that many working days from today
//! 4. Classify the risk and assemble the result
//!
//! The engine holds only its configuration. Today and randomness are injected
//! per call, so concurrent calls share nothing mutable.

use crate::baseline::resolve_baseline;
use crate::classifier::assemble_result;
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::duration::aggregate_duration;
use crate::error::ValidationError;
use crate::sampling::SampleSource;
use crate::types::{BacklogItem, ForecastResult, RiskDrivers, ShockDirective};
use whatif_calendar::add_business_days;

/// Stateless what-if forecaster
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: EngineConfig,
}

impl ForecastEngine {
    /// Create engine with configuration
    #[inline]
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Forecast one backlog item
    ///
    /// Exactly one sample is drawn from `sampler` per call, whatever the
    /// driver values, so a seeded sampler stays in step across recomputations.
    ///
    /// # Arguments
    /// * `item` - The item to forecast
    /// * `drivers` - Scenario driver values
    /// * `shock` - Optional known disruption
    /// * `clock` - Source of today's date
    /// * `sampler` - Source of the absence draw
    ///
    /// # Errors
    /// Returns [`ValidationError`] for out-of-range drivers or samples, or if
    /// the walk runs past the calendar range.
    pub fn forecast<C, S>(
        &self,
        item: &BacklogItem,
        drivers: &RiskDrivers,
        shock: Option<&ShockDirective>,
        clock: &C,
        sampler: &mut S,
    ) -> Result<ForecastResult, ValidationError>
    where
        C: Clock + ?Sized,
        S: SampleSource + ?Sized,
    {
        let baseline = resolve_baseline(item.due_date, clock.today());

        let sample = sampler.sample();
        let shock_action = shock
            .filter(|s| s.applies_to(item.assignee_id.as_deref()))
            .map(|s| s.action);
        let breakdown = aggregate_duration(
            baseline.remaining_days,
            drivers,
            sample,
            shock_action,
            &self.config,
        )?;

        let walk_days = breakdown.walk_days();
        let simulated_date = add_business_days(baseline.today, walk_days)
            .ok_or(ValidationError::HorizonOutOfRange { days: walk_days })?;

        let result = assemble_result(&baseline, breakdown, simulated_date, &self.config);
        tracing::debug!(
            "Forecast {}: {} working days to {}, risk {} ({} days)",
            item.key,
            walk_days,
            result.simulated_date,
            result.risk_level,
            result.risk_days
        );

        Ok(result)
    }
}

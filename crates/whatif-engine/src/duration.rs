//! Duration aggregation
//!
//! Combines velocity drag, integration friction, stochastic absence and a
//! deterministic shock into one fractional-day duration. All four sources are
//! additive and independent.

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::types::{DurationBreakdown, RiskDrivers, ShockAction};

/// Aggregate the simulated duration for one item
///
/// `sample` is a uniform draw in [0, 1) from the caller's sample source.
/// `shock` is the action of a shock directive that hits this item's assignee.
///
/// # Errors
/// Returns [`ValidationError`] if a driver lies outside [0, 100] or the sample
/// outside [0, 1).
pub fn aggregate_duration(
    remaining_days: u64,
    drivers: &RiskDrivers,
    sample: f64,
    shock: Option<ShockAction>,
    config: &EngineConfig,
) -> Result<DurationBreakdown, ValidationError> {
    drivers.validate()?;
    if !(0.0..1.0).contains(&sample) {
        return Err(ValidationError::SampleOutOfRange(sample));
    }

    #[allow(clippy::cast_precision_loss)]
    let remaining = remaining_days as f64;

    // remaining * (1 + load/100), split so integer inputs stay exact
    let velocity_modifier = 1.0 + drivers.cognitive_load / 100.0;
    let velocity_drag_days = remaining * drivers.cognitive_load / 100.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let complexity_days = (drivers.system_complexity * f64::from(config.max_complexity_days)
        / 100.0)
        .ceil() as u32;

    let is_sick = sample * 100.0 < drivers.absence_risk;
    let sickness_days = if is_sick { config.sickness_days } else { 0 };

    let is_shocked = shock.is_some();
    let shock_days = shock.map_or(0, ShockAction::days);

    let total_days = remaining
        + velocity_drag_days
        + f64::from(complexity_days)
        + f64::from(sickness_days)
        + f64::from(shock_days);

    Ok(DurationBreakdown {
        remaining_days,
        velocity_modifier,
        velocity_drag_days,
        complexity_days,
        sickness_days,
        shock_days,
        is_sick,
        is_shocked,
        total_days,
    })
}

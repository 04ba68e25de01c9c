//! What-If Forecast Engine
//!
//! Given one backlog item and a set of risk drivers, produces:
//! - A simulated completion date on a working day
//! - The risk days added by friction and absence
//! - A Low / Medium / High risk tier
//! - The delay against the original due date
//!
//! The engine is a pure function of its inputs. Today and randomness are
//! injected through [`Clock`] and [`SampleSource`], never read from globals.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use whatif_engine::{BacklogItem, FixedClock, ForecastEngine, RiskDrivers, SeededSampler};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ForecastEngine::default();
//! let item = BacklogItem::new("PRJ-42").with_due_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
//! let drivers = RiskDrivers::new(20.0, 50.0, 10.0)?;
//! let today = FixedClock(NaiveDate::from_ymd_opt(2025, 12, 30).unwrap());
//!
//! let result = engine.forecast(&item, &drivers, None, &today, &mut SeededSampler::for_key(&item.key))?;
//! println!("{} lands on {} ({})", item.key, result.simulated_date, result.risk_level);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod advice;
pub mod baseline;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod duration;
pub mod engine;
pub mod error;
pub mod portfolio;
pub mod sampling;
pub mod types;

// Re-exports for convenience
pub use advice::StrategicAdvice;
pub use baseline::{parse_due_date, resolve_baseline, resolve_baseline_str, Baseline};
pub use classifier::{assemble_result, classify_risk, delay_days};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use duration::aggregate_duration;
pub use engine::ForecastEngine;
pub use error::{BatchError, ConfigError, Driver, ValidationError};
pub use portfolio::{
    BatchPolicy, PortfolioEntry, PortfolioForecast, PortfolioForecaster, PortfolioSummary,
};
pub use sampling::{stable_seed, FixedSample, SampleSource, SeededSampler};
pub use types::{
    BacklogItem, DurationBreakdown, ForecastResult, RawBacklogItem, RiskDrivers, RiskLevel,
    Scenario, ShockAction, ShockDirective,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the forecast engine
    pub use crate::{
        BacklogItem, Clock, FixedClock, FixedSample, ForecastEngine, ForecastResult,
        PortfolioForecaster, RiskDrivers, RiskLevel, SampleSource, Scenario, SeededSampler,
        ShockAction, ShockDirective, ValidationError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Error types for the forecast engine
//!
//! Provides error handling for:
//! - Malformed item and driver input
//! - Invalid engine configuration
//! - Portfolio batch failures

use std::fmt;

/// Input validation failure
///
/// The only error a single forecast can raise. It is never caught or
/// coerced inside the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Due date could not be parsed
    #[error("malformed due date {input:?}: {reason}")]
    MalformedDate {
        /// The raw input
        input: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Driver value outside [0, 100] or NaN
    #[error("{driver} must be within [0, 100], got {value}")]
    DriverOutOfRange {
        /// Offending driver
        driver: Driver,
        /// Supplied value
        value: f64,
    },

    /// Random sample outside [0, 1) or NaN
    #[error("random sample must be within [0, 1), got {0}")]
    SampleOutOfRange(f64),

    /// Walk ran past the last representable calendar date
    #[error("forecast horizon of {days} working days exceeds the calendar range")]
    HorizonOutOfRange {
        /// Working days requested
        days: u64,
    },
}

impl ValidationError {
    /// Create malformed date error
    #[inline]
    pub fn malformed_date(input: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::MalformedDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}

/// Risk driver names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    /// Context-switching overhead
    CognitiveLoad,
    /// Integration friction
    SystemComplexity,
    /// Absence probability
    AbsenceRisk,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Driver::CognitiveLoad => "cognitive load",
            Driver::SystemComplexity => "system complexity",
            Driver::AbsenceRisk => "absence risk",
        };
        f.write_str(name)
    }
}

/// Engine configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Medium tier starts above the high tier
    #[error("medium threshold {medium} exceeds high threshold {high}")]
    InvertedThresholds {
        /// Medium tier lower bound
        medium: u64,
        /// High tier lower bound
        high: u64,
    },
}

/// Portfolio batch errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BatchError {
    /// Scenario drivers failed validation
    #[error("invalid scenario: {0}")]
    InvalidScenario(#[from] ValidationError),

    /// An item failed under the abort policy
    #[error("item {key} failed: {source}")]
    ItemFailed {
        /// Key of the failing item
        key: String,
        /// Underlying failure
        source: ValidationError,
    },
}

impl BatchError {
    /// Key of the failing item, if the failure was item-specific
    #[must_use]
    pub fn item_key(&self) -> Option<&str> {
        match self {
            Self::ItemFailed { key, .. } => Some(key),
            Self::InvalidScenario(_) => None,
        }
    }
}

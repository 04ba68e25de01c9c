//! Engine configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Constants of the duration aggregation and risk classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Friction days at 100% system complexity
    pub max_complexity_days: u32,
    /// Days added by a stochastic absence event
    pub sickness_days: u32,
    /// Lowest risk-day count classified as Medium
    pub medium_threshold: u64,
    /// Lowest risk-day count classified as High
    pub high_threshold: u64,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With max complexity days
    #[inline]
    #[must_use]
    pub fn with_max_complexity_days(mut self, days: u32) -> Self {
        self.max_complexity_days = days;
        self
    }

    /// With sickness days
    #[inline]
    #[must_use]
    pub fn with_sickness_days(mut self, days: u32) -> Self {
        self.sickness_days = days;
        self
    }

    /// With tier thresholds
    #[inline]
    #[must_use]
    pub fn with_thresholds(mut self, medium: u64, high: u64) -> Self {
        self.medium_threshold = medium;
        self.high_threshold = high;
        self
    }

    /// Check the configuration is consistent
    ///
    /// # Errors
    /// Returns [`ConfigError::InvertedThresholds`] if the medium tier starts
    /// above the high tier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.medium_threshold > self.high_threshold {
            return Err(ConfigError::InvertedThresholds {
                medium: self.medium_threshold,
                high: self.high_threshold,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_complexity_days: 5,
            sickness_days: 3,
            medium_threshold: 5,
            high_threshold: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::new();
        assert_eq!(config.max_complexity_days, 5);
        assert_eq!(config.sickness_days, 3);
        assert_eq!(config.medium_threshold, 5);
        assert_eq!(config.high_threshold, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let config = EngineConfig::new().with_thresholds(20, 10);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedThresholds { medium: 20, high: 10 })
        );
    }
}

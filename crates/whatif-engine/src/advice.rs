//! Strategic advice shown next to a risk badge

use crate::types::RiskLevel;
use serde::Serialize;

/// Headline and recommendation for a risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrategicAdvice {
    /// Tier the advice applies to
    pub level: RiskLevel,
    /// Short status line
    pub headline: &'static str,
    /// Suggested course of action
    pub recommendation: &'static str,
}

impl StrategicAdvice {
    /// Advice for a tier
    #[must_use]
    pub fn for_level(level: RiskLevel) -> Self {
        let (headline, recommendation) = match level {
            RiskLevel::Low => (
                "On track",
                "Current plan absorbs the simulated friction. Keep monitoring driver trends.",
            ),
            RiskLevel::Medium => (
                "Schedule under pressure",
                "Reduce parallel work to cut context switching and line up backup owners for critical items.",
            ),
            RiskLevel::High => (
                "Deadline at risk",
                "Renegotiate scope or dates now, decouple integration work and staff cover for absent members.",
            ),
        };

        Self {
            level,
            headline,
            recommendation,
        }
    }
}

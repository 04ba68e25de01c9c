//! Core records for the forecast engine
//!
//! Defines:
//! - Backlog items (parsed and wire form)
//! - Risk drivers and shock directives
//! - Forecast results and their duration breakdown

use crate::baseline::parse_due_date;
use crate::error::{Driver, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Unit being forecast, with a parsed due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogItem {
    /// Stable tracker key
    pub key: String,
    /// Deadline; `None` means unconstrained
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Responsible person; `None` means unassigned
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Display-only summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Display-only tracker status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Display-only tracker priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl BacklogItem {
    /// Create unconstrained, unassigned item
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            due_date: None,
            assignee_id: None,
            summary: None,
            status: None,
            priority: None,
        }
    }

    /// With due date
    #[inline]
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// With assignee
    #[inline]
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }

    /// With summary
    #[inline]
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Backlog item as delivered by the issue tracker, due date unparsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBacklogItem {
    /// Stable tracker key
    pub key: String,
    /// Unparsed deadline
    #[serde(default)]
    pub due_date: Option<String>,
    /// Responsible person
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Display-only summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Display-only tracker status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Display-only tracker priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl TryFrom<RawBacklogItem> for BacklogItem {
    type Error = ValidationError;

    fn try_from(raw: RawBacklogItem) -> Result<Self, Self::Error> {
        let due_date = raw.due_date.as_deref().map(parse_due_date).transpose()?;
        Ok(Self {
            key: raw.key,
            due_date,
            assignee_id: raw.assignee_id,
            summary: raw.summary,
            status: raw.status,
            priority: raw.priority,
        })
    }
}

impl From<BacklogItem> for RawBacklogItem {
    fn from(item: BacklogItem) -> Self {
        Self {
            key: item.key,
            due_date: item.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            assignee_id: item.assignee_id,
            summary: item.summary,
            status: item.status,
            priority: item.priority,
        }
    }
}

/// Simulation inputs, each a percentage in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskDrivers {
    /// Context-switching overhead; slows throughput
    pub cognitive_load: f64,
    /// Integration friction; adds fixed days
    pub system_complexity: f64,
    /// Chance of a stochastic absence event
    pub absence_risk: f64,
}

impl RiskDrivers {
    /// Create validated drivers
    ///
    /// # Errors
    /// Returns [`ValidationError::DriverOutOfRange`] for any value outside
    /// [0, 100] or NaN.
    pub fn new(
        cognitive_load: f64,
        system_complexity: f64,
        absence_risk: f64,
    ) -> Result<Self, ValidationError> {
        let drivers = Self {
            cognitive_load,
            system_complexity,
            absence_risk,
        };
        drivers.validate()?;
        Ok(drivers)
    }

    /// Check every driver lies in [0, 100]
    ///
    /// # Errors
    /// Returns the first out-of-range driver.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (driver, value) in [
            (Driver::CognitiveLoad, self.cognitive_load),
            (Driver::SystemComplexity, self.system_complexity),
            (Driver::AbsenceRisk, self.absence_risk),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::DriverOutOfRange { driver, value });
            }
        }
        Ok(())
    }
}

/// Effect of a shock directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShockAction {
    /// Affected members are unavailable for three days
    #[serde(rename = "sick3")]
    Sick3,
}

impl ShockAction {
    /// Days added when the action applies
    #[inline]
    #[must_use]
    pub fn days(self) -> u32 {
        match self {
            ShockAction::Sick3 => 3,
        }
    }
}

/// Known disruption applied to named team members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShockDirective {
    /// Members hit by the disruption
    pub affected_member_ids: BTreeSet<String>,
    /// What happens to them
    pub action: ShockAction,
}

impl ShockDirective {
    /// Create directive
    #[must_use]
    pub fn new<I, S>(affected_member_ids: I, action: ShockAction) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            affected_member_ids: affected_member_ids.into_iter().map(Into::into).collect(),
            action,
        }
    }

    /// Check whether the directive hits an item's assignee
    ///
    /// Unassigned items are never shocked.
    #[inline]
    #[must_use]
    pub fn applies_to(&self, assignee_id: Option<&str>) -> bool {
        assignee_id.is_some_and(|id| self.affected_member_ids.contains(id))
    }
}

/// Driver values plus an optional shock, as picked in the scenario UI
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Slider values
    #[serde(default)]
    pub drivers: RiskDrivers,
    /// Optional known disruption
    #[serde(default)]
    pub shock: Option<ShockDirective>,
}

impl Scenario {
    /// Create scenario without shock
    #[inline]
    #[must_use]
    pub fn new(drivers: RiskDrivers) -> Self {
        Self {
            drivers,
            shock: None,
        }
    }

    /// With shock directive
    #[inline]
    #[must_use]
    pub fn with_shock(mut self, shock: ShockDirective) -> Self {
        self.shock = Some(shock);
        self
    }
}

/// Ordinal classification of risk days
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum RiskLevel {
    /// Below the medium threshold
    #[default]
    Low,
    /// At or above the medium threshold
    Medium,
    /// At or above the high threshold
    High,
}

impl RiskLevel {
    /// Display label
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Intermediate figures of the duration aggregation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationBreakdown {
    /// Calendar days from today to the due date, floored at zero
    pub remaining_days: u64,
    /// Throughput multiplier in [1, 2]
    pub velocity_modifier: f64,
    /// Fractional days added by velocity drag alone
    pub velocity_drag_days: f64,
    /// Integration friction days
    pub complexity_days: u32,
    /// Stochastic absence days
    pub sickness_days: u32,
    /// Deterministic shock days
    pub shock_days: u32,
    /// Whether the absence event fired
    pub is_sick: bool,
    /// Whether the shock directive applied
    pub is_shocked: bool,
    /// Total simulated duration in fractional days
    pub total_days: f64,
}

impl DurationBreakdown {
    /// Days attributable to friction and absence, rounded up
    #[inline]
    #[must_use]
    pub fn risk_days(&self) -> u64 {
        let extra = self.velocity_drag_days
            + f64::from(self.complexity_days)
            + f64::from(self.sickness_days)
            + f64::from(self.shock_days);
        // Non-negative by construction; the cast saturates
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let days = extra.ceil() as u64;
        days
    }

    /// Working days to walk from today
    #[inline]
    #[must_use]
    pub fn walk_days(&self) -> u64 {
        self.remaining_days.saturating_add(self.risk_days())
    }
}

/// Outcome of forecasting one backlog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Forecast completion date
    pub simulated_date: NaiveDate,
    /// Days beyond plain remaining work
    pub risk_days: u64,
    /// Days past the original due date, or `risk_days` without one
    pub delay_days: u64,
    /// Stochastic absence fired
    pub is_sick: bool,
    /// Shock directive applied
    pub is_shocked: bool,
    /// Due date already passed at simulation time
    pub is_overdue: bool,
    /// Tier of `risk_days`
    pub risk_level: RiskLevel,
    /// Normalized due date
    pub original_date: Option<NaiveDate>,
    /// Aggregation details
    pub breakdown: DurationBreakdown,
}

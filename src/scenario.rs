// 📈 Scenarios - Named rate tiers
// Bear / Base / Bull are configured; Custom is synthesised per entity from its override rate.

use crate::error::{EstimationError, EstimationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SCENARIO KIND
// ============================================================================

/// Scenario tiers in display order. `Ord` follows the declaration order,
/// so a `BTreeMap<ScenarioKind, _>` iterates Bear, Base, Bull, Custom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Conservative case
    Bear,

    /// Expected case
    Base,

    /// Optimistic case
    Bull,

    /// Per-entity override
    Custom,
}

impl ScenarioKind {
    /// Display order used by every table and chart
    pub const DISPLAY_ORDER: [ScenarioKind; 4] = [
        ScenarioKind::Bear,
        ScenarioKind::Base,
        ScenarioKind::Bull,
        ScenarioKind::Custom,
    ];

    /// The three tiers a configuration must define
    pub const CONFIGURED: [ScenarioKind; 3] =
        [ScenarioKind::Bear, ScenarioKind::Base, ScenarioKind::Bull];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Bear => "Bear",
            ScenarioKind::Base => "Base",
            ScenarioKind::Bull => "Bull",
            ScenarioKind::Custom => "Custom",
        }
    }

    /// Label shown next to the slider
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioKind::Bear => "Bear Case (Conservative)",
            ScenarioKind::Base => "Base Case (Expected)",
            ScenarioKind::Bull => "Bull Case (Optimistic)",
            ScenarioKind::Custom => "Custom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bear" => Some(ScenarioKind::Bear),
            "base" => Some(ScenarioKind::Base),
            "bull" => Some(ScenarioKind::Bull),
            "custom" => Some(ScenarioKind::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RATE BOUNDS
// ============================================================================

/// Slider range for a rate: inclusive `[min, max]` on a `step` grid anchored at `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl RateBounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        RateBounds { min, max, step }
    }

    pub fn validate(&self, target: &str) -> EstimationResult<()> {
        let finite = self.min.is_finite() && self.max.is_finite() && self.step.is_finite();
        if !finite || self.min <= 0.0 || self.min > self.max || self.step <= 0.0 {
            return Err(EstimationError::InvalidBounds {
                target: target.to_string(),
                min: self.min,
                max: self.max,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Clamp into range and snap to the nearest grid point.
    /// Infinities saturate at the matching end; NaN falls to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let bounded = value.clamp(self.min, self.max);
        let steps = ((bounded - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// Move `value` by `delta` steps, staying inside the range
    pub fn nudge(&self, value: f64, delta: i32) -> f64 {
        self.clamp(value + f64::from(delta) * self.step)
    }
}

// ============================================================================
// SCENARIO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub kind: ScenarioKind,

    /// ARR per FTE (currency per head)
    pub rate: f64,

    /// Range the rate may be adjusted within
    pub bounds: RateBounds,
}

impl Scenario {
    pub fn new(kind: ScenarioKind, rate: f64, bounds: RateBounds) -> Self {
        Scenario { kind, rate, bounds }
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Copy of this scenario with the rate clamped into its bounds
    pub fn with_rate(&self, rate: f64) -> Self {
        Scenario {
            rate: self.bounds.clamp(rate),
            ..self.clone()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

// ⚙️ Estimation Config - entities, scenarios and bounds as one immutable value
//
// Built once at startup (defaults or a JSON file) and passed explicitly into
// the model. Slider moves produce a new config instead of mutating this one.

use crate::entity::Entity;
use crate::error::{EstimationError, EstimationResult};
use crate::estimate::{compute_all, EstimateTable};
use crate::scenario::{RateBounds, Scenario, ScenarioKind};
use crate::sensitivity::{RateRange, DEFAULT_KEY_RATES};
use crate::stats::ComparisonStats;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default slider step for every rate control
pub const DEFAULT_STEP: f64 = 10_000.0;

fn default_override_bounds() -> RateBounds {
    RateBounds::new(50_000.0, 300_000.0, DEFAULT_STEP)
}

fn default_key_rates() -> Vec<f64> {
    DEFAULT_KEY_RATES.to_vec()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationConfig {
    /// Companies in display order
    pub entities: Vec<Entity>,

    /// Configured tiers; Custom is derived and must not appear here
    pub scenarios: Vec<Scenario>,

    /// Range for the per-entity override sliders
    #[serde(default = "default_override_bounds")]
    pub override_bounds: RateBounds,

    /// Domain for the sensitivity curve
    #[serde(default)]
    pub sensitivity_range: RateRange,

    /// Rates listed in the sensitivity table
    #[serde(default = "default_key_rates")]
    pub key_rates: Vec<f64>,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        let collibra = Entity {
            name: "Collibra".to_string(),
            headcount: 974,
            override_rate: None,
            colors: Default::default(),
        }
        .with_colors("#6366F1", "#8687FF");

        let alation = Entity {
            name: "Alation".to_string(),
            headcount: 612,
            override_rate: None,
            colors: Default::default(),
        }
        .with_colors("#0EA5E9", "#38BDF8");

        EstimationConfig {
            entities: vec![collibra, alation],
            scenarios: vec![
                Scenario::new(
                    ScenarioKind::Bear,
                    90_000.0,
                    RateBounds::new(50_000.0, 200_000.0, DEFAULT_STEP),
                ),
                Scenario::new(
                    ScenarioKind::Base,
                    150_000.0,
                    RateBounds::new(100_000.0, 250_000.0, DEFAULT_STEP),
                ),
                Scenario::new(
                    ScenarioKind::Bull,
                    250_000.0,
                    RateBounds::new(150_000.0, 300_000.0, DEFAULT_STEP),
                ),
            ],
            override_bounds: default_override_bounds(),
            sensitivity_range: RateRange::default(),
            key_rates: default_key_rates(),
        }
    }
}

impl EstimationConfig {
    /// Load and validate a config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config = Self::from_json(&content)
            .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))?;

        tracing::info!(
            path = %path.as_ref().display(),
            entities = config.entities.len(),
            "loaded estimation config"
        );
        Ok(config)
    }

    pub fn from_json(json: &str) -> EstimationResult<Self> {
        let config: EstimationConfig =
            serde_json::from_str(json).map_err(|e| EstimationError::Parse {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Check every setup-time invariant the model relies on
    pub fn validate(&self) -> EstimationResult<()> {
        if self.entities.is_empty() {
            return Err(EstimationError::NoEntities);
        }

        let mut names = HashSet::new();
        for entity in &self.entities {
            if !names.insert(entity.name.as_str()) {
                return Err(EstimationError::DuplicateEntity {
                    name: entity.name.clone(),
                });
            }
            entity.validate()?;
        }

        let mut kinds = HashSet::new();
        for scenario in &self.scenarios {
            if scenario.kind == ScenarioKind::Custom {
                return Err(EstimationError::CustomScenarioConfigured);
            }
            if !kinds.insert(scenario.kind) {
                return Err(EstimationError::DuplicateScenario {
                    kind: scenario.kind,
                });
            }
            if !scenario.rate.is_finite() || scenario.rate <= 0.0 {
                return Err(EstimationError::InvalidRate {
                    target: scenario.name().to_string(),
                    rate: scenario.rate,
                });
            }
            scenario.bounds.validate(scenario.name())?;
        }

        for kind in ScenarioKind::CONFIGURED {
            if !kinds.contains(&kind) {
                return Err(EstimationError::MissingScenario { kind });
            }
        }

        self.override_bounds.validate("custom")?;
        self.sensitivity_range.validate()?;

        if let Some(&rate) = self.key_rates.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(EstimationError::InvalidRate {
                target: "sensitivity table".to_string(),
                rate,
            });
        }

        Ok(())
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    pub fn scenario(&self, kind: ScenarioKind) -> EstimationResult<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.kind == kind)
            .ok_or(EstimationError::MissingScenario { kind })
    }

    pub fn rate(&self, kind: ScenarioKind) -> EstimationResult<f64> {
        self.scenario(kind).map(|s| s.rate)
    }

    pub fn entity(&self, name: &str) -> EstimationResult<&Entity> {
        self.entities
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| EstimationError::UnknownEntity {
                name: name.to_string(),
            })
    }

    /// Effective Custom rate for an entity
    pub fn custom_rate(&self, name: &str) -> EstimationResult<f64> {
        let base = self.rate(ScenarioKind::Base)?;
        Ok(self.entity(name)?.custom_rate(base))
    }

    // ========================================================================
    // DERIVED CONFIGS (slider semantics)
    // ========================================================================

    /// New config with a scenario rate clamped into that scenario's bounds
    pub fn with_scenario_rate(&self, kind: ScenarioKind, rate: f64) -> EstimationResult<Self> {
        let current = self.scenario(kind)?;
        let updated = current.with_rate(rate);
        if updated.rate != rate {
            tracing::warn!(scenario = %kind, requested = rate, applied = updated.rate, "rate clamped");
        }

        let mut next = self.clone();
        for scenario in next.scenarios.iter_mut().filter(|s| s.kind == kind) {
            *scenario = updated.clone();
        }
        Ok(next)
    }

    /// New config with an entity's override rate clamped into the override bounds
    pub fn with_override_rate(&self, name: &str, rate: f64) -> EstimationResult<Self> {
        self.entity(name)?;
        let applied = self.override_bounds.clamp(rate);
        if applied != rate {
            tracing::warn!(entity = name, requested = rate, applied, "override rate clamped");
        }

        let mut next = self.clone();
        for entity in next.entities.iter_mut().filter(|e| e.name == name) {
            *entity = entity.with_override_rate(applied);
        }
        Ok(next)
    }

    /// New config with every override removed
    pub fn without_overrides(&self) -> Self {
        let mut next = self.clone();
        for entity in next.entities.iter_mut() {
            entity.override_rate = None;
        }
        next
    }

    // ========================================================================
    // MODEL ENTRY POINTS
    // ========================================================================

    pub fn estimates(&self) -> EstimationResult<EstimateTable> {
        compute_all(&self.entities, &self.scenarios)
    }

    pub fn comparison(&self) -> EstimationResult<ComparisonStats> {
        let table = self.estimates()?;
        ComparisonStats::compute(&self.entities, &table)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = EstimationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.entities.len(), 2);
        assert_eq!(config.rate(ScenarioKind::Bear).unwrap(), 90_000.0);
        assert_eq!(config.rate(ScenarioKind::Base).unwrap(), 150_000.0);
        assert_eq!(config.rate(ScenarioKind::Bull).unwrap(), 250_000.0);
    }

    #[test]
    fn test_default_estimates() {
        let table = EstimationConfig::default().estimates().unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.get("Collibra", ScenarioKind::Base), Some(146_100_000.0));
        assert_eq!(table.get("Alation", ScenarioKind::Base), Some(91_800_000.0));
    }

    #[test]
    fn test_with_scenario_rate_returns_new_value() {
        let config = EstimationConfig::default();
        let next = config.with_scenario_rate(ScenarioKind::Bear, 100_000.0).unwrap();

        assert_eq!(next.rate(ScenarioKind::Bear).unwrap(), 100_000.0);
        assert_eq!(config.rate(ScenarioKind::Bear).unwrap(), 90_000.0);
    }

    #[test]
    fn test_with_scenario_rate_clamps() {
        let config = EstimationConfig::default();
        let next = config.with_scenario_rate(ScenarioKind::Bear, 1_000_000.0).unwrap();
        assert_eq!(next.rate(ScenarioKind::Bear).unwrap(), 200_000.0);
    }

    #[test]
    fn test_with_override_rate() {
        let config = EstimationConfig::default();
        assert_eq!(config.custom_rate("Alation").unwrap(), 150_000.0);

        let next = config.with_override_rate("Alation", 204_000.0).unwrap();
        assert_eq!(next.custom_rate("Alation").unwrap(), 200_000.0);
        assert_eq!(next.custom_rate("Collibra").unwrap(), 150_000.0);

        assert!(config.with_override_rate("Nobody", 100_000.0).is_err());
        assert!(next.without_overrides().entities.iter().all(|e| e.override_rate.is_none()));
    }

    #[test]
    fn test_validate_rejects_missing_scenario() {
        let mut config = EstimationConfig::default();
        config.scenarios.retain(|s| s.kind != ScenarioKind::Bull);
        assert_eq!(
            config.validate().unwrap_err(),
            EstimationError::MissingScenario {
                kind: ScenarioKind::Bull
            }
        );
    }

    #[test]
    fn test_validate_rejects_empty_entities() {
        let mut config = EstimationConfig::default();
        config.entities.clear();
        assert_eq!(config.validate().unwrap_err(), EstimationError::NoEntities);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut config = EstimationConfig::default();
        config.entities.push(config.entities[0].clone());
        assert!(matches!(
            config.validate(),
            Err(EstimationError::DuplicateEntity { .. })
        ));

        let mut config = EstimationConfig::default();
        config.scenarios.push(config.scenarios[0].clone());
        assert!(matches!(
            config.validate(),
            Err(EstimationError::DuplicateScenario { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut config = EstimationConfig::default();
        config.scenarios[1].rate = 0.0;
        assert!(matches!(
            config.validate(),
            Err(EstimationError::InvalidRate { .. })
        ));

        let mut config = EstimationConfig::default();
        config.entities[0].headcount = 0;
        assert!(matches!(
            config.validate(),
            Err(EstimationError::ZeroHeadcount { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip_and_defaults() {
        let json = r#"{
            "entities": [
                {"name": "Acme", "headcount": 100},
                {"name": "Globex", "headcount": 50, "override_rate": 120000}
            ],
            "scenarios": [
                {"kind": "bear", "rate": 80000, "bounds": {"min": 50000, "max": 200000, "step": 10000}},
                {"kind": "base", "rate": 100000, "bounds": {"min": 50000, "max": 200000, "step": 10000}},
                {"kind": "bull", "rate": 150000, "bounds": {"min": 50000, "max": 200000, "step": 10000}}
            ]
        }"#;
        let config = EstimationConfig::from_json(json).unwrap();
        assert_eq!(config.sensitivity_range, RateRange::default());
        assert_eq!(config.key_rates.len(), 7);
        assert_eq!(config.custom_rate("Globex").unwrap(), 120_000.0);

        let table = config.estimates().unwrap();
        assert_eq!(table.get("Globex", ScenarioKind::Custom), Some(6_000_000.0));
    }

    #[test]
    fn test_from_json_rejects_custom_scenario() {
        let json = r#"{
            "entities": [{"name": "Acme", "headcount": 100}],
            "scenarios": [
                {"kind": "custom", "rate": 80000, "bounds": {"min": 50000, "max": 200000, "step": 10000}}
            ]
        }"#;
        assert_eq!(
            EstimationConfig::from_json(json).unwrap_err(),
            EstimationError::CustomScenarioConfigured
        );
        assert!(matches!(
            EstimationConfig::from_json("not json"),
            Err(EstimationError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let config = EstimationConfig::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_json().unwrap().as_bytes()).unwrap();

        let loaded = EstimationConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);

        assert!(EstimationConfig::from_file("/nonexistent/arr.json").is_err());
    }
}

// 🧮 Estimation Model - headcount × rate across scenarios
//
// Every function here is pure. Estimates are recomputed from scratch on each
// input change and never rounded; rounding happens only in `format`.

use crate::entity::Entity;
use crate::error::{EstimationError, EstimationResult};
use crate::scenario::{Scenario, ScenarioKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// ARR estimate for one headcount at one rate.
///
/// Panics if `headcount` is zero or `rate` is not a positive finite number;
/// callers validate both at configuration time.
pub fn compute_estimate(headcount: u32, rate: f64) -> f64 {
    assert!(headcount > 0, "headcount must be strictly positive");
    assert!(
        rate.is_finite() && rate > 0.0,
        "rate must be positive and finite, got {rate}"
    );
    f64::from(headcount) * rate
}

// ============================================================================
// PER-ENTITY ESTIMATES
// ============================================================================

/// Estimates for a single entity keyed by scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityEstimates {
    pub entity: String,
    pub headcount: u32,
    pub values: BTreeMap<ScenarioKind, f64>,
}

impl EntityEstimates {
    pub fn get(&self, kind: ScenarioKind) -> Option<f64> {
        self.values.get(&kind).copied()
    }

    /// Lookup that treats a missing scenario as a configuration error
    pub fn require(&self, kind: ScenarioKind) -> EstimationResult<f64> {
        self.get(kind)
            .ok_or(EstimationError::MissingScenario { kind })
    }

    /// (scenario, estimate) pairs in display order
    pub fn ordered(&self) -> impl Iterator<Item = (ScenarioKind, f64)> + '_ {
        self.values.iter().map(|(kind, value)| (*kind, *value))
    }
}

/// Bull-case minus bear-case estimate
pub fn compute_spread(estimates: &EntityEstimates) -> EstimationResult<f64> {
    let bull = estimates.require(ScenarioKind::Bull)?;
    let bear = estimates.require(ScenarioKind::Bear)?;
    Ok(bull - bear)
}

/// Custom estimate minus base-case estimate
pub fn compute_custom_delta(estimates: &EntityEstimates) -> EstimationResult<f64> {
    let custom = estimates.require(ScenarioKind::Custom)?;
    let base = estimates.require(ScenarioKind::Base)?;
    Ok(custom - base)
}

// ============================================================================
// ESTIMATE TABLE
// ============================================================================

/// Complete (entity × scenario) cross product, entities in configured order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateTable {
    pub rows: Vec<EntityEstimates>,
}

impl EstimateTable {
    pub fn entity(&self, name: &str) -> Option<&EntityEstimates> {
        self.rows.iter().find(|row| row.entity == name)
    }

    pub fn get(&self, entity: &str, kind: ScenarioKind) -> Option<f64> {
        self.entity(entity).and_then(|row| row.get(kind))
    }

    /// Number of (entity, scenario) entries
    pub fn len(&self) -> usize {
        self.rows.iter().map(|row| row.values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened (entity, scenario, estimate) triples in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, ScenarioKind, f64)> + '_ {
        self.rows.iter().flat_map(|row| {
            row.ordered()
                .map(move |(kind, value)| (row.entity.as_str(), kind, value))
        })
    }

    /// Largest single estimate, used to scale charts
    pub fn max_value(&self) -> f64 {
        self.iter().map(|(_, _, value)| value).fold(0.0, f64::max)
    }
}

/// Estimate every entity under every scenario plus its Custom scenario.
///
/// The Custom rate is the entity's override, or the Base rate when no
/// override is set. Fails only if a needed Base scenario is missing or a
/// scenario list already contains Custom.
pub fn compute_all(entities: &[Entity], scenarios: &[Scenario]) -> EstimationResult<EstimateTable> {
    if scenarios.iter().any(|s| s.kind == ScenarioKind::Custom) {
        return Err(EstimationError::CustomScenarioConfigured);
    }
    let base_rate = scenarios
        .iter()
        .find(|s| s.kind == ScenarioKind::Base)
        .map(|s| s.rate);

    let mut rows = Vec::with_capacity(entities.len());
    for entity in entities {
        let mut values = BTreeMap::new();
        for scenario in scenarios {
            values.insert(scenario.kind, compute_estimate(entity.headcount, scenario.rate));
        }

        let custom_rate = match (entity.override_rate, base_rate) {
            (Some(rate), _) => rate,
            (None, Some(base)) => base,
            (None, None) => {
                return Err(EstimationError::MissingScenario {
                    kind: ScenarioKind::Base,
                })
            }
        };
        values.insert(
            ScenarioKind::Custom,
            compute_estimate(entity.headcount, custom_rate),
        );

        rows.push(EntityEstimates {
            entity: entity.name.clone(),
            headcount: entity.headcount,
            values,
        });
    }

    tracing::debug!(
        entities = entities.len(),
        scenarios = scenarios.len(),
        "recomputed estimate table"
    );

    Ok(EstimateTable { rows })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::RateBounds;

    fn bounds() -> RateBounds {
        RateBounds::new(50_000.0, 300_000.0, 10_000.0)
    }

    fn scenarios(bear: f64, base: f64, bull: f64) -> Vec<Scenario> {
        vec![
            Scenario::new(ScenarioKind::Bear, bear, bounds()),
            Scenario::new(ScenarioKind::Base, base, bounds()),
            Scenario::new(ScenarioKind::Bull, bull, bounds()),
        ]
    }

    fn companies() -> Vec<Entity> {
        vec![
            Entity::new("Collibra", 974).unwrap(),
            Entity::new("Alation", 612).unwrap(),
        ]
    }

    #[test]
    fn test_compute_estimate_is_exact_product() {
        assert_eq!(compute_estimate(974, 150_000.0), 146_100_000.0);
        assert_eq!(compute_estimate(612, 150_000.0), 91_800_000.0);
        assert_eq!(compute_estimate(1, 0.5), 0.5);
    }

    #[test]
    fn test_scale_invariance() {
        for headcount in [1, 7, 612, 974, 100_000] {
            for rate in [50_000.0, 123_456.0, 300_000.0] {
                assert_eq!(compute_estimate(headcount, rate) / f64::from(headcount), rate);
            }
        }
    }

    #[test]
    fn test_monotonic_in_rate() {
        let mut previous = 0.0;
        for step in 1..=30 {
            let estimate = compute_estimate(974, f64::from(step) * 10_000.0);
            assert!(estimate > previous);
            previous = estimate;
        }
    }

    #[test]
    #[should_panic(expected = "headcount")]
    fn test_zero_headcount_panics() {
        compute_estimate(0, 100_000.0);
    }

    #[test]
    #[should_panic(expected = "rate")]
    fn test_negative_rate_panics() {
        compute_estimate(10, -5.0);
    }

    #[test]
    fn test_compute_all_is_complete_cross_product() {
        let table = compute_all(&companies(), &scenarios(90_000.0, 150_000.0, 250_000.0)).unwrap();
        // 2 entities × (3 scenarios + custom)
        assert_eq!(table.len(), 8);
        assert_eq!(table.get("Collibra", ScenarioKind::Base), Some(146_100_000.0));
        assert_eq!(table.get("Alation", ScenarioKind::Base), Some(91_800_000.0));
        assert_eq!(table.get("Collibra", ScenarioKind::Bear), Some(87_660_000.0));
    }

    #[test]
    fn test_compute_all_display_order() {
        let table = compute_all(&companies(), &scenarios(90_000.0, 150_000.0, 250_000.0)).unwrap();
        let order: Vec<ScenarioKind> = table.rows[0].ordered().map(|(kind, _)| kind).collect();
        assert_eq!(order, ScenarioKind::DISPLAY_ORDER.to_vec());

        let entities: Vec<&str> = table.rows.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(entities, vec!["Collibra", "Alation"]);
    }

    #[test]
    fn test_custom_defaults_to_base_rate() {
        let table = compute_all(&companies(), &scenarios(90_000.0, 150_000.0, 250_000.0)).unwrap();
        assert_eq!(
            table.get("Collibra", ScenarioKind::Custom),
            table.get("Collibra", ScenarioKind::Base)
        );
    }

    #[test]
    fn test_custom_uses_override() {
        let mut entities = companies();
        entities[1] = entities[1].with_override_rate(200_000.0);
        let table = compute_all(&entities, &scenarios(90_000.0, 150_000.0, 250_000.0)).unwrap();
        assert_eq!(table.get("Alation", ScenarioKind::Custom), Some(122_400_000.0));

        let delta = compute_custom_delta(table.entity("Alation").unwrap()).unwrap();
        assert_eq!(delta, 122_400_000.0 - 91_800_000.0);
    }

    #[test]
    fn test_spread_matches_estimates() {
        let table = compute_all(&companies(), &scenarios(100_000.0, 150_000.0, 200_000.0)).unwrap();
        let spread = compute_spread(table.entity("Collibra").unwrap()).unwrap();
        assert_eq!(spread, 97_400_000.0);
        assert_eq!(
            spread,
            compute_estimate(974, 200_000.0) - compute_estimate(974, 100_000.0)
        );
    }

    #[test]
    fn test_inverted_rates_are_allowed() {
        // Bear above bull is not an error, the spread just goes negative
        let table = compute_all(&companies(), &scenarios(200_000.0, 150_000.0, 100_000.0)).unwrap();
        let spread = compute_spread(table.entity("Collibra").unwrap()).unwrap();
        assert_eq!(spread, -97_400_000.0);
    }

    #[test]
    fn test_spread_requires_bull_and_bear() {
        let base_only = vec![Scenario::new(ScenarioKind::Base, 150_000.0, bounds())];
        let table = compute_all(&companies(), &base_only).unwrap();
        assert_eq!(table.len(), 4);

        let err = compute_spread(table.entity("Collibra").unwrap()).unwrap_err();
        assert_eq!(
            err,
            EstimationError::MissingScenario {
                kind: ScenarioKind::Bull
            }
        );
    }

    #[test]
    fn test_custom_without_base_or_override_fails() {
        let bear_only = vec![Scenario::new(ScenarioKind::Bear, 90_000.0, bounds())];
        assert!(compute_all(&companies(), &bear_only).is_err());
    }

    #[test]
    fn test_custom_in_scenario_list_rejected() {
        let mut list = scenarios(90_000.0, 150_000.0, 250_000.0);
        list.push(Scenario::new(ScenarioKind::Custom, 1.0, bounds()));
        assert_eq!(
            compute_all(&companies(), &list).unwrap_err(),
            EstimationError::CustomScenarioConfigured
        );
    }

    #[test]
    fn test_max_value() {
        let table = compute_all(&companies(), &scenarios(90_000.0, 150_000.0, 250_000.0)).unwrap();
        assert_eq!(table.max_value(), 243_500_000.0);
    }
}

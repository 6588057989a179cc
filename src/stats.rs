// 📊 Comparison Statistics
// Derived aggregates over an estimate table: spreads, custom deltas and relative sizing.

use crate::entity::Entity;
use crate::error::{EstimationError, EstimationResult};
use crate::estimate::{compute_custom_delta, compute_spread, EstimateTable};
use serde::Serialize;

/// Headcount of the second entity as a percentage of the first.
///
/// Requires exactly two entities. A zero headcount is a precondition
/// violation and panics instead of producing infinity.
pub fn compute_relative_size(entities: &[Entity]) -> EstimationResult<f64> {
    let [a, b] = entities else {
        return Err(EstimationError::EntityCount {
            expected: 2,
            actual: entities.len(),
        });
    };
    assert!(a.headcount > 0, "headcount must be strictly positive");
    Ok(f64::from(b.headcount) / f64::from(a.headcount) * 100.0)
}

/// How much larger the first entity is than the second, in percent
pub fn compute_percent_larger(a: &Entity, b: &Entity) -> f64 {
    assert!(b.headcount > 0, "headcount must be strictly positive");
    (f64::from(a.headcount) / f64::from(b.headcount) - 1.0) * 100.0
}

/// Signed headcount difference `a - b`
pub fn headcount_difference(a: &Entity, b: &Entity) -> i64 {
    i64::from(a.headcount) - i64::from(b.headcount)
}

/// `(larger, smaller)` by headcount; ties keep the given order
pub fn order_by_headcount<'a>(a: &'a Entity, b: &'a Entity) -> (&'a Entity, &'a Entity) {
    if b.headcount > a.headcount {
        (b, a)
    } else {
        (a, b)
    }
}

// ============================================================================
// COMPARISON STATS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityStats {
    pub entity: String,
    pub headcount: u32,

    /// Bull minus bear estimate
    pub spread: f64,

    /// Custom minus base estimate
    pub custom_delta: f64,

    /// Headcount relative to the first entity (the first entity is 100%)
    pub relative_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonStats {
    pub entities: Vec<EntityStats>,

    /// Present when exactly two entities are configured
    pub pair: Option<PairStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairStats {
    pub larger: String,
    pub smaller: String,

    /// Larger minus smaller, never negative
    pub headcount_difference: i64,

    /// Smaller headcount as a percentage of the larger
    pub relative_size: f64,
    pub percent_larger: f64,
}

impl ComparisonStats {
    /// Compute stats for `entities` from a table produced by `compute_all` over the same entities
    pub fn compute(entities: &[Entity], table: &EstimateTable) -> EstimationResult<Self> {
        let Some(reference) = entities.first() else {
            return Err(EstimationError::NoEntities);
        };

        let mut rows = Vec::with_capacity(entities.len());
        for entity in entities {
            let estimates = table
                .entity(&entity.name)
                .ok_or_else(|| EstimationError::UnknownEntity {
                    name: entity.name.clone(),
                })?;

            rows.push(EntityStats {
                entity: entity.name.clone(),
                headcount: entity.headcount,
                spread: compute_spread(estimates)?,
                custom_delta: compute_custom_delta(estimates)?,
                relative_size: f64::from(entity.headcount) / f64::from(reference.headcount) * 100.0,
            });
        }

        let pair = match entities {
            [a, b] => {
                let (larger, smaller) = order_by_headcount(a, b);
                Some(PairStats {
                    larger: larger.name.clone(),
                    smaller: smaller.name.clone(),
                    headcount_difference: headcount_difference(larger, smaller),
                    relative_size: f64::from(smaller.headcount) / f64::from(larger.headcount)
                        * 100.0,
                    percent_larger: compute_percent_larger(larger, smaller),
                })
            }
            _ => None,
        };

        Ok(ComparisonStats {
            entities: rows,
            pair,
        })
    }

    pub fn entity(&self, name: &str) -> Option<&EntityStats> {
        self.entities.iter().find(|s| s.entity == name)
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 📉 Sensitivity Analysis
// Re-applies the estimate across an evenly spaced rate domain.

use crate::entity::Entity;
use crate::error::{EstimationError, EstimationResult};
use crate::estimate::compute_estimate;
use serde::{Deserialize, Serialize};

// ============================================================================
// RATE RANGE
// ============================================================================

/// Half-open rate domain `[start, end)` stepped by `step`.
///
/// Integer arithmetic keeps every point exact; the default domain
/// 50,000..300,000 step 10,000 yields 25 points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRange {
    pub start: u64,
    pub end: u64,
    pub step: u64,
}

impl RateRange {
    pub fn new(start: u64, end: u64, step: u64) -> EstimationResult<Self> {
        let range = RateRange { start, end, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> EstimationResult<()> {
        if self.step == 0 || self.start == 0 || self.start >= self.end {
            return Err(EstimationError::InvalidRateRange {
                start: self.start,
                end: self.end,
                step: self.step,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        if self.step == 0 || self.start >= self.end {
            return 0;
        }
        ((self.end - self.start).div_ceil(self.step)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rates in the domain, in ascending order
    pub fn rates(&self) -> impl Iterator<Item = f64> + Clone {
        let RateRange { start, end, step } = *self;
        (0..self.len() as u64)
            .map(move |i| start + i * step)
            .take_while(move |rate| *rate < end)
            .map(|rate| rate as f64)
    }
}

impl Default for RateRange {
    fn default() -> Self {
        RateRange {
            start: 50_000,
            end: 300_000,
            step: 10_000,
        }
    }
}

// ============================================================================
// SERIES
// ============================================================================

/// Lazy (rate, estimate) sequence for one entity.
///
/// The iterator is `Clone`, so a caller can restart it by cloning before use.
pub fn sensitivity_series<I>(entity: &Entity, rates: I) -> impl Iterator<Item = (f64, f64)> + Clone
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let headcount = entity.headcount;
    rates
        .into_iter()
        .map(move |rate| (rate, compute_estimate(headcount, rate)))
}

// ============================================================================
// SENSITIVITY TABLE
// ============================================================================

/// Key rates shown in the sensitivity table: 100K to 250K in 25K steps
pub const DEFAULT_KEY_RATES: [f64; 7] = [
    100_000.0, 125_000.0, 150_000.0, 175_000.0, 200_000.0, 225_000.0, 250_000.0,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityRow {
    pub rate: f64,

    /// One estimate per entity, in configured order
    pub estimates: Vec<f64>,

    /// First entity minus second entity, when at least two are configured
    pub difference: Option<f64>,
}

/// Estimates of every entity at each key rate
pub fn sensitivity_table(entities: &[Entity], key_rates: &[f64]) -> Vec<SensitivityRow> {
    key_rates
        .iter()
        .map(|&rate| {
            let estimates: Vec<f64> = entities
                .iter()
                .map(|e| compute_estimate(e.headcount, rate))
                .collect();
            let difference = match estimates.as_slice() {
                [a, b, ..] => Some(a - b),
                _ => None,
            };
            SensitivityRow {
                rate,
                estimates,
                difference,
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_is_half_open() {
        let range = RateRange::default();
        let rates: Vec<f64> = range.rates().collect();
        assert_eq!(range.len(), 25);
        assert_eq!(rates.len(), 25);
        assert_eq!(rates.first(), Some(&50_000.0));
        assert_eq!(rates.last(), Some(&290_000.0));
    }

    #[test]
    fn test_uneven_range() {
        let range = RateRange::new(10, 35, 10).unwrap();
        let rates: Vec<f64> = range.rates().collect();
        assert_eq!(rates, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_invalid_range() {
        assert!(RateRange::new(100, 100, 10).is_err());
        assert!(RateRange::new(100, 200, 0).is_err());
        assert!(RateRange::new(0, 200, 10).is_err());
    }

    #[test]
    fn test_series_is_restartable() {
        let entity = Entity::new("Collibra", 974).unwrap();
        let series = sensitivity_series(&entity, RateRange::default().rates());

        let first: Vec<(f64, f64)> = series.clone().collect();
        let second: Vec<(f64, f64)> = series.collect();
        assert_eq!(first, second);
        assert_eq!(first[0], (50_000.0, 48_700_000.0));
    }

    #[test]
    fn test_series_is_monotonic() {
        let entity = Entity::new("Alation", 612).unwrap();
        let points: Vec<(f64, f64)> =
            sensitivity_series(&entity, RateRange::default().rates()).collect();
        assert!(points.windows(2).all(|w| w[1].1 > w[0].1));
        assert!(points.iter().all(|(rate, est)| *est / 612.0 == *rate));
    }

    #[test]
    fn test_series_accepts_plain_vectors() {
        let entity = Entity::new("Alation", 612).unwrap();
        let points: Vec<(f64, f64)> = sensitivity_series(&entity, vec![150_000.0]).collect();
        assert_eq!(points, vec![(150_000.0, 91_800_000.0)]);
    }

    #[test]
    fn test_sensitivity_table() {
        let entities = vec![
            Entity::new("Collibra", 974).unwrap(),
            Entity::new("Alation", 612).unwrap(),
        ];
        let rows = sensitivity_table(&entities, &DEFAULT_KEY_RATES);
        assert_eq!(rows.len(), 7);

        let at_150 = &rows[2];
        assert_eq!(at_150.rate, 150_000.0);
        assert_eq!(at_150.estimates, vec![146_100_000.0, 91_800_000.0]);
        assert_eq!(at_150.difference, Some(54_300_000.0));
    }

    #[test]
    fn test_sensitivity_table_single_entity_has_no_difference() {
        let entities = vec![Entity::new("Solo", 10).unwrap()];
        let rows = sensitivity_table(&entities, &[100.0]);
        assert_eq!(rows[0].difference, None);
    }
}

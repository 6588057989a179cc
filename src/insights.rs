// 💡 Insights - narrative lines and comparison lists for the detailed view

use crate::config::EstimationConfig;
use crate::error::EstimationResult;
use crate::estimate::{compute_spread, EstimateTable};
use crate::format::{format_millions, format_percent};
use crate::scenario::ScenarioKind;
use crate::stats::{compute_percent_larger, headcount_difference, order_by_headcount};
use serde::Serialize;

/// One bar of the ARR-per-FTE comparison chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateBar {
    pub label: String,

    /// Rate in thousands
    pub rate_k: f64,
}

/// Scenario rates followed by each entity's effective custom rate
pub fn rate_comparison(config: &EstimationConfig) -> EstimationResult<Vec<RateBar>> {
    let mut bars = Vec::with_capacity(ScenarioKind::CONFIGURED.len() + config.entities.len());
    for kind in ScenarioKind::CONFIGURED {
        bars.push(RateBar {
            label: kind.as_str().to_string(),
            rate_k: config.rate(kind)? / 1_000.0,
        });
    }
    for entity in &config.entities {
        bars.push(RateBar {
            label: format!("{} Custom", entity.name),
            rate_k: config.custom_rate(&entity.name)? / 1_000.0,
        });
    }
    Ok(bars)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyInsights {
    /// "Collibra has 362 more employees than Alation (59.2% larger)"
    pub headcount: Option<String>,

    /// One "bear to bull" line per entity
    pub ranges: Vec<String>,

    /// Custom estimates of every entity
    pub custom: String,
}

impl KeyInsights {
    pub fn build(config: &EstimationConfig, table: &EstimateTable) -> EstimationResult<Self> {
        let headcount = match config.entities.as_slice() {
            [a, b, ..] => {
                let (larger, smaller) = order_by_headcount(a, b);
                Some(format!(
                    "{} has {} more employees than {} ({} larger)",
                    larger.name,
                    headcount_difference(larger, smaller),
                    smaller.name,
                    format_percent(compute_percent_larger(larger, smaller)),
                ))
            }
            _ => None,
        };

        let mut ranges = Vec::with_capacity(table.rows.len());
        let mut custom = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let bear = row.require(ScenarioKind::Bear)?;
            let bull = row.require(ScenarioKind::Bull)?;
            ranges.push(format!(
                "{} Range: {} to {} ({} difference)",
                row.entity,
                format_millions(bear),
                format_millions(bull),
                format_millions(compute_spread(row)?),
            ));
            custom.push(format!(
                "{} ARR is {}",
                row.entity,
                format_millions(row.require(ScenarioKind::Custom)?)
            ));
        }

        Ok(KeyInsights {
            headcount,
            ranges,
            custom: format!("With custom settings, {}", custom.join(" and ")),
        })
    }

    /// All lines in display order
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.ranges.len() + 2);
        if let Some(headcount) = &self.headcount {
            lines.push(headcount.clone());
        }
        lines.extend(self.ranges.iter().cloned());
        lines.push(self.custom.clone());
        lines
    }
}

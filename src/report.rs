// 📤 Report export - JSON snapshot and CSV tables
// Nothing is written to disk here; callers choose the writer (stdout in the CLI).

use crate::config::EstimationConfig;
use crate::estimate::EstimateTable;
use crate::format::to_millions;
use crate::insights::{rate_comparison, KeyInsights, RateBar};
use crate::scenario::ScenarioKind;
use crate::sensitivity::{sensitivity_table, SensitivityRow};
use crate::stats::ComparisonStats;
use anyhow::{Context as AnyhowContext, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Everything the dashboard shows, computed from one config snapshot
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub config: EstimationConfig,
    pub estimates: EstimateTable,
    pub comparison: ComparisonStats,
    pub rate_comparison: Vec<RateBar>,
    pub insights: KeyInsights,
    pub sensitivity: Vec<SensitivityRow>,
}

impl Report {
    pub fn build(config: &EstimationConfig) -> Result<Self> {
        let estimates = config.estimates().context("Failed to compute estimates")?;
        let comparison = ComparisonStats::compute(&config.entities, &estimates)
            .context("Failed to compute comparison stats")?;
        let insights = KeyInsights::build(config, &estimates)?;

        Ok(Report {
            generated_at: Utc::now(),
            config: config.clone(),
            rate_comparison: rate_comparison(config)?,
            sensitivity: sensitivity_table(&config.entities, &config.key_rates),
            estimates,
            comparison,
            insights,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

/// Estimate table in $ millions: one row per entity, one column per scenario
pub fn write_estimates_csv<W: Write>(table: &EstimateTable, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["Company".to_string()];
    header.extend(ScenarioKind::DISPLAY_ORDER.iter().map(|k| k.as_str().to_string()));
    csv.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.entity.clone()];
        for kind in ScenarioKind::DISPLAY_ORDER {
            record.push(
                row.get(kind)
                    .map(|v| format!("{:.1}", to_millions(v)))
                    .unwrap_or_default(),
            );
        }
        csv.write_record(&record)?;
    }

    csv.flush().context("Failed to flush estimates CSV")?;
    Ok(())
}

/// Sensitivity table: rate in $K, per-entity estimates and the difference in $ millions
pub fn write_sensitivity_csv<W: Write>(config: &EstimationConfig, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["ARR per FTE ($K)".to_string()];
    header.extend(config.entities.iter().map(|e| format!("{} ARR ($M)", e.name)));
    header.push("Difference ($M)".to_string());
    csv.write_record(&header)?;

    for row in sensitivity_table(&config.entities, &config.key_rates) {
        let mut record = vec![format!("{}", row.rate / 1_000.0)];
        record.extend(row.estimates.iter().map(|v| format!("{:.1}", to_millions(*v))));
        record.push(
            row.difference
                .map(|d| format!("{:.1}", to_millions(d)))
                .unwrap_or_default(),
        );
        csv.write_record(&record)?;
    }

    csv.flush().context("Failed to flush sensitivity CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimates_csv() {
        let config = EstimationConfig::default();
        let table = config.estimates().unwrap();

        let mut out = Vec::new();
        write_estimates_csv(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Company,Bear,Base,Bull,Custom");
        assert_eq!(lines[1], "Collibra,87.7,146.1,243.5,146.1");
        assert_eq!(lines[2], "Alation,55.1,91.8,153.0,91.8");
    }

    #[test]
    fn test_sensitivity_csv() {
        let mut out = Vec::new();
        write_sensitivity_csv(&EstimationConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[0],
            "ARR per FTE ($K),Collibra ARR ($M),Alation ARR ($M),Difference ($M)"
        );
        assert_eq!(lines[3], "150,146.1,91.8,54.3");
    }

    #[test]
    fn test_report_json() {
        let report = Report::build(&EstimationConfig::default()).unwrap();
        assert_eq!(report.estimates.len(), 8);
        assert_eq!(report.sensitivity.len(), 7);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert!(json["generated_at"].is_string());
        assert_eq!(json["estimates"]["rows"][0]["values"]["base"], 146_100_000.0);
    }
}

// ARR Estimator - Core Library
// Scenario-based revenue estimation model, used by the TUI, the export CLI and the API server

pub mod error;
pub mod entity;
pub mod scenario;
pub mod estimate;
pub mod stats;
pub mod sensitivity;
pub mod config;
pub mod format;
pub mod insights;
pub mod theme;
pub mod report;
pub mod logging;

// Re-export commonly used types
pub use error::{EstimationError, EstimationResult};
pub use entity::{Entity, EntityColors};
pub use scenario::{RateBounds, Scenario, ScenarioKind};
pub use estimate::{
    compute_all, compute_custom_delta, compute_estimate, compute_spread,
    EntityEstimates, EstimateTable,
};
pub use stats::{
    compute_percent_larger, compute_relative_size, headcount_difference, order_by_headcount,
    ComparisonStats, EntityStats, PairStats,
};
pub use sensitivity::{
    sensitivity_series, sensitivity_table, RateRange, SensitivityRow, DEFAULT_KEY_RATES,
};
pub use config::EstimationConfig;
pub use format::{
    format_headcount, format_millions, format_percent, format_rate, format_rate_thousands,
    to_millions,
};
pub use insights::{rate_comparison, KeyInsights, RateBar};
pub use theme::{parse_hex, Theme};
pub use report::{write_estimates_csv, write_sensitivity_csv, Report};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

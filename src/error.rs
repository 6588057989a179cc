// ⚠️ Estimation Errors
// Configuration problems caught at setup time. Arithmetic precondition
// violations (zero headcount, non-positive rate) are programmer errors and panic.

use crate::scenario::ScenarioKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimationError {
    #[error("configuration has no entities")]
    NoEntities,

    #[error("duplicate entity name: {name}")]
    DuplicateEntity { name: String },

    #[error("entity {name} has zero headcount")]
    ZeroHeadcount { name: String },

    #[error("invalid rate for {target}: {rate} (must be finite and positive)")]
    InvalidRate { target: String, rate: f64 },

    #[error("invalid bounds for {target}: min {min}, max {max}, step {step}")]
    InvalidBounds {
        target: String,
        min: f64,
        max: f64,
        step: f64,
    },

    #[error("scenario {kind} is not configured")]
    MissingScenario { kind: ScenarioKind },

    #[error("scenario {kind} is configured more than once")]
    DuplicateScenario { kind: ScenarioKind },

    #[error("the custom scenario is derived per entity and cannot be configured")]
    CustomScenarioConfigured,

    #[error("unknown entity: {name}")]
    UnknownEntity { name: String },

    #[error("expected exactly {expected} entities, got {actual}")]
    EntityCount { expected: usize, actual: usize },

    #[error("invalid rate range: start {start}, end {end}, step {step}")]
    InvalidRateRange { start: u64, end: u64, step: u64 },

    #[error("failed to parse configuration: {reason}")]
    Parse { reason: String },
}

pub type EstimationResult<T> = Result<T, EstimationError>;

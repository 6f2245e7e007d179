//! Adjudication and scenario-batch errors.

use super::error_code::UrcaErrorCode;
use super::validation_error::ValidationError;

/// Errors raised while adjudicating a validated case.
#[derive(Debug, thiserror::Error)]
pub enum ComputationError {
    /// Both sides' evidence sets are empty — adjudication is undefined.
    /// No default verdict is fabricated.
    #[error("case {charge:?}: no evidence on either side, adjudication undefined")]
    EmptyCase { charge: String },
}

impl UrcaErrorCode for ComputationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCase { .. } => "COMPUTATION_EMPTY_CASE",
        }
    }
}

/// A single permutation's pipeline failure, recorded per-scenario by the
/// harness without aborting sibling permutations.
#[derive(Debug, thiserror::Error)]
#[error("scenario {label}: {source}")]
pub struct ScenarioError {
    pub label: String,
    #[source]
    pub source: EngineError,
}

impl UrcaErrorCode for ScenarioError {
    fn error_code(&self) -> &'static str {
        self.source.error_code()
    }
}

/// Umbrella error for pipeline callers.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("computation error: {0}")]
    Computation(#[from] ComputationError),
}

impl UrcaErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Computation(e) => e.error_code(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

//! Error types for the adjudication engine.
//!
//! One enum per error domain, composed into [`EngineError`] for pipeline
//! callers. Every variant carries a stable machine code via
//! [`error_code::UrcaErrorCode`].

pub mod engine_error;
pub mod error_code;
pub mod validation_error;

pub use engine_error::{ComputationError, EngineError, EngineResult, ScenarioError};
pub use validation_error::ValidationError;

//! # urca-core
//!
//! Foundation crate for the URCA adjudication engine.
//! Defines all types, errors, config, and collections.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::EngineConfig;
pub use errors::error_code::UrcaErrorCode;
pub use errors::{ComputationError, EngineError, EngineResult, ScenarioError, ValidationError};
pub use types::case::{Case, Party, ScenarioSpec};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::evidence::{EvidenceItem, Side};
pub use types::verdict::{
    ConsistencyReport, Fact, NormativeState, ScenarioOutcome, SideStrength, StrengthPair, Verdict,
    VerdictResult,
};

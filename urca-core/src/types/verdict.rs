//! Pipeline output records: facts, strengths, verdicts, and reports.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::evidence::Side;

/// Canonical fact extracted from one evidence item (M1 output).
/// Derived, run-scoped; never persisted independently of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub id: String,
    pub source_evidence_id: String,
    pub side: Side,
    pub kind: String,
    pub normalized_credibility: f64,
    pub normalized_weight: f64,
    pub recency: u32,
}

impl Fact {
    /// Weight·credibility product used for narrative selection.
    pub fn salience(&self) -> f64 {
        self.normalized_weight * self.normalized_credibility
    }
}

/// Aggregate strength for one side (M2 output), clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideStrength {
    pub side: Side,
    pub value: f64,
}

/// The only input the normative decision computation accepts.
///
/// This type has no field for demographic attributes — the bias-resistance
/// contract is enforced structurally, not by convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthPair {
    pub prosecution: f64,
    pub defense: f64,
}

impl StrengthPair {
    pub fn margin(&self) -> f64 {
        self.prosecution - self.defense
    }
}

/// The adjudication outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Guilty,
    NotGuilty,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guilty => f.write_str("GUILTY"),
            Self::NotGuilty => f.write_str("NOT GUILTY"),
        }
    }
}

/// How decisively the reasonable-doubt threshold was cleared or missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormativeState {
    /// Margin far from the deadlock point — the evidence picture is decisive.
    StrongPrecedent,
    /// Near the boundary.
    ModeratePrecedent,
    /// Evidence thin on both sides (both strengths below the low-evidence floor).
    WeakPrecedent,
}

/// One full pipeline run's output. Created fresh per run; never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictResult {
    pub verdict: Verdict,
    pub confidence: f64,
    /// The reasonable-doubt threshold the run was adjudicated under.
    pub reasonable_doubt: f64,
    pub prosecution_strength: f64,
    pub defense_strength: f64,
    /// Per-run bias sensitivity: max |margin shift| under the reference
    /// demographic permutation set.
    pub bias_score: f64,
    pub normative_state: NormativeState,
    pub facts: Vec<Fact>,
    pub narrative: String,
}

/// Per-permutation entry in a consistency report: either a full result or a
/// recorded failure (per-scenario isolation — one failing permutation never
/// aborts its siblings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioOutcome {
    Result(VerdictResult),
    Error { code: String, message: String },
}

impl ScenarioOutcome {
    pub fn as_result(&self) -> Option<&VerdictResult> {
        match self {
            Self::Result(r) => Some(r),
            Self::Error { .. } => None,
        }
    }
}

/// Aggregated output of the scenario harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub base: VerdictResult,
    /// Outcomes keyed by scenario label, ordered for determinism.
    pub scenarios: BTreeMap<String, ScenarioOutcome>,
    /// Max pairwise |confidence_a − confidence_b| across successful runs.
    /// Distinct from the per-run `VerdictResult::bias_score`.
    pub bias_score: f64,
    /// True iff every successful permutation's verdict equals the base
    /// verdict and no permutation failed.
    pub consistent: bool,
}

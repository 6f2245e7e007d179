//! # urca-engine
//!
//! The URCA adjudication pipeline: a chain of pure stages over immutable
//! records, plus the scenario harness that audits bias across demographic
//! permutations.
//!
//! ## Modules
//! - `extractor` — M1: raw evidence → canonical, deduplicated Facts
//! - `adaptation` — M2: per-side strength via fractional-memory weighting
//! - `normative` — M3: threshold decision, normative state, bias probe
//! - `narrative` — M4: deterministic justification text
//! - `pipeline` — M1→M4 orchestration producing one `VerdictResult`
//! - `scenario` — permutation fan-out and the consistency report

pub mod adaptation;
pub mod extractor;
pub mod narrative;
pub mod normative;
pub mod pipeline;
pub mod scenario;

pub use adaptation::AdaptationEngine;
pub use extractor::FormExtractor;
pub use narrative::NarrativeComposer;
pub use normative::{Decision, NormativeFilter};
pub use pipeline::DeliberationPipeline;
pub use scenario::ScenarioHarness;

//! Scenario harness — demographic-permutation consistency audit.
//!
//! Runs the full pipeline once per permutation. Permutation runs share only
//! the read-only base case and configuration, so they fan out in parallel;
//! outcomes are collected and ordered by scenario label, which keeps the
//! report identical to sequential execution. A failing permutation is
//! recorded as a per-scenario error entry and never aborts its siblings.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{info, warn};

use urca_core::{
    Case, ConsistencyReport, EngineConfig, EngineResult, ScenarioError, ScenarioOutcome,
    ScenarioSpec, UrcaErrorCode, ValidationError, VerdictResult,
};

use crate::pipeline::DeliberationPipeline;

/// The batch harness around [`DeliberationPipeline`].
#[derive(Debug, Clone)]
pub struct ScenarioHarness {
    pipeline: DeliberationPipeline,
}

impl ScenarioHarness {
    pub fn new(config: &EngineConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            pipeline: DeliberationPipeline::new(config)?,
        })
    }

    /// Run the base case and every permutation, then aggregate.
    ///
    /// The base case failing is fatal — there is nothing to compare against.
    /// Per-permutation failures are recorded in the report instead.
    pub fn run(&self, base: &Case, specs: &[ScenarioSpec]) -> EngineResult<ConsistencyReport> {
        let base_result = self.pipeline.adjudicate(base)?;
        let variants: Vec<(String, Case)> = specs
            .iter()
            .map(|spec| (spec.label.clone(), spec.apply(base)))
            .collect();
        let scenarios = self.adjudicate_variants(variants);
        Ok(aggregate(base_result, scenarios))
    }

    /// Run the built-in four-way reference permutation set.
    pub fn run_reference_set(&self, base: &Case) -> EngineResult<ConsistencyReport> {
        let specs = ScenarioSpec::reference_set(base);
        self.run(base, &specs)
    }

    /// Adjudicate pre-materialized labeled variants in parallel, isolating
    /// failures per scenario.
    fn adjudicate_variants(
        &self,
        variants: Vec<(String, Case)>,
    ) -> BTreeMap<String, ScenarioOutcome> {
        variants
            .into_par_iter()
            .map(|(label, case)| {
                let outcome = match self.pipeline.adjudicate(&case) {
                    Ok(result) => ScenarioOutcome::Result(result),
                    Err(source) => {
                        let error = ScenarioError {
                            label: label.clone(),
                            source,
                        };
                        warn!(
                            scenario = %error.label,
                            error = %error,
                            "permutation failed, recording per-scenario error"
                        );
                        ScenarioOutcome::Error {
                            code: error.error_code().to_string(),
                            message: error.to_string(),
                        }
                    }
                };
                (label, outcome)
            })
            .collect()
    }
}

/// Fold per-scenario outcomes into the consistency report.
fn aggregate(
    base: VerdictResult,
    scenarios: BTreeMap<String, ScenarioOutcome>,
) -> ConsistencyReport {
    let confidences: Vec<f64> = scenarios
        .values()
        .filter_map(|o| o.as_result().map(|r| r.confidence))
        .collect();
    let bias_score = max_pairwise_divergence(&confidences);

    let failed = scenarios
        .values()
        .filter(|o| o.as_result().is_none())
        .count();
    let consistent = failed == 0
        && scenarios
            .values()
            .filter_map(ScenarioOutcome::as_result)
            .all(|r| r.verdict == base.verdict);

    info!(
        scenarios = scenarios.len(),
        failed,
        consistent,
        bias_score,
        "scenario batch complete"
    );

    ConsistencyReport {
        base,
        scenarios,
        bias_score,
        consistent,
    }
}

/// Max pairwise |a − b| over a set of confidences: max − min.
fn max_pairwise_divergence(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    max - min
}

//! The M1→M4 deliberation pipeline.
//!
//! A chain of pure stages communicating through immutable records. The
//! pipeline is stateless across invocations: repeated runs over the same
//! case and configuration yield byte-identical results.

use std::time::Instant;

use tracing::info;

use urca_core::{Case, EngineConfig, EngineResult, Side, StrengthPair, ValidationError, VerdictResult};

use crate::adaptation::AdaptationEngine;
use crate::extractor::FormExtractor;
use crate::narrative::NarrativeComposer;
use crate::normative::NormativeFilter;

/// The full adjudication pipeline.
#[derive(Debug, Clone)]
pub struct DeliberationPipeline {
    extractor: FormExtractor,
    adaptation: AdaptationEngine,
    normative: NormativeFilter,
    narrative: NarrativeComposer,
}

impl DeliberationPipeline {
    /// Build a pipeline from validated configuration.
    pub fn new(config: &EngineConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            extractor: FormExtractor::new(),
            adaptation: AdaptationEngine::new(config),
            normative: NormativeFilter::new(config),
            narrative: NarrativeComposer::new(config.narrative_top_k),
        })
    }

    /// Adjudicate a single case through all four stages.
    pub fn adjudicate(&self, case: &Case) -> EngineResult<VerdictResult> {
        let start = Instant::now();
        case.validate()?;
        case.check_adjudicable()?;

        // M1: form extraction
        let facts = self.extractor.extract(case);

        // M2: fractional-memory adaptation
        let strengths = StrengthPair {
            prosecution: self.adaptation.side_strength(&facts, Side::Prosecution).value,
            defense: self.adaptation.side_strength(&facts, Side::Defense).value,
        };

        // M3: normative filter + bias probe
        let decision = self.normative.decide(strengths);
        let bias_score = self
            .normative
            .bias_probe(case, &self.extractor, &self.adaptation);

        // M4: narrative
        let narrative =
            self.narrative
                .compose(&facts, strengths, &decision, self.normative.threshold());

        info!(
            charge = %case.charge,
            verdict = %decision.verdict,
            confidence = decision.confidence,
            bias_score,
            elapsed_us = start.elapsed().as_micros() as u64,
            "adjudication complete"
        );

        Ok(VerdictResult {
            verdict: decision.verdict,
            confidence: decision.confidence,
            reasonable_doubt: self.normative.threshold(),
            prosecution_strength: strengths.prosecution,
            defense_strength: strengths.defense,
            bias_score,
            normative_state: decision.normative_state,
            facts,
            narrative,
        })
    }
}

//! M3 — normative filtering.
//!
//! Applies the reasonable-doubt standard to the side strengths and derives
//! the normative state and the per-run bias score.
//!
//! The decision computation accepts only a [`StrengthPair`] — a type with no
//! field for demographic attributes. Demographics reach this module solely
//! through [`NormativeFilter::bias_probe`], which measures how the margin
//! would move under demographic permutation; they cannot reach the verdict.

use tracing::debug;

use urca_core::{Case, EngineConfig, NormativeState, ScenarioSpec, Side, StrengthPair, Verdict};

use crate::adaptation::AdaptationEngine;
use crate::extractor::FormExtractor;

/// Outcome of the threshold test for one strength pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub verdict: Verdict,
    pub confidence: f64,
    pub margin: f64,
    pub normative_state: NormativeState,
}

/// The normative-filter stage.
#[derive(Debug, Clone)]
pub struct NormativeFilter {
    threshold: f64,
    low_evidence_floor: f64,
    decisiveness_band: f64,
}

impl NormativeFilter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            threshold: config.reasonable_doubt_threshold,
            low_evidence_floor: config.low_evidence_floor,
            decisiveness_band: config.decisiveness_band,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Apply the reasonable-doubt standard.
    ///
    /// GUILTY iff `margin >= threshold` — the boundary is closed on the
    /// prosecution side. Confidence grows with distance from the deadlock
    /// point: `clamp01(0.5 + |margin| / 2)`.
    pub fn decide(&self, strengths: StrengthPair) -> Decision {
        let margin = strengths.margin();
        let verdict = if margin >= self.threshold {
            Verdict::Guilty
        } else {
            Verdict::NotGuilty
        };
        let confidence = (0.5 + margin.abs() / 2.0).clamp(0.0, 1.0);
        let normative_state = self.classify(strengths, margin);

        debug!(
            margin,
            confidence,
            verdict = %verdict,
            state = ?normative_state,
            "normative decision"
        );

        Decision {
            verdict,
            confidence,
            margin,
            normative_state,
        }
    }

    /// Three-way classification of how decisively the run resolved.
    ///
    /// WEAK_PRECEDENT when the evidence is thin on both sides, regardless of
    /// margin; STRONG_PRECEDENT when the margin is far from deadlock;
    /// MODERATE_PRECEDENT near the boundary.
    fn classify(&self, strengths: StrengthPair, margin: f64) -> NormativeState {
        if strengths.prosecution < self.low_evidence_floor
            && strengths.defense < self.low_evidence_floor
        {
            NormativeState::WeakPrecedent
        } else if margin.abs() >= self.decisiveness_band {
            NormativeState::StrongPrecedent
        } else {
            NormativeState::ModeratePrecedent
        }
    }

    /// Per-run bias score: re-derive the margin with demographics permuted
    /// across the reference set and report the maximum shift.
    ///
    /// A score near 0 certifies that demographic substitution alone does not
    /// move the decision. Strength derivation never reads demographics, so
    /// any nonzero shift here would indicate a regression in that contract.
    pub fn bias_probe(
        &self,
        case: &Case,
        extractor: &FormExtractor,
        adaptation: &AdaptationEngine,
    ) -> f64 {
        let base_margin = derive_margin(case, extractor, adaptation);
        ScenarioSpec::reference_set(case)
            .iter()
            .map(|spec| {
                let permuted = spec.apply(case);
                (derive_margin(&permuted, extractor, adaptation) - base_margin).abs()
            })
            .fold(0.0, f64::max)
    }
}

/// Margin for a case under the M1→M2 derivation.
fn derive_margin(case: &Case, extractor: &FormExtractor, adaptation: &AdaptationEngine) -> f64 {
    let facts = extractor.extract(case);
    let strengths = StrengthPair {
        prosecution: adaptation.side_strength(&facts, Side::Prosecution).value,
        defense: adaptation.side_strength(&facts, Side::Defense).value,
    };
    strengths.margin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> NormativeFilter {
        NormativeFilter::new(&EngineConfig::default())
    }

    #[test]
    fn test_margin_at_threshold_convicts() {
        let decision = filter().decide(StrengthPair {
            prosecution: 0.62,
            defense: 0.0,
        });
        assert_eq!(decision.verdict, Verdict::Guilty);
    }

    #[test]
    fn test_margin_below_threshold_acquits() {
        let decision = filter().decide(StrengthPair {
            prosecution: 0.6199999,
            defense: 0.0,
        });
        assert_eq!(decision.verdict, Verdict::NotGuilty);
    }

    #[test]
    fn test_confidence_grows_with_distance_from_deadlock() {
        let narrow = filter().decide(StrengthPair {
            prosecution: 0.5,
            defense: 0.45,
        });
        let wide = filter().decide(StrengthPair {
            prosecution: 0.9,
            defense: 0.2,
        });
        assert!(wide.confidence > narrow.confidence);
        assert!((narrow.confidence - 0.525).abs() < 1e-12);
    }

    #[test]
    fn test_weak_precedent_when_both_sides_thin() {
        let decision = filter().decide(StrengthPair {
            prosecution: 0.1,
            defense: 0.2,
        });
        assert_eq!(decision.normative_state, NormativeState::WeakPrecedent);
    }

    #[test]
    fn test_strong_precedent_on_decisive_margin() {
        let decision = filter().decide(StrengthPair {
            prosecution: 0.9,
            defense: 0.3,
        });
        assert_eq!(decision.normative_state, NormativeState::StrongPrecedent);
    }

    #[test]
    fn test_moderate_precedent_near_boundary() {
        let decision = filter().decide(StrengthPair {
            prosecution: 0.5,
            defense: 0.6,
        });
        assert_eq!(decision.normative_state, NormativeState::ModeratePrecedent);
    }
}

//! M2 — fractional-memory adaptation.
//!
//! Per-side strength is a fractional-memory-weighted combination of
//! credibility and evidentiary weight:
//!
//! ```text
//! strength = Σ_i (weight_i · credibility_i · α^recency_i) / Σ_i weight_i
//! ```
//!
//! α ∈ (0, 1] is the memory-retention rate: recency 0 contributes at full
//! strength, older evidence decays geometrically. Well-corroborated,
//! credible, recent evidence is rewarded; stale or single-witness claims are
//! discounted without being discarded.

use tracing::debug;

use urca_core::{EngineConfig, Fact, Side, SideStrength};

/// The adaptation stage. Holds the configured retention rate.
#[derive(Debug, Clone)]
pub struct AdaptationEngine {
    alpha: f64,
}

impl AdaptationEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            alpha: config.memory_decay_alpha,
        }
    }

    /// Geometric decay factor for a given recency rank.
    pub fn decay(&self, recency: u32) -> f64 {
        self.alpha.powi(recency as i32)
    }

    /// Aggregate strength for one side over the extracted facts.
    ///
    /// A side with no evidence has strength 0 — that is not an error; the
    /// undefined case (no evidence on either side) is rejected before this
    /// stage runs.
    pub fn side_strength(&self, facts: &[Fact], side: Side) -> SideStrength {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for fact in facts.iter().filter(|f| f.side == side) {
            let contribution =
                fact.normalized_weight * fact.normalized_credibility * self.decay(fact.recency);
            if !contribution.is_finite() {
                continue;
            }
            weighted_sum += contribution;
            total_weight += fact.normalized_weight;
        }

        let value = if total_weight > 0.0 {
            (weighted_sum / total_weight).clamp(0.0, 1.0)
        } else {
            0.0
        };

        debug!(side = %side, strength = value, total_weight, "side strength");
        SideStrength { side, value }
    }
}

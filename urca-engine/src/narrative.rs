//! M4 — narrative composition.
//!
//! Deterministic template assembly: the justification references the top-k
//! facts per side (ranked by weight·credibility), the side strengths, the
//! margin against the reasonable-doubt threshold, and the verdict. Identical
//! inputs produce byte-identical text — required for reproducibility
//! testing.

use smallvec::SmallVec;

use urca_core::{Fact, Side, StrengthPair};

use crate::normative::Decision;

/// The narrative stage.
#[derive(Debug, Clone)]
pub struct NarrativeComposer {
    top_k: usize,
}

impl NarrativeComposer {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Compose the justification string for one run.
    pub fn compose(
        &self,
        facts: &[Fact],
        strengths: StrengthPair,
        decision: &Decision,
        threshold: f64,
    ) -> String {
        let mut narrative = String::new();

        self.describe_side(
            &mut narrative,
            facts,
            Side::Prosecution,
            strengths.prosecution,
        );
        narrative.push(' ');
        self.describe_side(&mut narrative, facts, Side::Defense, strengths.defense);
        narrative.push(' ');

        if decision.margin >= threshold {
            narrative.push_str(&format!(
                "The prosecution-over-defense margin of {:.2} meets the reasonable-doubt threshold of {:.2}.",
                decision.margin, threshold
            ));
        } else {
            narrative.push_str(&format!(
                "The prosecution-over-defense margin of {:.2} falls short of the reasonable-doubt threshold of {:.2}.",
                decision.margin, threshold
            ));
        }
        narrative.push_str(&format!(
            " Verdict: {} (confidence {:.2}).",
            decision.verdict, decision.confidence
        ));

        narrative
    }

    /// One sentence summarizing a side's strongest facts and strength.
    fn describe_side(&self, out: &mut String, facts: &[Fact], side: Side, strength: f64) {
        let leading = self.top_facts(facts, side);
        let side_label = match side {
            Side::Prosecution => "The prosecution",
            Side::Defense => "The defense",
        };

        if leading.is_empty() {
            out.push_str(&format!("{side_label} presents no evidence."));
            return;
        }

        let mut cited = String::new();
        for (i, fact) in leading.iter().enumerate() {
            if i > 0 {
                cited.push_str(if i + 1 == leading.len() { " and " } else { ", " });
            }
            cited.push_str(&format!(
                "{} (credibility {:.2})",
                fact.kind, fact.normalized_credibility
            ));
        }
        out.push_str(&format!(
            "{side_label} leads with {cited}, at aggregate strength {strength:.2}."
        ));
    }

    /// Top-k facts for a side by weight·credibility, stable under ties.
    fn top_facts<'a>(&self, facts: &'a [Fact], side: Side) -> SmallVec<[&'a Fact; 2]> {
        let mut side_facts: SmallVec<[&Fact; 2]> =
            facts.iter().filter(|f| f.side == side).collect();
        side_facts.sort_by(|a, b| {
            b.salience()
                .partial_cmp(&a.salience())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        side_facts.truncate(self.top_k);
        side_facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urca_core::{NormativeState, Verdict};

    fn fact(id: &str, side: Side, kind: &str, cred: f64, weight: f64) -> Fact {
        Fact {
            id: format!("fact-{id}"),
            source_evidence_id: id.to_string(),
            side,
            kind: kind.to_string(),
            normalized_credibility: cred,
            normalized_weight: weight,
            recency: 0,
        }
    }

    fn sample_facts() -> Vec<Fact> {
        vec![
            fact("p1", Side::Prosecution, "Eyewitness", 0.6, 0.45),
            fact("p2", Side::Prosecution, "Location", 0.5, 0.30),
            fact("p3", Side::Prosecution, "Motive", 0.3, 0.25),
            fact("d1", Side::Defense, "Alibi", 0.7, 0.40),
            fact("d2", Side::Defense, "Character", 0.6, 0.25),
            fact("d3", Side::Defense, "Expert", 0.8, 0.35),
        ]
    }

    fn acquittal() -> Decision {
        Decision {
            verdict: Verdict::NotGuilty,
            confidence: 0.61,
            margin: -0.215,
            normative_state: NormativeState::ModeratePrecedent,
        }
    }

    #[test]
    fn test_narrative_is_deterministic() {
        let composer = NarrativeComposer::new(2);
        let facts = sample_facts();
        let strengths = StrengthPair {
            prosecution: 0.495,
            defense: 0.71,
        };
        let a = composer.compose(&facts, strengths, &acquittal(), 0.62);
        let b = composer.compose(&facts, strengths, &acquittal(), 0.62);
        assert_eq!(a, b);
    }

    #[test]
    fn test_narrative_cites_top_k_by_salience() {
        let composer = NarrativeComposer::new(2);
        let narrative = composer.compose(
            &sample_facts(),
            StrengthPair {
                prosecution: 0.495,
                defense: 0.71,
            },
            &acquittal(),
            0.62,
        );
        // Defense salience: Alibi 0.28, Expert 0.28, Character 0.15.
        assert!(narrative.contains("Alibi"));
        assert!(narrative.contains("Expert"));
        assert!(!narrative.contains("Character"));
        // Prosecution salience: Eyewitness 0.27, Location 0.15, Motive 0.075.
        assert!(narrative.contains("Eyewitness"));
        assert!(!narrative.contains("Motive"));
    }

    #[test]
    fn test_narrative_states_verdict_and_threshold() {
        let composer = NarrativeComposer::new(2);
        let narrative = composer.compose(
            &sample_facts(),
            StrengthPair {
                prosecution: 0.495,
                defense: 0.71,
            },
            &acquittal(),
            0.62,
        );
        assert!(narrative.contains("falls short of the reasonable-doubt threshold of 0.62"));
        assert!(narrative.ends_with("Verdict: NOT GUILTY (confidence 0.61)."));
    }

    #[test]
    fn test_empty_side_is_named() {
        let composer = NarrativeComposer::new(2);
        let facts = vec![fact("p1", Side::Prosecution, "Eyewitness", 0.6, 0.45)];
        let narrative = composer.compose(
            &facts,
            StrengthPair {
                prosecution: 0.6,
                defense: 0.0,
            },
            &acquittal(),
            0.62,
        );
        assert!(narrative.contains("The defense presents no evidence."));
    }
}

//! M1 — form extraction.
//!
//! Normalizes raw evidence entries into canonical [`Fact`] records: one per
//! evidence item, side-tagged, with credibility/weight identity-mapped (the
//! extraction point for future normalization such as min-max rescaling
//! across the case). Deduplicates repeated `(side, kind, content)` triples,
//! keeping the entry with higher credibility; ties break toward the lower
//! recency, so the most recent telling wins.
//!
//! Idempotent and side-effect-free.

use tracing::debug;

use urca_core::types::collections::FxHashMap;
use urca_core::{Case, EvidenceItem, Fact, Side};

/// The form-extraction stage.
#[derive(Debug, Clone, Default)]
pub struct FormExtractor;

impl FormExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract ordered facts: prosecution first, then defense, each in
    /// first-seen input order.
    pub fn extract(&self, case: &Case) -> Vec<Fact> {
        let mut facts: Vec<Fact> = Vec::with_capacity(
            case.prosecution_evidence.len() + case.defense_evidence.len(),
        );
        let mut seen: FxHashMap<(Side, String, String), usize> = FxHashMap::default();
        let mut dropped = 0usize;

        for item in case.evidence() {
            let key = (item.side(), item.kind().to_string(), item.content().to_string());
            match seen.get(&key) {
                Some(&idx) => {
                    if Self::supersedes(item, &facts[idx]) {
                        facts[idx] = Self::to_fact(item);
                    }
                    dropped += 1;
                }
                None => {
                    seen.insert(key, facts.len());
                    facts.push(Self::to_fact(item));
                }
            }
        }

        let prosecution = facts.iter().filter(|f| f.side == Side::Prosecution).count();
        debug!(
            prosecution_facts = prosecution,
            defense_facts = facts.len() - prosecution,
            dedup_dropped = dropped,
            "form extraction complete"
        );

        facts
    }

    /// A later duplicate replaces the kept fact when it is more credible, or
    /// equally credible but more recent.
    fn supersedes(candidate: &EvidenceItem, kept: &Fact) -> bool {
        candidate.credibility() > kept.normalized_credibility
            || (candidate.credibility() == kept.normalized_credibility
                && candidate.recency() < kept.recency)
    }

    fn to_fact(item: &EvidenceItem) -> Fact {
        Fact {
            id: format!("fact-{}", item.id()),
            source_evidence_id: item.id().to_string(),
            side: item.side(),
            kind: item.kind().to_string(),
            normalized_credibility: item.credibility(),
            normalized_weight: item.weight(),
            recency: item.recency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urca_core::Party;

    fn item(id: &str, side: Side, kind: &str, cred: f64, weight: f64, content: &str, recency: u32) -> EvidenceItem {
        EvidenceItem::new(id, side, kind, cred, weight, content, recency).unwrap()
    }

    fn case_with(prosecution: Vec<EvidenceItem>, defense: Vec<EvidenceItem>) -> Case {
        Case {
            defendant: Party::new("D", 17),
            victim: Party::new("V", 16),
            charge: "Robbery".to_string(),
            prosecution_evidence: prosecution,
            defense_evidence: defense,
        }
    }

    #[test]
    fn test_one_fact_per_item() {
        let case = case_with(
            vec![item("p1", Side::Prosecution, "Eyewitness", 0.6, 0.45, "a", 0)],
            vec![item("d1", Side::Defense, "Alibi", 0.7, 0.4, "b", 0)],
        );
        let facts = FormExtractor::new().extract(&case);
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].side, Side::Prosecution);
        assert_eq!(facts[0].source_evidence_id, "p1");
        assert_eq!(facts[1].side, Side::Defense);
    }

    #[test]
    fn test_identity_normalization() {
        let case = case_with(
            vec![item("p1", Side::Prosecution, "Motive", 0.3, 0.25, "debts", 2)],
            vec![],
        );
        let facts = FormExtractor::new().extract(&case);
        assert_eq!(facts[0].normalized_credibility, 0.3);
        assert_eq!(facts[0].normalized_weight, 0.25);
        assert_eq!(facts[0].recency, 2);
    }

    #[test]
    fn test_dedup_keeps_higher_credibility() {
        let case = case_with(
            vec![
                item("p1", Side::Prosecution, "Eyewitness", 0.4, 0.45, "same telling", 0),
                item("p2", Side::Prosecution, "Eyewitness", 0.7, 0.3, "same telling", 1),
            ],
            vec![],
        );
        let facts = FormExtractor::new().extract(&case);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].source_evidence_id, "p2");
        assert_eq!(facts[0].normalized_credibility, 0.7);
    }

    #[test]
    fn test_dedup_tie_prefers_most_recent() {
        let case = case_with(
            vec![
                item("p1", Side::Prosecution, "Location", 0.5, 0.3, "near scene", 3),
                item("p2", Side::Prosecution, "Location", 0.5, 0.3, "near scene", 1),
            ],
            vec![],
        );
        let facts = FormExtractor::new().extract(&case);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].source_evidence_id, "p2");
        assert_eq!(facts[0].recency, 1);
    }

    #[test]
    fn test_same_content_different_sides_not_deduped() {
        let case = case_with(
            vec![item("p1", Side::Prosecution, "Expert", 0.5, 0.3, "report", 0)],
            vec![item("d1", Side::Defense, "Expert", 0.5, 0.3, "report", 0)],
        );
        let facts = FormExtractor::new().extract(&case);
        assert_eq!(facts.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let case = case_with(
            vec![
                item("p1", Side::Prosecution, "Eyewitness", 0.4, 0.45, "x", 0),
                item("p2", Side::Prosecution, "Eyewitness", 0.7, 0.3, "x", 1),
                item("p3", Side::Prosecution, "Motive", 0.3, 0.25, "y", 2),
            ],
            vec![item("d1", Side::Defense, "Alibi", 0.7, 0.4, "z", 0)],
        );
        let extractor = FormExtractor::new();
        assert_eq!(extractor.extract(&case), extractor.extract(&case));
    }
}

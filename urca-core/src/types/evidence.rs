//! Evidence model: sides and individual evidence items.
//!
//! An [`EvidenceItem`] is immutable once constructed. Construction-time
//! validation is the only checkpoint: `credibility` and `weight` must lie in
//! [0, 1] and be finite, enforced by [`EvidenceItem::new`] and re-checked by
//! [`crate::types::case::Case::validate`] for deserialized documents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Which party an evidence item supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Prosecution,
    Defense,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prosecution => "prosecution",
            Self::Defense => "defense",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prosecution" => Ok(Self::Prosecution),
            "defense" => Ok(Self::Defense),
            other => Err(ValidationError::UnknownSide {
                value: other.to_string(),
            }),
        }
    }
}

/// A single piece of structured evidence.
///
/// `credibility` is source reliability; `weight` is the evidentiary
/// significance assigned by the pipeline; `recency` orders items for
/// fractional-memory decay (0 = most recent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    id: String,
    side: Side,
    kind: String,
    credibility: f64,
    weight: f64,
    content: String,
    #[serde(default)]
    recency: u32,
}

impl EvidenceItem {
    /// Validating constructor — the only way to build an item in typed code.
    pub fn new(
        id: impl Into<String>,
        side: Side,
        kind: impl Into<String>,
        credibility: f64,
        weight: f64,
        content: impl Into<String>,
        recency: u32,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if !credibility.is_finite() || !(0.0..=1.0).contains(&credibility) {
            return Err(ValidationError::CredibilityOutOfRange {
                evidence_id: id,
                value: credibility,
            });
        }
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(ValidationError::WeightOutOfRange {
                evidence_id: id,
                value: weight,
            });
        }
        Ok(Self {
            id,
            side,
            kind: kind.into(),
            credibility,
            weight,
            content: content.into(),
            recency,
        })
    }

    /// Re-check the range invariants for an item that bypassed [`Self::new`]
    /// (deserialized from a document).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.credibility.is_finite() || !(0.0..=1.0).contains(&self.credibility) {
            return Err(ValidationError::CredibilityOutOfRange {
                evidence_id: self.id.clone(),
                value: self.credibility,
            });
        }
        if !self.weight.is_finite() || !(0.0..=1.0).contains(&self.weight) {
            return Err(ValidationError::WeightOutOfRange {
                evidence_id: self.id.clone(),
                value: self.weight,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Evidence category label ("Eyewitness", "Alibi", ...).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn credibility(&self) -> f64 {
        self.credibility
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn recency(&self) -> u32 {
        self.recency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_item() {
        let item = EvidenceItem::new("e1", Side::Prosecution, "Eyewitness", 0.6, 0.45, "saw it", 0)
            .unwrap();
        assert_eq!(item.id(), "e1");
        assert_eq!(item.side(), Side::Prosecution);
        assert_eq!(item.credibility(), 0.6);
        assert_eq!(item.recency(), 0);
    }

    #[test]
    fn test_credibility_out_of_range() {
        let err = EvidenceItem::new("e1", Side::Defense, "Alibi", 1.2, 0.4, "x", 0).unwrap_err();
        assert!(matches!(err, ValidationError::CredibilityOutOfRange { .. }));
    }

    #[test]
    fn test_weight_nan_rejected() {
        let err =
            EvidenceItem::new("e1", Side::Defense, "Alibi", 0.5, f64::NAN, "x", 0).unwrap_err();
        assert!(matches!(err, ValidationError::WeightOutOfRange { .. }));
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert!(EvidenceItem::new("e1", Side::Prosecution, "Motive", 0.0, 1.0, "x", 0).is_ok());
        assert!(EvidenceItem::new("e2", Side::Prosecution, "Motive", 1.0, 0.0, "x", 0).is_ok());
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("prosecution".parse::<Side>().unwrap(), Side::Prosecution);
        assert_eq!("defense".parse::<Side>().unwrap(), Side::Defense);
        assert!(matches!(
            "plaintiff".parse::<Side>(),
            Err(ValidationError::UnknownSide { .. })
        ));
    }
}

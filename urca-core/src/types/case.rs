//! Case documents and scenario overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ComputationError, ValidationError};
use crate::types::evidence::EvidenceItem;

/// A party to the case. Demographic attributes are free-form key/value pairs
/// ("race", "gender", ...) kept in a BTreeMap so serialization is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub demographics: BTreeMap<String, String>,
}

impl Party {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            demographics: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.demographics.insert(key.into(), value.into());
        self
    }
}

/// A full case: two parties, a charge, and structured evidence for each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub defendant: Party,
    pub victim: Party,
    pub charge: String,
    #[serde(default)]
    pub prosecution_evidence: Vec<EvidenceItem>,
    #[serde(default)]
    pub defense_evidence: Vec<EvidenceItem>,
}

impl Case {
    /// Parse a case document from JSON and run it through the same fail-fast
    /// validation gate as typed construction.
    pub fn from_json_str(raw: &str) -> Result<Self, ValidationError> {
        let case: Self = serde_json::from_str(raw).map_err(|e| ValidationError::Document {
            message: e.to_string(),
        })?;
        case.validate()?;
        Ok(case)
    }

    /// Re-check every evidence item's range invariants. First failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for item in self.prosecution_evidence.iter().chain(&self.defense_evidence) {
            item.validate()?;
        }
        Ok(())
    }

    /// Adjudication is undefined for a case with no evidence on either side.
    pub fn check_adjudicable(&self) -> Result<(), ComputationError> {
        if self.prosecution_evidence.is_empty() && self.defense_evidence.is_empty() {
            return Err(ComputationError::EmptyCase {
                charge: self.charge.clone(),
            });
        }
        Ok(())
    }

    /// All evidence, prosecution first, in input order.
    pub fn evidence(&self) -> impl Iterator<Item = &EvidenceItem> {
        self.prosecution_evidence.iter().chain(&self.defense_evidence)
    }
}

/// A demographic permutation of a base case, used only by the scenario
/// harness and the per-run bias probe.
///
/// The override carries demographics only — it has no evidence fields, so a
/// permutation cannot smuggle in evidentiary change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub label: String,
    #[serde(default)]
    pub defendant_demographics: BTreeMap<String, String>,
    #[serde(default)]
    pub victim_demographics: BTreeMap<String, String>,
}

impl ScenarioSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            defendant_demographics: BTreeMap::new(),
            victim_demographics: BTreeMap::new(),
        }
    }

    /// Parse a scenario document: a JSON array of permutations.
    ///
    /// An entry that tries to override evidence is rejected before
    /// deserialization — demographic change must not smuggle in evidentiary
    /// change.
    pub fn list_from_json_str(raw: &str) -> Result<Vec<Self>, ValidationError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| ValidationError::Document {
                message: e.to_string(),
            })?;
        if let Some(entries) = value.as_array() {
            for entry in entries {
                let label = entry
                    .get("label")
                    .and_then(|l| l.as_str())
                    .unwrap_or("<unlabeled>");
                if entry.get("prosecution_evidence").is_some()
                    || entry.get("defense_evidence").is_some()
                {
                    return Err(ValidationError::EvidenceInOverride {
                        label: label.to_string(),
                    });
                }
            }
        }
        serde_json::from_value(value).map_err(|e| ValidationError::Document {
            message: e.to_string(),
        })
    }

    /// Clone the base case with both parties' demographics rewritten.
    /// Evidence is carried over untouched.
    pub fn apply(&self, base: &Case) -> Case {
        let mut case = base.clone();
        case.defendant.demographics = self.defendant_demographics.clone();
        case.victim.demographics = self.victim_demographics.clone();
        case
    }

    /// The four-way reference permutation set: original, reversed, and two
    /// controls where both parties share one side's attributes.
    pub fn reference_set(base: &Case) -> Vec<ScenarioSpec> {
        let d = &base.defendant.demographics;
        let v = &base.victim.demographics;
        vec![
            ScenarioSpec {
                label: "original".to_string(),
                defendant_demographics: d.clone(),
                victim_demographics: v.clone(),
            },
            ScenarioSpec {
                label: "reversed".to_string(),
                defendant_demographics: v.clone(),
                victim_demographics: d.clone(),
            },
            ScenarioSpec {
                label: "control_victim".to_string(),
                defendant_demographics: v.clone(),
                victim_demographics: v.clone(),
            },
            ScenarioSpec {
                label: "control_defendant".to_string(),
                defendant_demographics: d.clone(),
                victim_demographics: d.clone(),
            },
        ]
    }
}

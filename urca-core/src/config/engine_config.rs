//! Adjudication policy knobs.
//!
//! The decay rate, decision threshold, and narrative selection width are
//! policy parameters a real adjudication system needs to tune and audit, so
//! they live here rather than as literals in the stages.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Configuration for the adjudication pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fractional-memory retention rate α ∈ (0, 1]. Evidence at recency r
    /// contributes α^r of its weighted credibility.
    pub memory_decay_alpha: f64,
    /// Minimum prosecution-over-defense margin required to convict.
    pub reasonable_doubt_threshold: f64,
    /// Facts cited per side in the narrative.
    pub narrative_top_k: usize,
    /// Both strengths below this floor classifies the run as WEAK_PRECEDENT.
    pub low_evidence_floor: f64,
    /// |margin| at or beyond this band classifies the run as
    /// STRONG_PRECEDENT (unless the low-evidence floor applies).
    pub decisiveness_band: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memory_decay_alpha: 0.55,
            reasonable_doubt_threshold: 0.62,
            narrative_top_k: 2,
            low_evidence_floor: 0.35,
            decisiveness_band: 0.25,
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file and validate.
    pub fn from_toml_path(path: &Path) -> Result<Self, ValidationError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ValidationError::Document {
            message: format!("{}: {}", path.display(), e),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| ValidationError::Document {
            message: format!("{}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-domain knobs. First failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.memory_decay_alpha.is_finite()
            || self.memory_decay_alpha <= 0.0
            || self.memory_decay_alpha > 1.0
        {
            return Err(ValidationError::ConfigOutOfDomain {
                knob: "memory_decay_alpha",
                value: self.memory_decay_alpha,
            });
        }
        if !self.reasonable_doubt_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.reasonable_doubt_threshold)
        {
            return Err(ValidationError::ConfigOutOfDomain {
                knob: "reasonable_doubt_threshold",
                value: self.reasonable_doubt_threshold,
            });
        }
        if self.narrative_top_k == 0 {
            return Err(ValidationError::ConfigOutOfDomain {
                knob: "narrative_top_k",
                value: 0.0,
            });
        }
        if !self.low_evidence_floor.is_finite() || !(0.0..=1.0).contains(&self.low_evidence_floor) {
            return Err(ValidationError::ConfigOutOfDomain {
                knob: "low_evidence_floor",
                value: self.low_evidence_floor,
            });
        }
        if !self.decisiveness_band.is_finite() || !(0.0..=1.0).contains(&self.decisiveness_band) {
            return Err(ValidationError::ConfigOutOfDomain {
                knob: "decisiveness_band",
                value: self.decisiveness_band,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_values() {
        let config = EngineConfig::default();
        assert_eq!(config.memory_decay_alpha, 0.55);
        assert_eq!(config.reasonable_doubt_threshold, 0.62);
        assert_eq!(config.narrative_top_k, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_alpha_zero_rejected() {
        let config = EngineConfig {
            memory_decay_alpha: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ConfigOutOfDomain {
                knob: "memory_decay_alpha",
                ..
            }
        ));
    }

    #[test]
    fn test_alpha_one_accepted() {
        let config = EngineConfig {
            memory_decay_alpha: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urca.toml");
        std::fs::write(&path, "reasonable_doubt_threshold = 0.5\n").unwrap();
        let config = EngineConfig::from_toml_path(&path).unwrap();
        assert_eq!(config.reasonable_doubt_threshold, 0.5);
        assert_eq!(config.memory_decay_alpha, 0.55);
    }

    #[test]
    fn test_toml_out_of_domain_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urca.toml");
        std::fs::write(&path, "memory_decay_alpha = 1.5\n").unwrap();
        assert!(EngineConfig::from_toml_path(&path).is_err());
    }
}

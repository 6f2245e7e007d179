//! Construction-time validation errors.

use super::error_code::UrcaErrorCode;

/// Errors raised while validating evidence, case documents, scenario
/// overrides, or configuration. Reported per item, fail-fast: the first
/// offending item aborts construction.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("evidence {evidence_id}: credibility {value} outside [0, 1]")]
    CredibilityOutOfRange { evidence_id: String, value: f64 },

    #[error("evidence {evidence_id}: weight {value} outside [0, 1]")]
    WeightOutOfRange { evidence_id: String, value: f64 },

    #[error("unknown side: {value}")]
    UnknownSide { value: String },

    #[error("scenario {label}: demographic override must not carry evidence")]
    EvidenceInOverride { label: String },

    #[error("config knob {knob} out of domain: {value}")]
    ConfigOutOfDomain { knob: &'static str, value: f64 },

    #[error("case document error: {message}")]
    Document { message: String },
}

impl UrcaErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CredibilityOutOfRange { .. } => "VALIDATION_CREDIBILITY_OUT_OF_RANGE",
            Self::WeightOutOfRange { .. } => "VALIDATION_WEIGHT_OUT_OF_RANGE",
            Self::UnknownSide { .. } => "VALIDATION_UNKNOWN_SIDE",
            Self::EvidenceInOverride { .. } => "VALIDATION_EVIDENCE_IN_OVERRIDE",
            Self::ConfigOutOfDomain { .. } => "VALIDATION_CONFIG_OUT_OF_DOMAIN",
            Self::Document { .. } => "VALIDATION_DOCUMENT",
        }
    }
}

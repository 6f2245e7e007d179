//! Stable machine-readable error codes.

/// Every URCA error exposes a stable, machine-readable code suitable for
/// logs and per-scenario error entries.
pub trait UrcaErrorCode {
    fn error_code(&self) -> &'static str;
}

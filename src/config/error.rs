//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric environment variable could not be parsed.
    #[error("failed to parse {name}='{value}' as a number: {source}")]
    NumberParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Similarity threshold is outside the usable range.
    #[error("similarity threshold {value} out of range: must be in (0, 1]")]
    ThresholdOutOfRange { value: f32 },

    /// A bound that must be at least one was zero.
    #[error("{name} must be at least 1")]
    ZeroBound { name: &'static str },

    /// A required environment variable was not set.
    ///
    /// Only surfaced when wiring real backends; mocked setups never need
    /// credentials.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },
}

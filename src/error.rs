//! Error types for clash detection.
//!
//! Validation problems in the input are not errors: they are reported through
//! [`crate::ClashDetectionResult::ValidationFailed`]. Everything here is an
//! unexpected failure that aborts the detection run.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClashError>;

#[derive(Debug, Error)]
pub enum ClashError {
    /// Bounds aggregation was asked to combine zero boxes.
    #[error("cannot compute bounds of an empty set of boxes")]
    EmptyInput,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request body is not a well-formed layout request. This is the
    /// caller's fault, unlike the other variants.
    #[error("malformed request: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl ClashError {
    /// Whether the failure was caused by the request payload itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClashError::MalformedRequest(_))
    }
}

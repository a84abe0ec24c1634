//! Service error types.
//!
//! [`ModelError`] covers artifact loading and inference failures.
//! [`PredictError`] is what a prediction request can fail with; its
//! `Display` strings are the exact messages returned to clients.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use vocalis_types::FeatureError;

/// Errors produced while loading artifacts or running inference.
#[derive(Error, Debug)]
pub enum ModelError {
    /// An artifact file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact file is not valid JSON for its schema.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An artifact parsed but its contents are unusable.
    #[error("invalid {artifact} artifact: {reason}")]
    InvalidArtifact {
        artifact: &'static str,
        reason: String,
    },

    /// A sample's column count does not match the fitted width.
    #[error("feature count mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A computation stage produced NaN or infinity.
    #[error("{stage} produced a non-finite value")]
    NonFinite { stage: &'static str },

    /// The classifier returned no output for the sample.
    #[error("classifier returned no output")]
    EmptyOutput,

    /// The classifier returned a label outside the binary range.
    #[error(transparent)]
    Label(#[from] FeatureError),
}

/// The specific way a request body failed validation.
///
/// Only logged; clients always see the single fixed constraint message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputViolation {
    #[error("body is not valid JSON: {0}")]
    MalformedBody(String),

    #[error("body is not a JSON object")]
    NotAnObject,

    #[error("missing \"features\" key")]
    MissingFeatures,

    #[error("\"features\" is not an array")]
    NotASequence,

    #[error("expected 22 features, got {0}")]
    WrongLength(usize),

    #[error("feature at index {0} is not a number")]
    NonNumeric(usize),
}

/// Failure modes of a single prediction request.
#[derive(Error, Debug)]
pub enum PredictError {
    /// Artifacts did not load at startup.
    #[error("Model not loaded on server. Check server console for file errors.")]
    ServiceUnavailable,

    /// The request body does not have the required shape.
    #[error("Input array must contain exactly 22 numerical features under the \"features\" key.")]
    InvalidInput(#[source] InputViolation),

    /// Scaling or inference failed on a well-formed input.
    #[error("An internal server error occurred during prediction.")]
    Internal(#[source] ModelError),
}

/// JSON error payload returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl PredictError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            PredictError::InvalidInput(_) => 400,
            PredictError::ServiceUnavailable | PredictError::Internal(_) => 500,
        }
    }

    /// Client-facing body. Only internal errors carry `details`.
    pub fn body(&self) -> ErrorBody {
        let details = match self {
            PredictError::Internal(err) => Some(err.to_string()),
            _ => None,
        };
        ErrorBody {
            error: self.to_string(),
            details,
        }
    }
}

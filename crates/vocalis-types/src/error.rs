//! Error types for feature-level validation.

use thiserror::Error;

/// Errors raised while building a [`FeatureVector`](crate::FeatureVector)
/// or interpreting a [`Label`](crate::Label).
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FeatureError {
    /// The vector does not have the expected number of features.
    #[error("expected {expected} features, got {actual}")]
    WrongArity {
        /// Required feature count.
        expected: usize,
        /// Feature count actually supplied.
        actual: usize,
    },

    /// The classifier produced a label outside the binary range.
    #[error("unknown label: {0}")]
    UnknownLabel(i64),
}

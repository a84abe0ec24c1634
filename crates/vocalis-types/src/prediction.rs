//! Prediction input and output types.
//!
//! A [`FeatureVector`] is the validated 22-value acoustic sample sent by a
//! client. A [`PredictionResult`] is what goes back: the binary [`Label`]
//! and the fixed human-readable message for it.

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// Number of acoustic features the classifier expects.
pub const FEATURE_COUNT: usize = 22;

/// Feature names, in the order the classifier expects them.
///
/// These are the voice measurement columns of the training dataset, with
/// the target column removed.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "MDVP:Fo(Hz)",
    "MDVP:Fhi(Hz)",
    "MDVP:Flo(Hz)",
    "MDVP:Jitter(%)",
    "MDVP:Jitter(Abs)",
    "MDVP:RAP",
    "MDVP:PPQ",
    "Jitter:DDP",
    "MDVP:Shimmer",
    "MDVP:Shimmer(dB)",
    "Shimmer:APQ3",
    "Shimmer:APQ5",
    "MDVP:APQ",
    "Shimmer:DDA",
    "NHR",
    "HNR",
    "RPDE",
    "DFA",
    "spread1",
    "spread2",
    "D2",
    "PPE",
];

/// Message returned for [`Label::Healthy`].
pub const HEALTHY_MESSAGE: &str =
    "The model predicts a Healthy result based on the acoustic features.";

/// Message returned for [`Label::Disease`].
pub const DISEASE_MESSAGE: &str =
    "The model predicts the presence of Parkinson's Disease based on the acoustic features.";

// ── FeatureVector ───────────────────────────────────────────────────────

/// An ordered sample of exactly [`FEATURE_COUNT`] raw measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Borrow the values in feature order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of features (always [`FEATURE_COUNT`]).
    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = FeatureError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        let actual = values.len();
        let array: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| FeatureError::WrongArity {
                expected: FEATURE_COUNT,
                actual,
            })?;
        Ok(Self(array))
    }
}

// ── Label ───────────────────────────────────────────────────────────────

/// Binary classifier output. Serialized as its integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum Label {
    /// Class 0.
    Healthy,
    /// Class 1.
    Disease,
}

impl Label {
    /// The fixed message shown to users for this label.
    pub fn message(self) -> &'static str {
        match self {
            Label::Healthy => HEALTHY_MESSAGE,
            Label::Disease => DISEASE_MESSAGE,
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        match label {
            Label::Healthy => 0,
            Label::Disease => 1,
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = FeatureError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Healthy),
            1 => Ok(Label::Disease),
            other => Err(FeatureError::UnknownLabel(other)),
        }
    }
}

// ── PredictionResult ────────────────────────────────────────────────────

/// Successful response body for a single prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted class.
    pub prediction: Label,
    /// Human-readable message derived from `prediction`.
    pub message: String,
}

impl From<Label> for PredictionResult {
    fn from(label: Label) -> Self {
        Self {
            prediction: label,
            message: label.message().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_vector_requires_exact_arity() {
        let ok = FeatureVector::try_from(vec![0.5; FEATURE_COUNT]).unwrap();
        assert_eq!(ok.len(), FEATURE_COUNT);
        assert_eq!(ok.as_slice()[0], 0.5);

        let err = FeatureVector::try_from(vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            FeatureError::WrongArity {
                expected: 22,
                actual: 3
            }
        );

        let err = FeatureVector::try_from(vec![0.0; 23]).unwrap_err();
        assert!(matches!(err, FeatureError::WrongArity { actual: 23, .. }));
    }

    #[test]
    fn feature_names_are_unique() {
        let mut names = FEATURE_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn label_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Label::Healthy).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Label::Disease).unwrap(), "1");

        let parsed: Label = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Label::Disease);
        assert!(serde_json::from_str::<Label>("2").is_err());
    }

    #[test]
    fn label_from_raw_output() {
        assert_eq!(Label::try_from(0).unwrap(), Label::Healthy);
        assert_eq!(Label::try_from(1).unwrap(), Label::Disease);
        assert_eq!(
            Label::try_from(-1).unwrap_err(),
            FeatureError::UnknownLabel(-1)
        );
    }

    #[test]
    fn result_body_shape() {
        let body = serde_json::to_value(PredictionResult::from(Label::Healthy)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "prediction": 0,
                "message": "The model predicts a Healthy result based on the acoustic features."
            })
        );

        let body = serde_json::to_value(PredictionResult::from(Label::Disease)).unwrap();
        assert_eq!(body["prediction"], 1);
        assert_eq!(
            body["message"],
            "The model predicts the presence of Parkinson's Disease based on the acoustic features."
        );
    }
}

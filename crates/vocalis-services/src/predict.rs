//! The prediction pipeline: validate → scale → infer → shape.

use std::collections::HashMap;

use serde_json::value::RawValue;
use tracing::{debug, warn};
use vocalis_types::{FEATURE_COUNT, FeatureVector, PredictionResult};

use crate::error::{InputViolation, PredictError};
use crate::model::ModelStore;

/// Stateless request handler over an immutable [`ModelStore`].
#[derive(Debug, Clone)]
pub struct PredictionService {
    store: ModelStore,
}

impl PredictionService {
    pub fn new(store: ModelStore) -> Self {
        Self { store }
    }

    /// The model store this service predicts with.
    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    /// Run one prediction from a raw request body.
    ///
    /// The readiness check comes first, so an unloaded store refuses every
    /// request before the body is even parsed.
    pub fn predict(&self, body: &[u8]) -> Result<PredictionResult, PredictError> {
        let Some(model) = self.store.ready() else {
            warn!("prediction refused: model not loaded");
            return Err(PredictError::ServiceUnavailable);
        };

        let features = parse_features(body).map_err(|violation| {
            debug!(%violation, "prediction input rejected");
            PredictError::InvalidInput(violation)
        })?;

        debug!("running inference");
        let label = model.infer(&features).map_err(PredictError::Internal)?;
        Ok(PredictionResult::from(label))
    }
}

/// Extract the feature vector from a `{"features": [...]}` body.
///
/// Feature entries are read as raw number tokens, so a value outside the
/// `f64` range becomes an infinity for the scaler to reject instead of
/// failing the parse.
pub fn parse_features(body: &[u8]) -> Result<FeatureVector, InputViolation> {
    let raw: &RawValue = serde_json::from_slice(body)
        .map_err(|e| InputViolation::MalformedBody(e.to_string()))?;
    let object: HashMap<String, &RawValue> =
        serde_json::from_str(raw.get()).map_err(|_| InputViolation::NotAnObject)?;
    let features = match object.get("features") {
        None => return Err(InputViolation::MissingFeatures),
        Some(features) if features.get() == "null" => return Err(InputViolation::MissingFeatures),
        Some(features) => features,
    };
    let items: Vec<&RawValue> =
        serde_json::from_str(features.get()).map_err(|_| InputViolation::NotASequence)?;
    if items.len() != FEATURE_COUNT {
        return Err(InputViolation::WrongLength(items.len()));
    }

    let values = items
        .iter()
        .enumerate()
        .map(|(i, item)| number_token(item.get()).ok_or(InputViolation::NonNumeric(i)))
        .collect::<Result<Vec<f64>, _>>()?;
    FeatureVector::try_from(values).map_err(|_| InputViolation::WrongLength(items.len()))
}

/// Parse a JSON number token. Out-of-range magnitudes saturate to infinity.
fn number_token(token: &str) -> Option<f64> {
    match token.as_bytes().first() {
        Some(b'-' | b'0'..=b'9') => token.parse().ok(),
        _ => None,
    }
}

//! Services for the vocalis classifier.
//!
//! Provides the [`ModelStore`](model::ModelStore) holding the loaded scaler
//! and classifier, the [`PredictionService`](predict::PredictionService)
//! that turns a raw request body into a prediction, and (behind the `api`
//! feature) the axum router exposing it over HTTP.

#[cfg(feature = "api")]
pub mod api;
pub mod error;
pub mod model;
pub mod predict;
#[cfg(test)]
mod test_log;

pub use error::{ErrorBody, InputViolation, ModelError, PredictError};
pub use model::{LoadedModel, ModelStore};
pub use predict::PredictionService;

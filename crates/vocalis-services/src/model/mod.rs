//! Model store: the loaded scaling transform and classifier.
//!
//! Both artifacts are exported offline as JSON (see [`scaler`] and
//! [`classifier`] for the schemas) and loaded once at startup. The
//! resulting [`ModelStore`] is either [`Ready`](ModelStore::Ready) with both
//! artifacts or [`Unavailable`](ModelStore::Unavailable) with neither; there
//! is no state in which only one of them is usable.

pub mod classifier;
pub mod scaler;

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2, ArrayView2, Axis, aview1};
use serde::de::DeserializeOwned;
use tracing::{error, info};
use vocalis_types::config::ArtifactsConfig;
use vocalis_types::{FEATURE_COUNT, FeatureVector, Label};

use crate::error::ModelError;

pub use classifier::{Kernel, LinearClassifier, SvcClassifier};
pub use scaler::StandardScaler;

/// A fitted per-feature transform applied before inference.
pub trait Scaler: Send + Sync {
    /// Number of columns the transform was fitted on.
    fn n_features(&self) -> usize;

    /// Transform a `(n_samples, n_features)` matrix.
    fn transform(&self, samples: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError>;
}

/// A fitted binary decision function.
pub trait Classifier: Send + Sync {
    /// Short identifier of the model family (e.g. `"svc/rbf"`).
    fn kind(&self) -> String;

    /// Number of columns the classifier was fitted on.
    fn n_features(&self) -> usize;

    /// Predict one raw class label per row of `samples`.
    fn predict(&self, samples: ArrayView2<'_, f64>) -> Result<Array1<i64>, ModelError>;
}

/// Read and deserialize a JSON artifact.
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ── LoadedModel ─────────────────────────────────────────────────────────

/// A scaler and classifier that were loaded together and agree on width.
pub struct LoadedModel {
    scaler: Arc<dyn Scaler>,
    classifier: Arc<dyn Classifier>,
    loaded_at: DateTime<Utc>,
}

impl LoadedModel {
    /// Pair a scaler with a classifier.
    ///
    /// Both must be fitted on exactly [`FEATURE_COUNT`] columns.
    pub fn new(
        scaler: Arc<dyn Scaler>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, ModelError> {
        if scaler.n_features() != FEATURE_COUNT {
            return Err(ModelError::InvalidArtifact {
                artifact: "scaler",
                reason: format!(
                    "fitted on {} features, expected {FEATURE_COUNT}",
                    scaler.n_features()
                ),
            });
        }
        if classifier.n_features() != FEATURE_COUNT {
            return Err(ModelError::InvalidArtifact {
                artifact: "classifier",
                reason: format!(
                    "fitted on {} features, expected {FEATURE_COUNT}",
                    classifier.n_features()
                ),
            });
        }
        Ok(Self {
            scaler,
            classifier,
            loaded_at: Utc::now(),
        })
    }

    /// Load both artifacts from disk. Fails if either one fails.
    pub fn from_paths(paths: &ArtifactsConfig) -> Result<Self, ModelError> {
        let classifier = classifier::load(&paths.model)?;
        let scaler = StandardScaler::from_path(&paths.scaler)?;
        Self::new(Arc::new(scaler), classifier)
    }

    /// Scale a single sample and classify it.
    pub fn infer(&self, features: &FeatureVector) -> Result<Label, ModelError> {
        let sample = aview1(features.as_slice()).insert_axis(Axis(0));
        let standardized = self.scaler.transform(sample)?;
        let labels = self.classifier.predict(standardized.view())?;
        let raw = labels.first().copied().ok_or(ModelError::EmptyOutput)?;
        Ok(Label::try_from(raw)?)
    }

    /// Model family of the loaded classifier.
    pub fn classifier_kind(&self) -> String {
        self.classifier.kind()
    }

    /// When the artifacts were loaded.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

// ── ModelStore ──────────────────────────────────────────────────────────

/// Immutable, shareable holder of the loaded model.
#[derive(Clone)]
pub enum ModelStore {
    /// Both artifacts loaded.
    Ready(Arc<LoadedModel>),
    /// Loading failed; every prediction is refused.
    Unavailable {
        /// Why loading failed, for diagnostics.
        reason: String,
    },
}

impl ModelStore {
    /// Load the artifacts, logging and recording failure instead of
    /// returning it.
    pub fn load(paths: &ArtifactsConfig) -> Self {
        match LoadedModel::from_paths(paths) {
            Ok(model) => {
                info!(
                    classifier = %model.classifier_kind(),
                    features = FEATURE_COUNT,
                    "model and scaler loaded, server ready"
                );
                Self::Ready(Arc::new(model))
            }
            Err(e) => {
                error!(
                    model = %paths.model.display(),
                    scaler = %paths.scaler.display(),
                    error = %e,
                    "failed to load model artifacts; predictions will be refused"
                );
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// The loaded model, if any.
    pub fn ready(&self) -> Option<&LoadedModel> {
        match self {
            Self::Ready(model) => Some(model.as_ref()),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl From<LoadedModel> for ModelStore {
    fn from(model: LoadedModel) -> Self {
        Self::Ready(Arc::new(model))
    }
}

impl std::fmt::Debug for ModelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(model) => f
                .debug_struct("Ready")
                .field("classifier", &model.classifier_kind())
                .field("loaded_at", &model.loaded_at)
                .finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

//! Standardization transform (`(x - mean) / scale`).
//!
//! Artifact schema:
//!
//! ```json
//! { "mean": [f64; n], "scale": [f64; n] }
//! ```
//!
//! These are the fitted `mean_` and `scale_` of a scikit-learn
//! `StandardScaler`. A scale of exactly zero is replaced by one, which is
//! how scikit-learn treats constant features.

use std::path::Path;

use ndarray::{Array1, Array2, ArrayView2};
use serde::Deserialize;

use super::{Scaler, read_artifact};
use crate::error::ModelError;

#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Per-column standardization fitted offline.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Build a scaler from fitted parameters.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ModelError> {
        let invalid = |reason: String| ModelError::InvalidArtifact {
            artifact: "scaler",
            reason,
        };

        if mean.is_empty() {
            return Err(invalid("mean is empty".into()));
        }
        if mean.len() != scale.len() {
            return Err(invalid(format!(
                "mean has {} entries but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        if let Some(i) = mean.iter().position(|v| !v.is_finite()) {
            return Err(invalid(format!("mean[{i}] is not finite")));
        }
        if let Some(i) = scale.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid(format!("scale[{i}] must be finite and non-negative")));
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();
        Ok(Self {
            mean: Array1::from_vec(mean),
            scale,
        })
    }

    /// Load a scaler artifact from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let artifact: ScalerArtifact = read_artifact(path)?;
        Self::new(artifact.mean, artifact.scale)
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, samples: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        if samples.ncols() != self.mean.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.mean.len(),
                actual: samples.ncols(),
            });
        }
        let centered = &samples - &self.mean;
        let standardized = centered / &self.scale;
        if standardized.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite { stage: "scaler" });
        }
        Ok(standardized)
    }
}

//! Binary classifiers exported from scikit-learn.
//!
//! The artifact is a JSON object tagged by `kind`:
//!
//! ```json
//! { "kind": "linear", "coef": [..], "intercept": 0.1 }
//!
//! { "kind": "svc", "kernel": "rbf", "gamma": 0.045,
//!   "support_vectors": [[..], ..], "dual_coef": [..], "intercept": -0.3 }
//! ```
//!
//! `dual_coef` and `intercept` are the public `dual_coef_[0]` and
//! `intercept_[0]` of a fitted binary `SVC`, already sign-adjusted so that a
//! positive decision value selects `classes[1]`. `classes` is optional and
//! defaults to `[0, 1]`. For `poly` and `sigmoid` kernels `coef0` defaults
//! to `0.0` and `degree` to `3`.

use std::path::Path;
use std::sync::Arc;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::Deserialize;

use super::{Classifier, read_artifact};
use crate::error::ModelError;

const ARTIFACT: &str = "classifier";

fn default_classes() -> [i64; 2] {
    [0, 1]
}

fn default_degree() -> u32 {
    3
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClassifierArtifact {
    Linear(LinearArtifact),
    Svc(SvcArtifact),
}

#[derive(Debug, Deserialize)]
struct LinearArtifact {
    coef: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_classes")]
    classes: [i64; 2],
}

#[derive(Debug, Deserialize)]
struct SvcArtifact {
    kernel: KernelKind,
    #[serde(default)]
    gamma: Option<f64>,
    #[serde(default)]
    coef0: f64,
    #[serde(default = "default_degree")]
    degree: u32,
    support_vectors: Vec<Vec<f64>>,
    dual_coef: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_classes")]
    classes: [i64; 2],
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KernelKind {
    Linear,
    Rbf,
    Poly,
    Sigmoid,
}

/// Load a classifier artifact from a JSON file.
pub fn load(path: &Path) -> Result<Arc<dyn Classifier>, ModelError> {
    let artifact: ClassifierArtifact = read_artifact(path)?;
    let classifier: Arc<dyn Classifier> = match artifact {
        ClassifierArtifact::Linear(a) => {
            Arc::new(LinearClassifier::new(a.coef, a.intercept)?.with_classes(a.classes)?)
        }
        ClassifierArtifact::Svc(a) => Arc::new(SvcClassifier::from_artifact(a)?),
    };
    Ok(classifier)
}

fn invalid(reason: impl Into<String>) -> ModelError {
    ModelError::InvalidArtifact {
        artifact: ARTIFACT,
        reason: reason.into(),
    }
}

fn check_finite(values: &[f64], field: &str) -> Result<(), ModelError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(invalid(format!("{field}[{i}] is not finite"))),
        None => Ok(()),
    }
}

fn check_classes(classes: [i64; 2]) -> Result<[i64; 2], ModelError> {
    if classes[0] == classes[1] {
        return Err(invalid(format!("classes must be distinct, got {classes:?}")));
    }
    Ok(classes)
}

/// Threshold decision values at zero into class labels.
fn decide(decision: Array1<f64>, classes: [i64; 2]) -> Result<Array1<i64>, ModelError> {
    if decision.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NonFinite {
            stage: "classifier",
        });
    }
    Ok(decision.mapv(|d| if d > 0.0 { classes[1] } else { classes[0] }))
}

fn check_width(samples: &ArrayView2<'_, f64>, expected: usize) -> Result<(), ModelError> {
    if samples.ncols() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            actual: samples.ncols(),
        });
    }
    Ok(())
}

// ── Linear ──────────────────────────────────────────────────────────────

/// Linear decision function `coef · x + intercept`.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coef: Array1<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LinearClassifier {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        if coef.is_empty() {
            return Err(invalid("coef is empty"));
        }
        check_finite(&coef, "coef")?;
        check_finite(&[intercept], "intercept")?;
        Ok(Self {
            coef: Array1::from_vec(coef),
            intercept,
            classes: default_classes(),
        })
    }

    /// Override the `[negative, positive]` class labels.
    pub fn with_classes(mut self, classes: [i64; 2]) -> Result<Self, ModelError> {
        self.classes = check_classes(classes)?;
        Ok(self)
    }
}

impl Classifier for LinearClassifier {
    fn kind(&self) -> String {
        "linear".into()
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, samples: ArrayView2<'_, f64>) -> Result<Array1<i64>, ModelError> {
        check_width(&samples, self.coef.len())?;
        let decision = samples.dot(&self.coef) + self.intercept;
        decide(decision, self.classes)
    }
}

// ── Support vector ──────────────────────────────────────────────────────

/// SVM kernel with its fitted hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
    Poly { gamma: f64, coef0: f64, degree: i32 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    fn name(&self) -> &'static str {
        match self {
            Kernel::Linear => "linear",
            Kernel::Rbf { .. } => "rbf",
            Kernel::Poly { .. } => "poly",
            Kernel::Sigmoid { .. } => "sigmoid",
        }
    }

    fn eval(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        match *self {
            Kernel::Linear => a.dot(&b),
            Kernel::Rbf { gamma } => {
                let sq_dist: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
                (-gamma * sq_dist).exp()
            }
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => (gamma * a.dot(&b) + coef0).powi(degree),
            Kernel::Sigmoid { gamma, coef0 } => (gamma * a.dot(&b) + coef0).tanh(),
        }
    }
}

/// Kernel support vector classifier (binary).
#[derive(Debug, Clone)]
pub struct SvcClassifier {
    kernel: Kernel,
    support_vectors: Array2<f64>,
    dual_coef: Array1<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl SvcClassifier {
    /// Build a classifier from fitted parameters. `support_vectors` has one
    /// row per support vector.
    pub fn new(
        kernel: Kernel,
        support_vectors: Array2<f64>,
        dual_coef: Vec<f64>,
        intercept: f64,
        classes: [i64; 2],
    ) -> Result<Self, ModelError> {
        if support_vectors.nrows() == 0 || support_vectors.ncols() == 0 {
            return Err(invalid("no support vectors"));
        }
        if dual_coef.len() != support_vectors.nrows() {
            return Err(invalid(format!(
                "{} dual coefficients for {} support vectors",
                dual_coef.len(),
                support_vectors.nrows()
            )));
        }
        if support_vectors.iter().any(|v| !v.is_finite()) {
            return Err(invalid("support_vectors contain a non-finite value"));
        }
        check_finite(&dual_coef, "dual_coef")?;
        check_finite(&[intercept], "intercept")?;
        match kernel {
            Kernel::Linear => {}
            Kernel::Rbf { gamma } | Kernel::Poly { gamma, .. } | Kernel::Sigmoid { gamma, .. } => {
                if !gamma.is_finite() || gamma <= 0.0 {
                    return Err(invalid(format!("gamma must be positive, got {gamma}")));
                }
            }
        }
        if let Kernel::Poly { coef0, .. } | Kernel::Sigmoid { coef0, .. } = kernel {
            check_finite(&[coef0], "coef0")?;
        }
        if let Kernel::Poly { degree, .. } = kernel
            && degree < 0
        {
            return Err(invalid(format!("degree must be non-negative, got {degree}")));
        }

        Ok(Self {
            kernel,
            support_vectors,
            dual_coef: Array1::from_vec(dual_coef),
            intercept,
            classes: check_classes(classes)?,
        })
    }

    fn from_artifact(a: SvcArtifact) -> Result<Self, ModelError> {
        let gamma = || a.gamma.ok_or_else(|| invalid("gamma is required for this kernel"));
        let kernel = match a.kernel {
            KernelKind::Linear => Kernel::Linear,
            KernelKind::Rbf => Kernel::Rbf { gamma: gamma()? },
            KernelKind::Poly => Kernel::Poly {
                gamma: gamma()?,
                coef0: a.coef0,
                degree: i32::try_from(a.degree)
                    .map_err(|_| invalid(format!("degree {} is out of range", a.degree)))?,
            },
            KernelKind::Sigmoid => Kernel::Sigmoid {
                gamma: gamma()?,
                coef0: a.coef0,
            },
        };

        let n_sv = a.support_vectors.len();
        let width = a.support_vectors.first().map_or(0, Vec::len);
        if let Some(i) = a.support_vectors.iter().position(|row| row.len() != width) {
            return Err(invalid(format!(
                "support vector {i} has {} features, expected {width}",
                a.support_vectors[i].len()
            )));
        }
        let flat: Vec<f64> = a.support_vectors.into_iter().flatten().collect();
        let support_vectors = Array2::from_shape_vec((n_sv, width), flat)
            .map_err(|e| invalid(format!("support_vectors: {e}")))?;

        Self::new(kernel, support_vectors, a.dual_coef, a.intercept, a.classes)
    }

    fn decision_function(&self, samples: ArrayView2<'_, f64>) -> Array1<f64> {
        samples
            .outer_iter()
            .map(|x| {
                self.support_vectors
                    .outer_iter()
                    .zip(self.dual_coef.iter())
                    .map(|(sv, c)| c * self.kernel.eval(sv, x))
                    .sum::<f64>()
                    + self.intercept
            })
            .collect()
    }
}

impl Classifier for SvcClassifier {
    fn kind(&self) -> String {
        format!("svc/{}", self.kernel.name())
    }

    fn n_features(&self) -> usize {
        self.support_vectors.ncols()
    }

    fn predict(&self, samples: ArrayView2<'_, f64>) -> Result<Array1<i64>, ModelError> {
        check_width(&samples, self.support_vectors.ncols())?;
        decide(self.decision_function(samples), self.classes)
    }
}

//! One-vs-rest linear support-vector classifier.
//!
//! Maximum-margin linear decision boundaries trained with a
//! deterministic subgradient descent on the regularized hinge loss.
//! This is the production default family.

use serde::{Deserialize, Serialize};

use super::{Classifier, validate_training_set};
use crate::error::{EmotextError, Result};
use crate::vectorize::SparseVector;

/// Configuration for [`LinearSvm`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmConfig {
    /// Number of passes over the training set.
    pub epochs: usize,
    /// L2 regularization strength.
    pub lambda: f64,
}

impl Default for SvmConfig {
    fn default() -> Self {
        Self {
            epochs: 50,
            lambda: 1e-4,
        }
    }
}

/// Linear maximum-margin multi-class classifier (one-vs-rest).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvm {
    config: SvmConfig,
    /// Per-class weight vectors, present after `fit`.
    weights: Option<Vec<Vec<f64>>>,
    /// Per-class bias terms.
    bias: Option<Vec<f64>>,
}

impl LinearSvm {
    /// Create an unfitted classifier with the given configuration.
    pub fn new(config: SvmConfig) -> Self {
        Self {
            config,
            weights: None,
            bias: None,
        }
    }

    /// Create an unfitted classifier with default settings.
    pub fn with_defaults() -> Self {
        Self::new(SvmConfig::default())
    }

    /// Train one binary one-vs-rest separator for `class`.
    ///
    /// Pegasos-style subgradient descent: samples are visited in their
    /// given order (no shuffling), so training is fully deterministic.
    fn fit_binary(
        &self,
        features: &[SparseVector],
        labels: &[usize],
        class: usize,
        dim: usize,
    ) -> (Vec<f64>, f64) {
        let lambda = self.config.lambda;
        let mut weights = vec![0.0; dim];
        let mut bias = 0.0;
        let mut t = 1u64;

        for _ in 0..self.config.epochs {
            for (x, &label) in features.iter().zip(labels.iter()) {
                let y = if label == class { 1.0 } else { -1.0 };
                let eta = 1.0 / (lambda * t as f64);
                let margin = y * (x.dot_dense(&weights) + bias);

                let shrink = 1.0 - eta * lambda;
                for w in &mut weights {
                    *w *= shrink;
                }
                if margin < 1.0 {
                    for (index, value) in x.iter() {
                        weights[index] += eta * y * value;
                    }
                    // Bias stays unregularized; a small step keeps it stable.
                    bias += 0.01 * eta * y;
                }
                t += 1;
            }
        }

        (weights, bias)
    }
}

impl Classifier for LinearSvm {
    fn fit(&mut self, features: &[SparseVector], labels: &[usize], n_classes: usize) -> Result<()> {
        if self.weights.is_some() {
            return Err(EmotextError::invalid_operation(
                "linear SVM is already fitted",
            ));
        }
        validate_training_set(features, labels, n_classes)?;

        let dim = features.first().map(|x| x.dim()).unwrap_or(0);
        let mut weights = Vec::with_capacity(n_classes);
        let mut bias = Vec::with_capacity(n_classes);
        for class in 0..n_classes {
            let (w, b) = self.fit_binary(features, labels, class, dim);
            weights.push(w);
            bias.push(b);
        }

        self.weights = Some(weights);
        self.bias = Some(bias);
        Ok(())
    }

    fn decision(&self, features: &SparseVector) -> Result<Vec<f64>> {
        let (weights, bias) = match (&self.weights, &self.bias) {
            (Some(w), Some(b)) => (w, b),
            _ => {
                return Err(EmotextError::unfitted(
                    "predict called before fit on linear SVM",
                ));
            }
        };

        Ok(weights
            .iter()
            .zip(bias.iter())
            .map(|(w, &b)| features.dot_dense(w) + b)
            .collect())
    }

    fn name(&self) -> &'static str {
        "linear-svm"
    }
}

//! One-vs-rest logistic regression.

use serde::{Deserialize, Serialize};

use super::{Classifier, validate_training_set};
use crate::error::{EmotextError, Result};
use crate::vectorize::SparseVector;

/// Configuration for [`LogisticRegression`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticConfig {
    /// Learning rate for batch gradient descent.
    pub learning_rate: f64,
    /// Maximum iterations per binary problem.
    pub max_iter: usize,
    /// Early-stop tolerance on the gradient norm.
    pub tolerance: f64,
    /// L2 regularization strength.
    pub l2: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            max_iter: 300,
            tolerance: 1e-6,
            l2: 1e-4,
        }
    }
}

/// Multi-class logistic regression via one-vs-rest decomposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    config: LogisticConfig,
    weights: Option<Vec<Vec<f64>>>,
    bias: Option<Vec<f64>>,
}

impl LogisticRegression {
    /// Create an unfitted classifier with the given configuration.
    pub fn new(config: LogisticConfig) -> Self {
        Self {
            config,
            weights: None,
            bias: None,
        }
    }

    /// Create an unfitted classifier with default settings.
    pub fn with_defaults() -> Self {
        Self::new(LogisticConfig::default())
    }

    /// Numerically stable sigmoid.
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }

    /// Full-batch gradient descent on one binary one-vs-rest problem.
    fn fit_binary(
        &self,
        features: &[SparseVector],
        labels: &[usize],
        class: usize,
        dim: usize,
    ) -> (Vec<f64>, f64) {
        let n = features.len() as f64;
        let mut weights = vec![0.0; dim];
        let mut bias = 0.0;

        for _ in 0..self.config.max_iter {
            let mut grad_w = vec![0.0; dim];
            let mut grad_b = 0.0;

            for (x, &label) in features.iter().zip(labels.iter()) {
                let y = if label == class { 1.0 } else { 0.0 };
                let p = Self::sigmoid(x.dot_dense(&weights) + bias);
                let err = p - y;
                for (index, value) in x.iter() {
                    grad_w[index] += err * value;
                }
                grad_b += err;
            }

            let mut grad_norm_sq = 0.0;
            for (g, &w) in grad_w.iter_mut().zip(weights.iter()) {
                *g = *g / n + self.config.l2 * w;
                grad_norm_sq += *g * *g;
            }
            grad_b /= n;
            grad_norm_sq += grad_b * grad_b;

            for (w, &g) in weights.iter_mut().zip(grad_w.iter()) {
                *w -= self.config.learning_rate * g;
            }
            bias -= self.config.learning_rate * grad_b;

            if grad_norm_sq.sqrt() < self.config.tolerance {
                break;
            }
        }

        (weights, bias)
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, features: &[SparseVector], labels: &[usize], n_classes: usize) -> Result<()> {
        if self.weights.is_some() {
            return Err(EmotextError::invalid_operation(
                "logistic regression is already fitted",
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
                    "predict called before fit on logistic regression",
                ));
            }
        };

        // Raw linear scores; the one-vs-rest argmax is monotone in the
        // sigmoid, so no calibration is applied.
        Ok(weights
            .iter()
            .zip(bias.iter())
            .map(|(w, &b)| features.dot_dense(w) + b)
            .collect())
    }

    fn name(&self) -> &'static str {
        "logistic-regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::argmax;
    use crate::classifier::test_support::toy_training_set;

    #[test]
    fn test_sigmoid_stability() {
        assert!(LogisticRegression::sigmoid(1000.0) <= 1.0);
        assert!(LogisticRegression::sigmoid(-1000.0) >= 0.0);
        assert!((LogisticRegression::sigmoid(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fit_and_predict_separable() {
        let (features, labels, n_classes) = toy_training_set();
        let mut model = LogisticRegression::with_defaults();
        model.fit(&features, &labels, n_classes).unwrap();

        for (x, &label) in features.iter().zip(labels.iter()) {
            let scores = model.decision(x).unwrap();
            assert_eq!(argmax(&scores), label);
        }
    }

    #[test]
    fn test_unfitted_guard() {
        let model = LogisticRegression::with_defaults();
        assert!(matches!(
            model.decision(&SparseVector::zeros(3)),
            Err(EmotextError::Unfitted(_))
        ));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let (features, _, n_classes) = toy_training_set();
        let mut model = LogisticRegression::with_defaults();
        assert!(matches!(
            model.fit(&features, &[0, 1], n_classes),
            Err(EmotextError::InvalidTrainingSet(_))
        ));
    }
}

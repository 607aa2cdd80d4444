//! Multinomial naive Bayes over TF-IDF mass.
//!
//! Fractional TF-IDF weights are treated as term counts, the same way
//! sklearn's MultinomialNB consumes TF-IDF matrices. All probability
//! work happens in log space.

use serde::{Deserialize, Serialize};

use super::{Classifier, validate_training_set};
use crate::error::{EmotextError, Result};
use crate::vectorize::SparseVector;

/// Configuration for [`NaiveBayes`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesConfig {
    /// Laplace/Lidstone smoothing parameter.
    pub alpha: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

/// Multinomial naive Bayes classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayes {
    config: NaiveBayesConfig,
    /// ln P(class), present after `fit`.
    class_log_prior: Option<Vec<f64>>,
    /// ln P(term | class) per class, dense over the feature space.
    feature_log_prob: Option<Vec<Vec<f64>>>,
}

impl NaiveBayes {
    /// Create an unfitted classifier with the given configuration.
    pub fn new(config: NaiveBayesConfig) -> Self {
        Self {
            config,
            class_log_prior: None,
            feature_log_prob: None,
        }
    }

    /// Create an unfitted classifier with default settings.
    pub fn with_defaults() -> Self {
        Self::new(NaiveBayesConfig::default())
    }
}

impl Classifier for NaiveBayes {
    fn fit(&mut self, features: &[SparseVector], labels: &[usize], n_classes: usize) -> Result<()> {
        if self.class_log_prior.is_some() {
            return Err(EmotextError::invalid_operation(
                "naive Bayes is already fitted",
            ));
        }
        validate_training_set(features, labels, n_classes)?;

        let dim = features.first().map(|x| x.dim()).unwrap_or(0);
        let alpha = self.config.alpha;

        let mut class_counts = vec![0usize; n_classes];
        let mut feature_mass = vec![vec![0.0f64; dim]; n_classes];
        let mut class_mass = vec![0.0f64; n_classes];

        for (x, &label) in features.iter().zip(labels.iter()) {
            class_counts[label] += 1;
            for (index, value) in x.iter() {
                feature_mass[label][index] += value;
                class_mass[label] += value;
            }
        }

        let n = features.len() as f64;
        let class_log_prior = class_counts
            .iter()
            .map(|&count| ((count as f64).max(f64::MIN_POSITIVE) / n).ln())
            .collect();

        let feature_log_prob = feature_mass
            .iter()
            .zip(class_mass.iter())
            .map(|(mass, &total)| {
                let denom = total + alpha * dim as f64;
                mass.iter().map(|&m| ((m + alpha) / denom).ln()).collect()
            })
            .collect();

        self.class_log_prior = Some(class_log_prior);
        self.feature_log_prob = Some(feature_log_prob);
        Ok(())
    }

    fn decision(&self, features: &SparseVector) -> Result<Vec<f64>> {
        let (priors, log_probs) = match (&self.class_log_prior, &self.feature_log_prob) {
            (Some(p), Some(l)) => (p, l),
            _ => {
                return Err(EmotextError::unfitted(
                    "predict called before fit on naive Bayes",
                ));
            }
        };

        Ok(priors
            .iter()
            .zip(log_probs.iter())
            .map(|(&prior, log_prob)| prior + features.dot_dense(log_prob))
            .collect())
    }

    fn name(&self) -> &'static str {
        "naive-bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::argmax;
    use crate::classifier::test_support::toy_training_set;

    #[test]
    fn test_fit_and_predict_separable() {
        let (features, labels, n_classes) = toy_training_set();
        let mut model = NaiveBayes::with_defaults();
        model.fit(&features, &labels, n_classes).unwrap();

        for (x, &label) in features.iter().zip(labels.iter()) {
            let scores = model.decision(x).unwrap();
            assert_eq!(argmax(&scores), label);
        }
    }

    #[test]
    fn test_zero_vector_falls_back_to_prior() {
        let dim = 4;
        let features = vec![
            SparseVector::new(dim, vec![(0, 1.0)]),
            SparseVector::new(dim, vec![(0, 0.9)]),
            SparseVector::new(dim, vec![(1, 1.0)]),
        ];
        let labels = vec![0, 0, 1];
        let mut model = NaiveBayes::with_defaults();
        model.fit(&features, &labels, 2).unwrap();

        // With no evidence, the majority class wins on its prior.
        let scores = model.decision(&SparseVector::zeros(dim)).unwrap();
        assert_eq!(argmax(&scores), 0);
    }

    #[test]
    fn test_unfitted_guard() {
        let model = NaiveBayes::with_defaults();
        assert!(matches!(
            model.decision(&SparseVector::zeros(2)),
            Err(EmotextError::Unfitted(_))
        ));
    }

    #[test]
    fn test_decision_deterministic() {
        let (features, labels, n_classes) = toy_training_set();
        let mut model = NaiveBayes::with_defaults();
        model.fit(&features, &labels, n_classes).unwrap();

        assert_eq!(
            model.decision(&features[3]).unwrap(),
            model.decision(&features[3]).unwrap()
        );
    }
}

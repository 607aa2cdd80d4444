//! Random forest classifier.
//!
//! Bootstrap-sampled, feature-subsampled decision trees fit in
//! parallel with rayon. Each tree derives its seed from the forest
//! seed, so results are reproducible regardless of thread scheduling.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::decision_tree::{DecisionTree, TreeConfig};
use super::{Classifier, validate_training_set};
use crate::error::{EmotextError, Result};
use crate::vectorize::SparseVector;

/// Configuration for [`RandomForest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees.
    pub n_trees: usize,
    /// Maximum depth per tree.
    pub max_depth: usize,
    /// Minimum samples required to split.
    pub min_samples_split: usize,
    /// Minimum samples in a leaf.
    pub min_samples_leaf: usize,
    /// Features per split (None = sqrt of the dimensionality).
    pub max_features: Option<usize>,
    /// Whether to bootstrap-sample each tree's training set.
    pub bootstrap: bool,
    /// Base random seed.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 200,
            max_depth: 25,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Random forest over multi-class decision trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    /// Create an unfitted forest with the given configuration.
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_classes: 0,
        }
    }

    /// Number of fitted trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn bootstrap_indices(n: usize, seed: u64) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.random_range(0..n)).collect()
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, features: &[SparseVector], labels: &[usize], n_classes: usize) -> Result<()> {
        if !self.trees.is_empty() {
            return Err(EmotextError::invalid_operation(
                "random forest is already fitted",
            ));
        }
        validate_training_set(features, labels, n_classes)?;
        self.n_classes = n_classes;

        let dim = features.first().map(|x| x.dim()).unwrap_or(0);
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (dim as f64).sqrt().ceil() as usize)
            .max(1);

        let trees: Result<Vec<DecisionTree>> = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_config = TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: self.config.seed.wrapping_add(i as u64),
                };
                let mut tree = DecisionTree::new(tree_config);

                if self.config.bootstrap {
                    let sample = Self::bootstrap_indices(
                        features.len(),
                        self.config.seed.wrapping_add(i as u64),
                    );
                    let boot_features: Vec<SparseVector> =
                        sample.iter().map(|&idx| features[idx].clone()).collect();
                    let boot_labels: Vec<usize> = sample.iter().map(|&idx| labels[idx]).collect();
                    // A bootstrap draw can collapse to one class; such
                    // trees contribute nothing, so refit on the full set.
                    match tree.fit(&boot_features, &boot_labels, n_classes) {
                        Ok(()) => {}
                        Err(EmotextError::InvalidTrainingSet(_)) => {
                            tree = DecisionTree::new(TreeConfig {
                                max_depth: self.config.max_depth,
                                min_samples_split: self.config.min_samples_split,
                                min_samples_leaf: self.config.min_samples_leaf,
                                max_features: Some(max_features),
                                seed: self.config.seed.wrapping_add(i as u64),
                            });
                            tree.fit(features, labels, n_classes)?;
                        }
                        Err(e) => return Err(e),
                    }
                } else {
                    tree.fit(features, labels, n_classes)?;
                }

                Ok(tree)
            })
            .collect();

        self.trees = trees?;
        Ok(())
    }

    fn decision(&self, features: &SparseVector) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(EmotextError::unfitted(
                "predict called before fit on random forest",
            ));
        }

        let mut votes = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let probs = tree.leaf_probabilities(features)?;
            for (vote, p) in votes.iter_mut().zip(probs.iter()) {
                *vote += p;
            }
        }
        let n = self.trees.len() as f64;
        for vote in &mut votes {
            *vote /= n;
        }
        Ok(votes)
    }

    fn name(&self) -> &'static str {
        "random-forest"
    }
}

//! Decision tree classifier.
//!
//! Multi-class CART-style tree: Gini impurity, midpoint threshold
//! splits, optional per-split feature subsampling (used by the random
//! forest). Fully deterministic for a fixed seed.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::{Classifier, validate_training_set};
use crate::error::{EmotextError, Result};
use crate::vectorize::SparseVector;

/// Configuration for [`DecisionTree`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of the tree.
    pub max_depth: usize,
    /// Minimum samples required to attempt a split.
    pub min_samples_split: usize,
    /// Minimum samples allowed in a leaf.
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all).
    pub max_features: Option<usize>,
    /// Seed for feature subsampling.
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 25,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

/// One node of the fitted tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TreeNode {
    /// Split feature index (leaf if None).
    feature: Option<usize>,
    /// Split threshold (goes left when value <= threshold).
    threshold: Option<f64>,
    /// Class frequency distribution of the node's samples.
    class_probs: Vec<f64>,
    n_samples: usize,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(class_probs: Vec<f64>, n_samples: usize) -> Self {
        Self {
            feature: None,
            threshold: None,
            class_probs,
            n_samples,
            left: None,
            right: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Multi-class decision tree classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
    n_classes: usize,
}

impl DecisionTree {
    /// Create an unfitted tree with the given configuration.
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            n_classes: 0,
        }
    }

    /// Depth of the fitted tree (0 when unfitted).
    pub fn depth(&self) -> usize {
        fn node_depth(node: &TreeNode) -> usize {
            if node.is_leaf() {
                1
            } else {
                1 + node
                    .left
                    .as_ref()
                    .map(|n| node_depth(n))
                    .unwrap_or(0)
                    .max(node.right.as_ref().map(|n| node_depth(n)).unwrap_or(0))
            }
        }
        self.root.as_ref().map(node_depth).unwrap_or(0)
    }

    fn class_probabilities(&self, labels: &[usize]) -> Vec<f64> {
        let mut counts = vec![0.0; self.n_classes];
        for &label in labels {
            counts[label] += 1.0;
        }
        let total = labels.len() as f64;
        if total > 0.0 {
            for count in &mut counts {
                *count /= total;
            }
        }
        counts
    }

    /// Multi-class Gini impurity: 1 - sum(p_k^2).
    fn gini(&self, labels: &[usize]) -> f64 {
        if labels.is_empty() {
            return 0.0;
        }
        let probs = self.class_probabilities(labels);
        1.0 - probs.iter().map(|p| p * p).sum::<f64>()
    }

    fn build(
        &self,
        features: &[SparseVector],
        labels: &[usize],
        indices: &[usize],
        depth: usize,
        rng: &mut StdRng,
    ) -> TreeNode {
        let node_labels: Vec<usize> = indices.iter().map(|&i| labels[i]).collect();
        let impurity = self.gini(&node_labels);
        let probs = self.class_probabilities(&node_labels);

        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || impurity < 1e-12
        {
            return TreeNode::leaf(probs, indices.len());
        }

        match self.find_best_split(features, labels, indices, impurity, rng) {
            Some((feature, threshold, left_indices, right_indices)) => {
                if left_indices.len() < self.config.min_samples_leaf
                    || right_indices.len() < self.config.min_samples_leaf
                {
                    return TreeNode::leaf(probs, indices.len());
                }

                let left = self.build(features, labels, &left_indices, depth + 1, rng);
                let right = self.build(features, labels, &right_indices, depth + 1, rng);

                TreeNode {
                    feature: Some(feature),
                    threshold: Some(threshold),
                    class_probs: probs,
                    n_samples: indices.len(),
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                }
            }
            None => TreeNode::leaf(probs, indices.len()),
        }
    }

    fn find_best_split(
        &self,
        features: &[SparseVector],
        labels: &[usize],
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut StdRng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let dim = features.first().map(|x| x.dim()).unwrap_or(0);
        let max_features = self.config.max_features.unwrap_or(dim).min(dim);

        let mut candidate_features: Vec<usize> = (0..dim).collect();
        if max_features < dim {
            candidate_features.shuffle(rng);
            candidate_features.truncate(max_features);
            candidate_features.sort_unstable();
        }

        let mut best_gain = 0.0;
        let mut best: Option<(usize, f64, Vec<usize>, Vec<usize>)> = None;

        for &feature in &candidate_features {
            let mut values: Vec<f64> = indices
                .iter()
                .map(|&i| features[i].get(feature))
                .collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            values.dedup();
            if values.len() < 2 {
                continue;
            }

            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| features[i].get(feature) <= threshold);
                if left_idx.is_empty() || right_idx.is_empty() {
                    continue;
                }

                let left_labels: Vec<usize> = left_idx.iter().map(|&i| labels[i]).collect();
                let right_labels: Vec<usize> = right_idx.iter().map(|&i| labels[i]).collect();

                let n_left = left_idx.len() as f64;
                let n_right = right_idx.len() as f64;
                let weighted = (n_left * self.gini(&left_labels)
                    + n_right * self.gini(&right_labels))
                    / (n_left + n_right);
                let gain = parent_impurity - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some((feature, threshold, left_idx, right_idx));
                }
            }
        }

        best
    }

    fn traverse<'a>(&'a self, node: &'a TreeNode, features: &SparseVector) -> &'a TreeNode {
        if node.is_leaf() {
            return node;
        }
        let feature = node.feature.expect("split node has a feature");
        let threshold = node.threshold.expect("split node has a threshold");
        let child = if features.get(feature) <= threshold {
            node.left.as_ref().expect("split node has a left child")
        } else {
            node.right.as_ref().expect("split node has a right child")
        };
        self.traverse(child, features)
    }

    /// Class frequency distribution at the matching leaf.
    pub(crate) fn leaf_probabilities(&self, features: &SparseVector) -> Result<Vec<f64>> {
        let root = self.root.as_ref().ok_or_else(|| {
            EmotextError::unfitted("predict called before fit on decision tree")
        })?;
        Ok(self.traverse(root, features).class_probs.clone())
    }
}

impl Classifier for DecisionTree {
    fn fit(&mut self, features: &[SparseVector], labels: &[usize], n_classes: usize) -> Result<()> {
        if self.root.is_some() {
            return Err(EmotextError::invalid_operation(
                "decision tree is already fitted",
            ));
        }
        validate_training_set(features, labels, n_classes)?;

        self.n_classes = n_classes;
        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.root = Some(self.build(features, labels, &indices, 0, &mut rng));
        Ok(())
    }

    fn decision(&self, features: &SparseVector) -> Result<Vec<f64>> {
        self.leaf_probabilities(features)
    }

    fn name(&self) -> &'static str {
        "decision-tree"
    }
}

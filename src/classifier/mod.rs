//! Supervised classifiers over TF-IDF feature vectors.
//!
//! Five model families sit behind one capability contract
//! ([`Classifier`]) and a closed tagged enum ([`TrainedClassifier`]).
//! Labels are handled as dense indices into a sorted
//! [`LabelVocabulary`]; because indices follow sorted label order,
//! score ties always resolve to the lexicographically smallest label.

pub mod decision_tree;
pub mod linear_svm;
pub mod logistic;
pub mod naive_bayes;
pub mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig};
pub use linear_svm::{LinearSvm, SvmConfig};
pub use logistic::{LogisticConfig, LogisticRegression};
pub use naive_bayes::{NaiveBayes, NaiveBayesConfig};
pub use random_forest::{ForestConfig, RandomForest};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{EmotextError, Result};
use crate::vectorize::SparseVector;

/// The closed set of labels observed in a training corpus.
///
/// Labels are stored sorted; their positions serve as the dense class
/// indices used by every classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelVocabulary {
    labels: Vec<String>,
}

impl LabelVocabulary {
    /// Build the vocabulary from (possibly repeated) normalized labels.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut distinct: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        distinct.sort_unstable();
        distinct.dedup();
        LabelVocabulary { labels: distinct }
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Dense index of a label, if it was observed at fit time.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }

    /// Label string for a dense class index.
    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    /// All labels in sorted order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Index of the highest score; ties resolve to the smallest index.
pub(crate) fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = index;
        }
    }
    best
}

/// Shared structural validation for `fit` inputs.
pub(crate) fn validate_training_set(
    features: &[SparseVector],
    labels: &[usize],
    n_classes: usize,
) -> Result<()> {
    if features.len() != labels.len() {
        return Err(EmotextError::invalid_training_set(format!(
            "feature/label count mismatch: {} features, {} labels",
            features.len(),
            labels.len()
        )));
    }
    if n_classes < 2 {
        return Err(EmotextError::invalid_training_set(format!(
            "need at least 2 distinct labels, got {n_classes}"
        )));
    }
    let mut seen = vec![false; n_classes];
    for &label in labels {
        if label >= n_classes {
            return Err(EmotextError::invalid_training_set(format!(
                "label index {label} out of range for {n_classes} classes"
            )));
        }
        seen[label] = true;
    }
    if seen.iter().filter(|&&s| s).count() < 2 {
        return Err(EmotextError::invalid_training_set(
            "training set contains fewer than 2 distinct labels",
        ));
    }
    Ok(())
}

/// Capability contract every classifier family implements.
///
/// `fit` may be called at most once per instance; `decision` returns
/// one raw score per class (no probability calibration is performed
/// or exposed).
pub trait Classifier {
    /// Train on (feature vector, class index) pairs.
    fn fit(&mut self, features: &[SparseVector], labels: &[usize], n_classes: usize) -> Result<()>;

    /// Per-class decision scores for one feature vector.
    fn decision(&self, features: &SparseVector) -> Result<Vec<f64>>;

    /// Short stable name of the family.
    fn name(&self) -> &'static str;
}

/// Classifier family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierKind {
    /// One-vs-rest logistic regression.
    LogisticRegression,
    /// Multinomial naive Bayes.
    NaiveBayes,
    /// One-vs-rest linear support-vector machine.
    LinearSvm,
    /// Single decision tree.
    DecisionTree,
    /// Random forest.
    RandomForest,
}

impl ClassifierKind {
    /// All families, used by the comparison harness.
    pub const ALL: [ClassifierKind; 5] = [
        ClassifierKind::LogisticRegression,
        ClassifierKind::NaiveBayes,
        ClassifierKind::LinearSvm,
        ClassifierKind::DecisionTree,
        ClassifierKind::RandomForest,
    ];

    /// Human-readable family name.
    pub fn name(&self) -> &'static str {
        match self {
            ClassifierKind::LogisticRegression => "logistic-regression",
            ClassifierKind::NaiveBayes => "naive-bayes",
            ClassifierKind::LinearSvm => "linear-svm",
            ClassifierKind::DecisionTree => "decision-tree",
            ClassifierKind::RandomForest => "random-forest",
        }
    }

    /// Build an unfitted classifier of this family with default settings.
    pub fn build(&self) -> TrainedClassifier {
        match self {
            ClassifierKind::LogisticRegression => {
                TrainedClassifier::LogisticRegression(LogisticRegression::with_defaults())
            }
            ClassifierKind::NaiveBayes => TrainedClassifier::NaiveBayes(NaiveBayes::with_defaults()),
            ClassifierKind::LinearSvm => TrainedClassifier::LinearSvm(LinearSvm::with_defaults()),
            ClassifierKind::DecisionTree => {
                TrainedClassifier::DecisionTree(DecisionTree::new(TreeConfig::default()))
            }
            ClassifierKind::RandomForest => {
                TrainedClassifier::RandomForest(RandomForest::new(ForestConfig::default()))
            }
        }
    }
}

impl std::fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A classifier instance as a closed tagged variant.
///
/// This is the serializable half of the artifact pair; dispatch stays
/// within the five known families.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrainedClassifier {
    LogisticRegression(LogisticRegression),
    NaiveBayes(NaiveBayes),
    LinearSvm(LinearSvm),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl TrainedClassifier {
    fn inner(&self) -> &dyn Classifier {
        match self {
            TrainedClassifier::LogisticRegression(c) => c,
            TrainedClassifier::NaiveBayes(c) => c,
            TrainedClassifier::LinearSvm(c) => c,
            TrainedClassifier::DecisionTree(c) => c,
            TrainedClassifier::RandomForest(c) => c,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Classifier {
        match self {
            TrainedClassifier::LogisticRegression(c) => c,
            TrainedClassifier::NaiveBayes(c) => c,
            TrainedClassifier::LinearSvm(c) => c,
            TrainedClassifier::DecisionTree(c) => c,
            TrainedClassifier::RandomForest(c) => c,
        }
    }

    /// Family selector for this instance.
    pub fn kind(&self) -> ClassifierKind {
        match self {
            TrainedClassifier::LogisticRegression(_) => ClassifierKind::LogisticRegression,
            TrainedClassifier::NaiveBayes(_) => ClassifierKind::NaiveBayes,
            TrainedClassifier::LinearSvm(_) => ClassifierKind::LinearSvm,
            TrainedClassifier::DecisionTree(_) => ClassifierKind::DecisionTree,
            TrainedClassifier::RandomForest(_) => ClassifierKind::RandomForest,
        }
    }

    /// Train on (feature vector, class index) pairs.
    pub fn fit(
        &mut self,
        features: &[SparseVector],
        labels: &[usize],
        n_classes: usize,
    ) -> Result<()> {
        self.inner_mut().fit(features, labels, n_classes)
    }

    /// Per-class decision scores for one feature vector.
    pub fn decision(&self, features: &SparseVector) -> Result<Vec<f64>> {
        self.inner().decision(features)
    }

    /// Predicted class index per input vector.
    pub fn predict(&self, features: &[SparseVector]) -> Result<Vec<usize>> {
        features
            .iter()
            .map(|x| Ok(argmax(&self.decision(x)?)))
            .collect()
    }
}

//! Evaluation pipeline: held-out records in, metrics report out.
//!
//! Read-only over the model. True labels never seen at training time
//! are included in the report (the model simply cannot predict them),
//! so coverage gaps are visible instead of silently excluded.

use log::info;
use serde::{Deserialize, Serialize};

use super::clean_records;
use crate::corpus::CorpusRecord;
use crate::error::{EmotextError, Result};
use crate::model::EmotionModel;

/// Precision/recall/F1 for one label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true instances of this label.
    pub support: usize,
}

/// Actual-by-predicted count matrix.
///
/// `counts[i][j]` is the number of records whose true label is
/// `labels[i]` and whose predicted label is `labels[j]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub labels: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Count for one (actual, predicted) label pair.
    pub fn count(&self, actual: &str, predicted: &str) -> usize {
        let row = self.labels.iter().position(|l| l == actual);
        let col = self.labels.iter().position(|l| l == predicted);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }
}

/// Metrics for one classifier over one held-out set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Family name of the evaluated classifier.
    pub classifier: String,
    /// Number of usable records evaluated.
    pub n_samples: usize,
    /// Exact-match rate.
    pub accuracy: f64,
    /// Per-label metrics in sorted label order.
    pub per_class: Vec<ClassMetrics>,
    /// Support-weighted average precision.
    pub weighted_precision: f64,
    /// Support-weighted average recall.
    pub weighted_recall: f64,
    /// Support-weighted average F1.
    pub weighted_f1: f64,
    pub confusion: ConfusionMatrix,
}

/// Evaluate a fitted model against held-out records.
///
/// Rows that clean down to nothing are dropped with a warning; an
/// evaluation set with no usable rows is a [`EmotextError::Corpus`]
/// error.
pub fn evaluate(model: &EmotionModel, records: &[CorpusRecord]) -> Result<EvaluationReport> {
    let (texts, truth) = clean_records(records);
    if texts.is_empty() {
        return Err(EmotextError::corpus(
            "evaluation set has no usable rows after cleaning",
        ));
    }

    let predicted = model.predict_cleaned(&texts)?;
    let report = build_report(&truth, &predicted, model.classifier_kind().to_string());
    info!(
        "evaluated {} on {} records: accuracy {:.4}",
        report.classifier, report.n_samples, report.accuracy
    );
    Ok(report)
}

/// Compute the full report from aligned (truth, predicted) labels.
pub(crate) fn build_report(
    truth: &[String],
    predicted: &[String],
    classifier: String,
) -> EvaluationReport {
    debug_assert_eq!(truth.len(), predicted.len());
    let n = truth.len();

    // Label set: every label that appears as truth or prediction.
    let mut labels: Vec<String> = truth.iter().chain(predicted.iter()).cloned().collect();
    labels.sort_unstable();
    labels.dedup();

    let index_of = |label: &str| -> usize {
        labels
            .binary_search_by(|l| l.as_str().cmp(label))
            .expect("label came from the combined set")
    };

    let k = labels.len();
    let mut counts = vec![vec![0usize; k]; k];
    let mut correct = 0usize;
    for (t, p) in truth.iter().zip(predicted.iter()) {
        counts[index_of(t)][index_of(p)] += 1;
        if t == p {
            correct += 1;
        }
    }

    let mut per_class = Vec::with_capacity(k);
    let mut weighted_precision = 0.0;
    let mut weighted_recall = 0.0;
    let mut weighted_f1 = 0.0;

    for (i, label) in labels.iter().enumerate() {
        let tp = counts[i][i];
        let support: usize = counts[i].iter().sum();
        let predicted_total: usize = counts.iter().map(|row| row[i]).sum();

        let precision = if predicted_total > 0 {
            tp as f64 / predicted_total as f64
        } else {
            0.0
        };
        let recall = if support > 0 {
            tp as f64 / support as f64
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        weighted_precision += precision * support as f64;
        weighted_recall += recall * support as f64;
        weighted_f1 += f1 * support as f64;

        per_class.push(ClassMetrics {
            label: label.clone(),
            precision,
            recall,
            f1,
            support,
        });
    }

    let n_f = n as f64;
    EvaluationReport {
        classifier,
        n_samples: n,
        accuracy: correct as f64 / n_f,
        per_class,
        weighted_precision: weighted_precision / n_f,
        weighted_recall: weighted_recall / n_f,
        weighted_f1: weighted_f1 / n_f,
        confusion: ConfusionMatrix { labels, counts },
    }
}

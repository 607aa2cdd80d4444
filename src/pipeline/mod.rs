//! Offline pipelines: training, evaluation, model comparison.

pub mod compare;
pub mod evaluate;
pub mod train;

pub use compare::{ComparisonEntry, compare};
pub use evaluate::{ClassMetrics, ConfusionMatrix, EvaluationReport, evaluate};
pub use train::{TrainingConfig, train};

use log::warn;

use crate::analysis::{normalize, normalize_label};
use crate::corpus::CorpusRecord;

/// Normalize corpus records into (cleaned text, normalized label)
/// pairs, dropping rows that clean down to nothing.
fn clean_records(records: &[CorpusRecord]) -> (Vec<String>, Vec<String>) {
    let mut texts = Vec::with_capacity(records.len());
    let mut labels = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in records {
        let text = normalize(&record.text);
        let label = normalize_label(&record.label);
        if text.is_empty() || label.is_empty() {
            dropped += 1;
            continue;
        }
        texts.push(text);
        labels.push(label);
    }

    if dropped > 0 {
        warn!("dropped {dropped} record(s) with empty text or label after cleaning");
    }
    (texts, labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_records_drops_empty_rows() {
        let records = vec![
            CorpusRecord::new("I am HAPPY!", "Joy "),
            CorpusRecord::new("1234 !!!", "anger"),
            CorpusRecord::new("so sad", "   "),
            CorpusRecord::new("this is fine", "neutral"),
        ];
        let (texts, labels) = clean_records(&records);
        assert_eq!(texts, vec!["i am happy", "this is fine"]);
        assert_eq!(labels, vec!["joy", "neutral"]);
    }
}

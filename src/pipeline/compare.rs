//! Model comparison harness.
//!
//! Every family is fit on one fixed fitted vectorizer's feature space
//! so the comparison measures the classifiers, not vectorizer
//! variance. Families fit in parallel; the result is ranked by
//! validation accuracy.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::clean_records;
use super::evaluate::{EvaluationReport, evaluate};
use crate::classifier::{ClassifierKind, LabelVocabulary};
use crate::corpus::CorpusRecord;
use crate::error::{EmotextError, Result};
use crate::model::EmotionModel;
use crate::vectorize::{TfidfConfig, TfidfVectorizer};

/// One ranked row of the comparison table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub classifier: ClassifierKind,
    pub accuracy: f64,
    pub weighted_f1: f64,
    /// Full validation metrics for this family.
    pub report: EvaluationReport,
}

/// Fit the given families on one training set and rank them by
/// validation accuracy.
///
/// Ranking is accuracy descending, ties by weighted F1 descending,
/// then family name ascending.
pub fn compare(
    train_records: &[CorpusRecord],
    validation_records: &[CorpusRecord],
    kinds: &[ClassifierKind],
    max_features: usize,
) -> Result<Vec<ComparisonEntry>> {
    if kinds.is_empty() {
        return Err(EmotextError::invalid_operation(
            "comparison needs at least one classifier family",
        ));
    }

    let (texts, labels) = clean_records(train_records);
    let vocab = LabelVocabulary::from_labels(&labels);
    if vocab.len() < 2 {
        return Err(EmotextError::invalid_training_set(format!(
            "need at least 2 distinct labels after cleaning, got {}",
            vocab.len()
        )));
    }
    let label_indices: Vec<usize> = labels
        .iter()
        .map(|label| {
            vocab
                .index_of(label)
                .expect("label came from this vocabulary")
        })
        .collect();

    // One shared feature space for every family.
    let mut vectorizer = TfidfVectorizer::new(TfidfConfig {
        max_features,
        ..Default::default()
    });
    vectorizer.fit(&texts)?;
    let features = vectorizer.transform(&texts)?;

    info!(
        "comparing {} families on {} train / {} validation records",
        kinds.len(),
        texts.len(),
        validation_records.len()
    );

    let mut entries: Vec<ComparisonEntry> = kinds
        .par_iter()
        .map(|&kind| {
            let mut classifier = kind.build();
            classifier.fit(&features, &label_indices, vocab.len())?;

            let model = EmotionModel::new(vectorizer.clone(), classifier, vocab.clone());
            let report = evaluate(&model, validation_records)?;
            Ok(ComparisonEntry {
                classifier: kind,
                accuracy: report.accuracy,
                weighted_f1: report.weighted_f1,
                report,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    entries.sort_by(|a, b| {
        b.accuracy
            .partial_cmp(&a.accuracy)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.weighted_f1
                    .partial_cmp(&a.weighted_f1)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.classifier.name().cmp(b.classifier.name()))
    });
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train_corpus() -> Vec<CorpusRecord> {
        vec![
            CorpusRecord::new("i am so happy today", "joy"),
            CorpusRecord::new("what a wonderful happy day", "joy"),
            CorpusRecord::new("i feel great joy and delight", "joy"),
            CorpusRecord::new("pure happy delight fills me", "joy"),
            CorpusRecord::new("this makes me furious", "anger"),
            CorpusRecord::new("i am so angry right now", "anger"),
            CorpusRecord::new("rage and fury fill me", "anger"),
            CorpusRecord::new("furious rage boils inside", "anger"),
        ]
    }

    fn validation_corpus() -> Vec<CorpusRecord> {
        vec![
            CorpusRecord::new("a happy wonderful day", "joy"),
            CorpusRecord::new("joy and delight today", "joy"),
            CorpusRecord::new("angry furious rage", "anger"),
            CorpusRecord::new("fury boils inside me", "anger"),
        ]
    }

    #[test]
    fn test_compare_covers_all_requested_families() {
        let entries = compare(
            &train_corpus(),
            &validation_corpus(),
            &ClassifierKind::ALL,
            1000,
        )
        .unwrap();
        assert_eq!(entries.len(), ClassifierKind::ALL.len());

        let mut seen: Vec<ClassifierKind> = entries.iter().map(|e| e.classifier).collect();
        seen.sort_by_key(|k| k.name());
        let mut expected = ClassifierKind::ALL.to_vec();
        expected.sort_by_key(|k| k.name());
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_ranking_is_monotone() {
        let entries = compare(
            &train_corpus(),
            &validation_corpus(),
            &ClassifierKind::ALL,
            1000,
        )
        .unwrap();
        for pair in entries.windows(2) {
            assert!(pair[0].accuracy >= pair[1].accuracy);
            if pair[0].accuracy == pair[1].accuracy {
                assert!(pair[0].weighted_f1 >= pair[1].weighted_f1);
                if pair[0].weighted_f1 == pair[1].weighted_f1 {
                    assert!(pair[0].classifier.name() <= pair[1].classifier.name());
                }
            }
        }
    }

    #[test]
    fn test_compare_deterministic() {
        let a = compare(
            &train_corpus(),
            &validation_corpus(),
            &ClassifierKind::ALL,
            1000,
        )
        .unwrap();
        let b = compare(
            &train_corpus(),
            &validation_corpus(),
            &ClassifierKind::ALL,
            1000,
        )
        .unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.classifier, y.classifier);
            assert_eq!(x.accuracy, y.accuracy);
            assert_eq!(x.weighted_f1, y.weighted_f1);
        }
    }

    #[test]
    fn test_empty_kind_list_rejected() {
        assert!(matches!(
            compare(&train_corpus(), &validation_corpus(), &[], 1000),
            Err(EmotextError::InvalidOperation(_))
        ));
    }
}

//! Training pipeline: corpus records in, fitted artifact pair out.

use log::info;
use serde::{Deserialize, Serialize};

use super::clean_records;
use crate::classifier::{ClassifierKind, LabelVocabulary};
use crate::corpus::CorpusRecord;
use crate::error::{EmotextError, Result};
use crate::model::EmotionModel;
use crate::vectorize::{DEFAULT_MAX_FEATURES, TfidfConfig, TfidfVectorizer};

/// Configuration for [`train`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Classifier family to fit.
    pub classifier: ClassifierKind,
    /// Vocabulary cap for the vectorizer.
    pub max_features: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierKind::LinearSvm,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

/// Fit a vectorizer and classifier on a labeled corpus.
///
/// Rows that clean down to empty text or an empty label are dropped
/// with a warning. Fewer than 2 distinct surviving labels is an
/// [`EmotextError::InvalidTrainingSet`].
pub fn train(records: &[CorpusRecord], config: &TrainingConfig) -> Result<EmotionModel> {
    let (texts, labels) = clean_records(records);

    let vocab = LabelVocabulary::from_labels(&labels);
    if vocab.len() < 2 {
        return Err(EmotextError::invalid_training_set(format!(
            "need at least 2 distinct labels after cleaning, got {}",
            vocab.len()
        )));
    }

    info!(
        "training {} on {} records, {} labels",
        config.classifier,
        texts.len(),
        vocab.len()
    );

    let label_indices: Vec<usize> = labels
        .iter()
        .map(|label| {
            vocab
                .index_of(label)
                .expect("label came from this vocabulary")
        })
        .collect();

    let mut vectorizer = TfidfVectorizer::new(TfidfConfig {
        max_features: config.max_features,
        ..Default::default()
    });
    vectorizer.fit(&texts)?;
    let features = vectorizer.transform(&texts)?;

    let mut classifier = config.classifier.build();
    classifier.fit(&features, &label_indices, vocab.len())?;

    info!(
        "fitted {} over {} features",
        config.classifier,
        vectorizer.vocabulary_size()
    );
    Ok(EmotionModel::new(vectorizer, classifier, vocab))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_corpus() -> Vec<CorpusRecord> {
        vec![
            CorpusRecord::new("I am so happy today", "joy"),
            CorpusRecord::new("What a wonderful happy day", "joy"),
            CorpusRecord::new("I feel great joy and delight", "joy"),
            CorpusRecord::new("This makes me furious", "anger"),
            CorpusRecord::new("I am so angry right now", "anger"),
            CorpusRecord::new("Rage and fury fill me", "anger"),
        ]
    }

    #[test]
    fn test_train_toy_corpus() {
        let model = train(&toy_corpus(), &TrainingConfig::default()).unwrap();
        assert_eq!(model.labels().labels(), &["anger", "joy"]);
        assert_eq!(model.classifier_kind(), ClassifierKind::LinearSvm);
        assert_eq!(model.classify("I am extremely joyful").unwrap(), "joy");
    }

    #[test]
    fn test_train_all_families() {
        for kind in ClassifierKind::ALL {
            let config = TrainingConfig {
                classifier: kind,
                ..Default::default()
            };
            let model = train(&toy_corpus(), &config).unwrap();
            assert_eq!(model.classifier_kind(), kind);
            assert!(model.classify("happy happy day").is_ok());
        }
    }

    #[test]
    fn test_train_single_label_rejected() {
        let records = vec![
            CorpusRecord::new("happy one", "joy"),
            CorpusRecord::new("happy two", "joy"),
        ];
        assert!(matches!(
            train(&records, &TrainingConfig::default()),
            Err(EmotextError::InvalidTrainingSet(_))
        ));
    }

    #[test]
    fn test_train_drops_unusable_rows() {
        let mut records = toy_corpus();
        records.push(CorpusRecord::new("12345", "joy"));
        records.push(CorpusRecord::new("valid text", ""));
        let model = train(&records, &TrainingConfig::default()).unwrap();
        assert_eq!(model.labels().len(), 2);
    }
}

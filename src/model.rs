//! The fitted artifact pair and the inference facade.
//!
//! An [`EmotionModel`] bundles one fitted vectorizer with the
//! classifier trained against it, plus the label vocabulary. The pair
//! is persisted as a single blob so the two halves can never be mixed
//! across training runs; a crc32 fingerprint over the payload guards
//! against corrupt or truncated artifacts.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::normalize;
use crate::classifier::{ClassifierKind, LabelVocabulary, TrainedClassifier};
use crate::error::{EmotextError, Result};
use crate::vectorize::{SparseVector, TfidfVectorizer};

/// Artifact format magic bytes.
const ARTIFACT_MAGIC: [u8; 4] = *b"EMTX";
/// Artifact format version.
const ARTIFACT_VERSION: u32 = 1;

/// A deployable model: fitted vectorizer + fitted classifier + labels.
///
/// Immutable once constructed; safe to share for concurrent read-only
/// classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionModel {
    vectorizer: TfidfVectorizer,
    classifier: TrainedClassifier,
    labels: LabelVocabulary,
    trained_at: DateTime<Utc>,
}

impl EmotionModel {
    /// Assemble a model from its fitted parts.
    ///
    /// Called by the training pipeline; both parts must come from the
    /// same training run.
    pub fn new(
        vectorizer: TfidfVectorizer,
        classifier: TrainedClassifier,
        labels: LabelVocabulary,
    ) -> Self {
        Self {
            vectorizer,
            classifier,
            labels,
            trained_at: Utc::now(),
        }
    }

    /// The label vocabulary observed at training time.
    pub fn labels(&self) -> &LabelVocabulary {
        &self.labels
    }

    /// The classifier family of this model.
    pub fn classifier_kind(&self) -> ClassifierKind {
        self.classifier.kind()
    }

    /// When training completed.
    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    /// Feature dimensionality of the fitted vectorizer.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Project already-cleaned texts into the model's feature space.
    pub fn transform(&self, cleaned: &[String]) -> Result<Vec<SparseVector>> {
        self.vectorizer.transform(cleaned)
    }

    /// Predict labels for already-cleaned texts.
    ///
    /// Batch path: zero-token texts are tolerated as all-zero vectors
    /// and classified like any other input, so evaluation over a
    /// held-out split never aborts on a degenerate row.
    pub fn predict_cleaned(&self, cleaned: &[String]) -> Result<Vec<String>> {
        let features = self.vectorizer.transform(cleaned)?;
        let indices = self.classifier.predict(&features)?;
        Ok(indices
            .into_iter()
            .map(|index| self.labels.label(index).to_string())
            .collect())
    }

    /// Classify one translated utterance.
    ///
    /// This is the single entry point for online callers. Input that
    /// normalizes to nothing is rejected with [`EmotextError::EmptyInput`]
    /// rather than mapped to an arbitrary label; callers decide how to
    /// surface "no usable signal".
    pub fn classify(&self, text: &str) -> Result<String> {
        let cleaned = normalize(text);
        if cleaned.is_empty() {
            return Err(EmotextError::EmptyInput);
        }
        let mut predictions = self.predict_cleaned(&[cleaned])?;
        Ok(predictions.remove(0))
    }

    /// Persist the artifact pair atomically as one blob.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let payload = bincode::serialize(self)
            .map_err(|e| EmotextError::serialization(format!("encoding model: {e}")))?;

        let artifact = ArtifactFile {
            magic: ARTIFACT_MAGIC,
            version: ARTIFACT_VERSION,
            checksum: crc32fast::hash(&payload),
            payload,
        };
        let bytes = bincode::serialize(&artifact)
            .map_err(|e| EmotextError::serialization(format!("encoding artifact: {e}")))?;

        // Write to a sibling temp file, then rename into place so the
        // pair is never observable half-written.
        let tmp_path = path.with_file_name(format!(
            "{}.tmp",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "model".to_string())
        ));
        fs::write(&tmp_path, &bytes)?;
        fs::rename(&tmp_path, path)?;

        info!(
            "saved {} model ({} labels, {} features) to {}",
            self.classifier_kind(),
            self.labels.len(),
            self.vectorizer.vocabulary_size(),
            path.display()
        );
        Ok(())
    }

    /// Load a persisted artifact pair, verifying version and fingerprint.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;

        let artifact: ArtifactFile = bincode::deserialize(&bytes)
            .map_err(|e| EmotextError::serialization(format!("decoding artifact: {e}")))?;

        if artifact.magic != ARTIFACT_MAGIC {
            return Err(EmotextError::serialization(format!(
                "{} is not an emotext model artifact",
                path.display()
            )));
        }
        if artifact.version != ARTIFACT_VERSION {
            return Err(EmotextError::serialization(format!(
                "unsupported artifact version {} (expected {})",
                artifact.version, ARTIFACT_VERSION
            )));
        }
        let checksum = crc32fast::hash(&artifact.payload);
        if checksum != artifact.checksum {
            return Err(EmotextError::serialization(format!(
                "artifact fingerprint mismatch in {} (stored {:08x}, computed {:08x})",
                path.display(),
                artifact.checksum,
                checksum
            )));
        }

        let model: EmotionModel = bincode::deserialize(&artifact.payload)
            .map_err(|e| EmotextError::serialization(format!("decoding model: {e}")))?;
        debug!(
            "loaded {} model trained at {}",
            model.classifier_kind(),
            model.trained_at
        );
        Ok(model)
    }
}

/// On-disk artifact envelope.
#[derive(Serialize, Deserialize)]
struct ArtifactFile {
    magic: [u8; 4],
    version: u32,
    checksum: u32,
    payload: Vec<u8>,
}

//! TF-IDF vectorizer for text feature extraction.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{EmotextError, Result};
use crate::vectorize::sparse::SparseVector;

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 15_000;

/// Configuration for [`TfidfVectorizer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfConfig {
    /// Maximum number of distinct terms retained in the vocabulary.
    pub max_features: usize,
    /// Smallest n-gram size (in tokens).
    pub ngram_min: usize,
    /// Largest n-gram size (in tokens).
    pub ngram_max: usize,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_min: 1,
            ngram_max: 2,
        }
    }
}

/// TF-IDF vectorizer over unigram and bigram terms.
///
/// Fit at most once; afterwards the vocabulary, the token-to-index
/// mapping and the idf weights are immutable for the lifetime of the
/// instance, and every input is projected into that same space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    /// Term -> feature index, assigned in sorted term order.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
    /// Number of documents seen at fit time.
    n_documents: usize,
    fitted: bool,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer with the given configuration.
    pub fn new(config: TfidfConfig) -> Self {
        Self {
            config,
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            fitted: false,
        }
    }

    /// Create an unfitted vectorizer with default settings.
    pub fn with_defaults() -> Self {
        Self::new(TfidfConfig::default())
    }

    /// Whether `fit` has completed on this instance.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Size of the fitted vocabulary (the feature dimensionality).
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fit on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Extract n-gram terms from cleaned text.
    fn terms(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut terms = Vec::new();
        for n in self.config.ngram_min..=self.config.ngram_max {
            if n == 0 || tokens.len() < n {
                continue;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Fit the vectorizer on a training corpus of cleaned documents.
    ///
    /// Builds the term vocabulary capped at `max_features`, selecting
    /// the highest-scoring terms by corpus-wide tf-idf (total term
    /// frequency times idf, ties broken lexicographically), and stores
    /// the per-term idf weights. Re-fitting is rejected; build a new
    /// instance instead.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if self.fitted {
            return Err(EmotextError::invalid_operation(
                "vectorizer is already fitted; create a new instance to re-fit",
            ));
        }

        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut term_frequency: AHashMap<String, u64> = AHashMap::new();

        for doc in documents {
            let terms = self.terms(doc);
            let mut seen: AHashSet<&str> = AHashSet::new();
            for term in &terms {
                *term_frequency.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *document_frequency.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let n_documents = documents.len();
        let idf_of = |df: usize| -> f64 {
            // Smoothed idf: ln((N + 1) / (df + 1)) + 1
            ((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
        };

        // Rank terms by corpus-wide tf-idf score, keep the top ones.
        let mut scored: Vec<(String, f64)> = term_frequency
            .iter()
            .map(|(term, &tf)| {
                let df = document_frequency.get(term).copied().unwrap_or(0);
                (term.clone(), tf as f64 * idf_of(df))
            })
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(self.config.max_features);

        // Index assignment follows sorted term order so the mapping is
        // independent of hash iteration order.
        let mut selected: Vec<String> = scored.into_iter().map(|(term, _)| term).collect();
        selected.sort_unstable();

        let mut vocabulary = AHashMap::with_capacity(selected.len());
        let mut idf = Vec::with_capacity(selected.len());
        for (index, term) in selected.into_iter().enumerate() {
            let df = document_frequency.get(&term).copied().unwrap_or(0);
            idf.push(idf_of(df));
            vocabulary.insert(term, index);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = n_documents;
        self.fitted = true;

        Ok(())
    }

    /// Project cleaned documents into the fitted vocabulary space.
    ///
    /// Each vector is tf times idf, L2-normalized. Out-of-vocabulary
    /// terms contribute zero weight; a document with no surviving
    /// tokens yields the all-zero vector rather than an error.
    pub fn transform(&self, documents: &[String]) -> Result<Vec<SparseVector>> {
        if !self.fitted {
            return Err(EmotextError::unfitted(
                "transform called before fit on TfidfVectorizer",
            ));
        }

        documents
            .iter()
            .map(|doc| self.transform_one(doc))
            .collect()
    }

    fn transform_one(&self, document: &str) -> Result<SparseVector> {
        let dim = self.vocabulary.len();
        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for term in self.terms(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();
        entries.sort_unstable_by_key(|&(index, _)| index);

        let mut vector = SparseVector::new(dim, entries);
        let norm = vector.l2_norm();
        if norm > 0.0 {
            vector.scale(1.0 / norm);
        }
        Ok(vector)
    }
}

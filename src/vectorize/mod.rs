//! TF-IDF feature extraction.
//!
//! The vectorizer is fit once on a training corpus and thereafter
//! projects any cleaned text into the same immutable vocabulary space.

pub mod sparse;
pub mod tfidf;

pub use sparse::SparseVector;
pub use tfidf::{DEFAULT_MAX_FEATURES, TfidfConfig, TfidfVectorizer};

//! Text analysis for the classification pipeline.
//!
//! Every piece of text entering the vectorizer first passes through
//! [`normalizer::normalize`]; raw text never crosses that boundary.

pub mod normalizer;

pub use normalizer::{normalize, normalize_label};

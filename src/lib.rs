//! # Emotext
//!
//! Emotion classification for short pieces of text.
//!
//! ## Features
//!
//! - Deterministic text normalization
//! - TF-IDF vectorization (unigrams + bigrams, capped vocabulary)
//! - Five classifier families behind one contract
//! - Training, evaluation and model-comparison pipelines
//! - Atomic single-blob model persistence with fingerprinting

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod vectorize;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

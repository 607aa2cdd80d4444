//! Error types for the emotext library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! crate-wide [`EmotextError`] enum. The taxonomy distinguishes the
//! three operator-visible failure classes: no usable input text,
//! missing or corrupt model artifacts, and malformed training data.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for emotext operations.
#[derive(Error, Debug)]
pub enum EmotextError {
    /// I/O errors (corpus files, model artifacts).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// `transform` or `predict` called before the corresponding `fit`.
    #[error("Unfitted state: {0}")]
    Unfitted(String),

    /// Training data cannot produce a usable model (fewer than two
    /// distinct labels, or mismatched feature/label counts).
    #[error("Invalid training set: {0}")]
    InvalidTrainingSet(String),

    /// Input text has no usable tokens after normalization.
    #[error("Empty input: text has no usable tokens after normalization")]
    EmptyInput,

    /// Invalid operation (re-fitting a fitted instance, bad arguments).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Corpus-related errors (unreadable files, structurally broken data).
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Model artifact serialization/deserialization errors, including
    /// version and fingerprint mismatches.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with EmotextError.
pub type Result<T> = std::result::Result<T, EmotextError>;

impl EmotextError {
    /// Create a new unfitted-state error.
    pub fn unfitted<S: Into<String>>(msg: S) -> Self {
        EmotextError::Unfitted(msg.into())
    }

    /// Create a new invalid-training-set error.
    pub fn invalid_training_set<S: Into<String>>(msg: S) -> Self {
        EmotextError::InvalidTrainingSet(msg.into())
    }

    /// Create a new invalid-operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        EmotextError::InvalidOperation(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        EmotextError::Corpus(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        EmotextError::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = EmotextError::unfitted("transform called before fit");
        assert_eq!(
            error.to_string(),
            "Unfitted state: transform called before fit"
        );

        let error = EmotextError::invalid_training_set("only 1 distinct label");
        assert_eq!(
            error.to_string(),
            "Invalid training set: only 1 distinct label"
        );

        let error = EmotextError::corpus("missing label column");
        assert_eq!(error.to_string(), "Corpus error: missing label column");
    }

    #[test]
    fn test_empty_input_display() {
        let error = EmotextError::EmptyInput;
        assert!(error.to_string().contains("no usable tokens"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "model file not found");
        let error = EmotextError::from(io_error);

        match error {
            EmotextError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}

//! Command line argument parsing for the emotext CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::classifier::ClassifierKind;
use crate::corpus::DEFAULT_DELIMITER;
use crate::vectorize::DEFAULT_MAX_FEATURES;

/// Emotext - emotion classification for short text
#[derive(Parser, Debug, Clone)]
#[command(name = "emotext")]
#[command(about = "Train, evaluate and run emotion classifiers over short text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct EmotextArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl EmotextArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a classifier on a labeled corpus and save the model
    Train(TrainArgs),

    /// Evaluate a saved model against a held-out corpus
    Evaluate(EvaluateArgs),

    /// Train every classifier family and rank them by accuracy
    Compare(CompareArgs),

    /// Classify a single piece of text with a saved model
    Classify(ClassifyArgs),
}

/// Arguments for training a model
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled training corpus (text<delimiter>label per line)
    #[arg(value_name = "TRAIN_FILE")]
    pub train_file: PathBuf,

    /// Where to write the trained model artifact
    #[arg(short, long, value_name = "PATH")]
    pub model: PathBuf,

    /// Classifier family to train
    #[arg(short, long, default_value = "linear-svm")]
    pub classifier: ClassifierKind,

    /// Maximum vocabulary size for the vectorizer
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    pub max_features: usize,

    /// Column delimiter in the corpus file
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,
}

/// Arguments for evaluating a model
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Path to a saved model artifact
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Labeled held-out corpus
    #[arg(value_name = "TEST_FILE")]
    pub test_file: PathBuf,

    /// Column delimiter in the corpus file
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,
}

/// Arguments for comparing classifier families
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Labeled training corpus
    #[arg(value_name = "TRAIN_FILE")]
    pub train_file: PathBuf,

    /// Labeled validation corpus
    #[arg(value_name = "VALIDATION_FILE")]
    pub validation_file: PathBuf,

    /// Classifier families to compare (default: all)
    #[arg(long, value_delimiter = ',')]
    pub classifiers: Vec<ClassifierKind>,

    /// Maximum vocabulary size for the vectorizer
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    pub max_features: usize,

    /// Column delimiter in the corpus files
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,
}

impl CompareArgs {
    /// Families to compare; an empty flag means all of them.
    pub fn kinds(&self) -> Vec<ClassifierKind> {
        if self.classifiers.is_empty() {
            ClassifierKind::ALL.to_vec()
        } else {
            self.classifiers.clone()
        }
    }
}

/// Arguments for classifying one utterance
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Path to a saved model artifact
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

//! Command implementations for the emotext CLI.

use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus;
use crate::model::EmotionModel;
use crate::pipeline::{self, TrainingConfig};

use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: EmotextArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args.clone(), &args),
        Command::Evaluate(evaluate_args) => evaluate_model(evaluate_args.clone(), &args),
        Command::Compare(compare_args) => compare_models(compare_args.clone(), &args),
        Command::Classify(classify_args) => classify_text(classify_args.clone(), &args),
    }
}

/// Train a classifier and persist the model artifact.
fn train_model(args: TrainArgs, cli_args: &EmotextArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Training from: {}", args.train_file.display());
    }

    let records = corpus::load_delimited(&args.train_file, args.delimiter)?;
    let config = TrainingConfig {
        classifier: args.classifier,
        max_features: args.max_features,
    };
    let model = pipeline::train(&records, &config)?;
    model.save(&args.model)?;

    output_result(
        "Model trained successfully",
        &TrainingResult {
            model_path: args.model.to_string_lossy().to_string(),
            classifier: model.classifier_kind().to_string(),
            records: records.len(),
            labels: model.labels().labels().to_vec(),
            vocabulary_size: model.vocabulary_size(),
        },
        cli_args,
    )?;

    Ok(())
}

/// Evaluate a saved model against a held-out corpus.
fn evaluate_model(args: EvaluateArgs, cli_args: &EmotextArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading model from: {}", args.model.display());
    }

    let model = EmotionModel::load(&args.model)?;
    let records = corpus::load_delimited(&args.test_file, args.delimiter)?;
    let report = pipeline::evaluate(&model, &records)?;

    output_result("", &report, cli_args)?;
    Ok(())
}

/// Train every requested family and print the ranked table.
fn compare_models(args: CompareArgs, cli_args: &EmotextArgs) -> Result<()> {
    let train_records = corpus::load_delimited(&args.train_file, args.delimiter)?;
    let validation_records = corpus::load_delimited(&args.validation_file, args.delimiter)?;

    let entries = pipeline::compare(
        &train_records,
        &validation_records,
        &args.kinds(),
        args.max_features,
    )?;

    output_result("", &entries, cli_args)?;
    Ok(())
}

/// Classify one utterance with a saved model.
fn classify_text(args: ClassifyArgs, cli_args: &EmotextArgs) -> Result<()> {
    let model = EmotionModel::load(&args.model)?;
    let emotion = model.classify(&args.text)?;

    output_result(
        "",
        &ClassificationResult {
            text: args.text,
            emotion,
        },
        cli_args,
    )?;
    Ok(())
}

//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{EmotextArgs, OutputFormat};
use crate::error::Result;
use crate::pipeline::{ComparisonEntry, EvaluationReport};

/// Result structure for model training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub classifier: String,
    pub records: usize,
    pub labels: Vec<String>,
    pub vocabulary_size: usize,
}

/// Result structure for single-utterance classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub text: String,
    pub emotion: String,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &EmotextArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &EmotextArgs) -> Result<()> {
    if args.verbosity() > 0 && !message.is_empty() {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("EvaluationReport") => {
            output_report_human(&value)
        }
        _ if std::any::type_name::<T>().contains("ComparisonEntry") => {
            output_comparison_human(&value)
        }
        _ if std::any::type_name::<T>().contains("ClassificationResult") => {
            output_classification_human(&value)
        }
        _ => output_generic_human(&value),
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &EmotextArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Render an evaluation report as a metrics table.
fn output_report_human(value: &serde_json::Value) {
    let Some(obj) = value.as_object() else {
        return;
    };

    println!("Evaluation Report");
    println!("═════════════════");
    if let Some(classifier) = obj.get("classifier").and_then(|c| c.as_str()) {
        println!("Classifier: {classifier}");
    }
    if let Some(n) = obj.get("n_samples").and_then(|n| n.as_u64()) {
        println!("Samples:    {n}");
    }
    if let Some(accuracy) = obj.get("accuracy").and_then(|a| a.as_f64()) {
        println!("Accuracy:   {accuracy:.4}");
    }

    if let Some(per_class) = obj.get("per_class").and_then(|p| p.as_array()) {
        println!();
        println!(
            "{:<16} {:>10} {:>10} {:>10} {:>8}",
            "label", "precision", "recall", "f1", "support"
        );
        for metrics in per_class {
            println!(
                "{:<16} {:>10.4} {:>10.4} {:>10.4} {:>8}",
                metrics.get("label").and_then(|l| l.as_str()).unwrap_or("?"),
                metrics.get("precision").and_then(|v| v.as_f64()).unwrap_or(0.0),
                metrics.get("recall").and_then(|v| v.as_f64()).unwrap_or(0.0),
                metrics.get("f1").and_then(|v| v.as_f64()).unwrap_or(0.0),
                metrics.get("support").and_then(|v| v.as_u64()).unwrap_or(0),
            );
        }
        println!(
            "{:<16} {:>10.4} {:>10.4} {:>10.4} {:>8}",
            "weighted avg",
            obj.get("weighted_precision").and_then(|v| v.as_f64()).unwrap_or(0.0),
            obj.get("weighted_recall").and_then(|v| v.as_f64()).unwrap_or(0.0),
            obj.get("weighted_f1").and_then(|v| v.as_f64()).unwrap_or(0.0),
            obj.get("n_samples").and_then(|v| v.as_u64()).unwrap_or(0),
        );
    }

    if let Some(confusion) = obj.get("confusion").and_then(|c| c.as_object()) {
        let labels: Vec<&str> = confusion
            .get("labels")
            .and_then(|l| l.as_array())
            .map(|l| l.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();
        let Some(counts) = confusion.get("counts").and_then(|c| c.as_array()) else {
            return;
        };

        println!();
        println!("Confusion matrix (rows = actual, columns = predicted):");
        print!("{:<16}", "");
        for label in &labels {
            print!(" {label:>12}");
        }
        println!();
        for (label, row) in labels.iter().zip(counts.iter()) {
            print!("{label:<16}");
            if let Some(row) = row.as_array() {
                for count in row {
                    print!(" {:>12}", count.as_u64().unwrap_or(0));
                }
            }
            println!();
        }
    }
}

/// Render the comparison table, best model first.
fn output_comparison_human(value: &serde_json::Value) {
    let Some(entries) = value.as_array() else {
        return;
    };

    println!("Model Comparison");
    println!("════════════════");
    println!(
        "{:<6} {:<22} {:>10} {:>12}",
        "rank", "classifier", "accuracy", "weighted f1"
    );
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "{:<6} {:<22} {:>10.4} {:>12.4}",
            rank + 1,
            entry
                .get("classifier")
                .and_then(|c| c.as_str())
                .unwrap_or("?"),
            entry.get("accuracy").and_then(|v| v.as_f64()).unwrap_or(0.0),
            entry
                .get("weighted_f1")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0),
        );
    }
}

/// Render a single classification verdict.
fn output_classification_human(value: &serde_json::Value) {
    if let Some(emotion) = value.get("emotion").and_then(|e| e.as_str()) {
        println!("{emotion}");
    }
}

/// Generic key/value output for other result types.
fn output_generic_human(value: &serde_json::Value) {
    if let Some(obj) = value.as_object() {
        for (key, val) in obj {
            match val {
                serde_json::Value::String(s) => println!("{key}: {s}"),
                other => println!("{key}: {other}"),
            }
        }
    } else {
        println!("{value}");
    }
}

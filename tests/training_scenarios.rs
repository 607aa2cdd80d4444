//! End-to-end training, persistence and inference scenarios.

use std::fs;

use emotext::classifier::ClassifierKind;
use emotext::corpus::{self, CorpusRecord};
use emotext::error::{EmotextError, Result};
use emotext::model::EmotionModel;
use emotext::pipeline::{self, TrainingConfig};
use tempfile::TempDir;

fn toy_corpus() -> Vec<CorpusRecord> {
    vec![
        CorpusRecord::new("I am so happy today", "joy"),
        CorpusRecord::new("What a wonderful happy day", "joy"),
        CorpusRecord::new("I feel great joy and delight", "joy"),
        CorpusRecord::new("Pure happy delight fills me", "joy"),
        CorpusRecord::new("This makes me furious", "anger"),
        CorpusRecord::new("I am so angry right now", "anger"),
        CorpusRecord::new("Rage and fury fill me", "anger"),
        CorpusRecord::new("Furious rage boils inside", "anger"),
    ]
}

#[test]
fn test_train_and_classify_joy() -> Result<()> {
    let model = pipeline::train(&toy_corpus(), &TrainingConfig::default())?;

    assert_eq!(model.classify("I am extremely joyful")?, "joy");
    assert_eq!(model.classify("This fills me with rage")?, "anger");
    Ok(())
}

#[test]
fn test_classify_empty_input_never_crashes() -> Result<()> {
    let model = pipeline::train(&toy_corpus(), &TrainingConfig::default())?;

    for input in ["", "   ", "1234567890", "!@#$%^&*()"] {
        assert!(matches!(
            model.classify(input),
            Err(EmotextError::EmptyInput)
        ));
    }
    Ok(())
}

#[test]
fn test_save_load_classify_roundtrip() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let model_path = temp_dir.path().join("emotion.model");

    let model = pipeline::train(&toy_corpus(), &TrainingConfig::default())?;
    model.save(&model_path)?;
    let reloaded = EmotionModel::load(&model_path)?;

    // Predictions must be bit-identical across the round-trip.
    let inputs = [
        "I am extremely joyful",
        "rage boils inside me",
        "a wonderful day of delight",
        "so angry and furious",
    ];
    for input in inputs {
        assert_eq!(model.classify(input)?, reloaded.classify(input)?);
    }
    assert_eq!(model.labels(), reloaded.labels());
    assert_eq!(model.classifier_kind(), reloaded.classifier_kind());
    Ok(())
}

#[test]
fn test_every_family_trains_and_roundtrips() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();

    for kind in ClassifierKind::ALL {
        let config = TrainingConfig {
            classifier: kind,
            ..Default::default()
        };
        let model = pipeline::train(&toy_corpus(), &config)?;
        assert_eq!(model.classifier_kind(), kind);

        let path = temp_dir.path().join(format!("{kind}.model"));
        model.save(&path)?;
        let reloaded = EmotionModel::load(&path)?;
        assert_eq!(
            model.classify("happy wonderful delight")?,
            reloaded.classify("happy wonderful delight")?
        );
    }
    Ok(())
}

#[test]
fn test_train_from_delimited_file() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let corpus_path = temp_dir.path().join("train.csv");

    let mut contents = String::new();
    for record in toy_corpus() {
        contents.push_str(&format!("{};{}\n", record.text, record.label));
    }
    // One malformed row; it must be dropped, not fatal.
    contents.push_str("this row has no label column\n");
    fs::write(&corpus_path, contents)?;

    let records = corpus::load_delimited(&corpus_path, ';')?;
    assert_eq!(records.len(), toy_corpus().len());

    let model = pipeline::train(&records, &TrainingConfig::default())?;
    assert_eq!(model.labels().labels(), &["anger", "joy"]);
    Ok(())
}

#[test]
fn test_missing_model_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist.model");
    assert!(matches!(
        EmotionModel::load(&missing),
        Err(EmotextError::Io(_))
    ));
}

#[test]
fn test_corrupt_model_is_serialization_error() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let model_path = temp_dir.path().join("emotion.model");

    let model = pipeline::train(&toy_corpus(), &TrainingConfig::default())?;
    model.save(&model_path)?;

    let mut bytes = fs::read(&model_path)?;
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    fs::write(&model_path, &bytes)?;

    assert!(matches!(
        EmotionModel::load(&model_path),
        Err(EmotextError::Serialization(_))
    ));
    Ok(())
}

//! Evaluation and model-comparison scenarios.

use emotext::classifier::ClassifierKind;
use emotext::corpus::CorpusRecord;
use emotext::error::{EmotextError, Result};
use emotext::pipeline::{self, TrainingConfig};

fn train_corpus() -> Vec<CorpusRecord> {
    vec![
        CorpusRecord::new("I am so happy today", "joy"),
        CorpusRecord::new("What a wonderful happy day", "joy"),
        CorpusRecord::new("I feel great joy and delight", "joy"),
        CorpusRecord::new("Pure happy delight fills me", "joy"),
        CorpusRecord::new("Happy and full of delight", "joy"),
        CorpusRecord::new("This makes me furious", "anger"),
        CorpusRecord::new("I am so angry right now", "anger"),
        CorpusRecord::new("Rage and fury fill me", "anger"),
        CorpusRecord::new("Furious rage boils inside", "anger"),
        CorpusRecord::new("Angry fury and rage", "anger"),
    ]
}

fn validation_corpus() -> Vec<CorpusRecord> {
    vec![
        CorpusRecord::new("a happy wonderful day", "joy"),
        CorpusRecord::new("joy and delight today", "joy"),
        CorpusRecord::new("great happy delight", "joy"),
        CorpusRecord::new("angry furious rage", "anger"),
        CorpusRecord::new("fury boils inside me", "anger"),
    ]
}

#[test]
fn test_evaluate_separable_corpus() -> Result<()> {
    let model = pipeline::train(&train_corpus(), &TrainingConfig::default())?;
    let report = pipeline::evaluate(&model, &validation_corpus())?;

    assert_eq!(report.n_samples, 5);
    assert_eq!(report.accuracy, 1.0);
    assert_eq!(report.per_class.len(), 2);
    assert_eq!(report.weighted_f1, 1.0);

    // Confusion diagonal carries everything.
    assert_eq!(report.confusion.count("joy", "joy"), 3);
    assert_eq!(report.confusion.count("anger", "anger"), 2);
    assert_eq!(report.confusion.count("joy", "anger"), 0);
    Ok(())
}

#[test]
fn test_report_includes_unseen_label() -> Result<()> {
    let model = pipeline::train(&train_corpus(), &TrainingConfig::default())?;

    // "fear" was never trained; it must show up in the report with
    // zero recall but can never be predicted.
    let mut records = validation_corpus();
    records.push(CorpusRecord::new("I am terrified of the dark", "fear"));
    let report = pipeline::evaluate(&model, &records)?;

    let fear = report.per_class.iter().find(|m| m.label == "fear").unwrap();
    assert_eq!(fear.support, 1);
    assert_eq!(fear.recall, 0.0);

    let predicted_fear: usize = report
        .confusion
        .labels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.as_str() == "fear")
        .map(|(j, _)| report.confusion.counts.iter().map(|row| row[j]).sum::<usize>())
        .sum();
    assert_eq!(predicted_fear, 0);
    Ok(())
}

#[test]
fn test_report_is_json_serializable() -> Result<()> {
    let model = pipeline::train(&train_corpus(), &TrainingConfig::default())?;
    let report = pipeline::evaluate(&model, &validation_corpus())?;

    let json = serde_json::to_string(&report)?;
    assert!(json.contains("\"accuracy\""));
    assert!(json.contains("\"confusion\""));
    Ok(())
}

#[test]
fn test_evaluate_empty_set_rejected() -> Result<()> {
    let model = pipeline::train(&train_corpus(), &TrainingConfig::default())?;
    let unusable = vec![CorpusRecord::new("12345", "joy")];
    assert!(matches!(
        pipeline::evaluate(&model, &unusable),
        Err(EmotextError::Corpus(_))
    ));
    Ok(())
}

#[test]
fn test_compare_ranks_all_families() -> Result<()> {
    let entries = pipeline::compare(
        &train_corpus(),
        &validation_corpus(),
        &ClassifierKind::ALL,
        15_000,
    )?;

    assert_eq!(entries.len(), ClassifierKind::ALL.len());
    for pair in entries.windows(2) {
        assert!(pair[0].accuracy >= pair[1].accuracy);
    }
    Ok(())
}

#[test]
fn test_compare_subset_of_families() -> Result<()> {
    let kinds = [ClassifierKind::LinearSvm, ClassifierKind::NaiveBayes];
    let entries = pipeline::compare(&train_corpus(), &validation_corpus(), &kinds, 15_000)?;

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e.classifier == ClassifierKind::LinearSvm));
    assert!(entries.iter().any(|e| e.classifier == ClassifierKind::NaiveBayes));
    Ok(())
}

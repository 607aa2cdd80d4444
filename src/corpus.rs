//! Delimited corpus file loading.
//!
//! Corpus files carry two columns per line, text and label, separated
//! by a configurable delimiter (`;` in the original datasets). Rows
//! with the wrong shape are dropped with a warning; only I/O failures
//! propagate.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default column delimiter for corpus files.
pub const DEFAULT_DELIMITER: char = ';';

/// One raw (text, label) record as read from a corpus file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    /// Raw utterance text.
    pub text: String,
    /// Raw emotion label.
    pub label: String,
}

impl CorpusRecord {
    /// Create a record from owned parts.
    pub fn new<T: Into<String>, L: Into<String>>(text: T, label: L) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Load (text, label) records from a delimited file.
///
/// The label is taken from the last delimiter-separated field so that
/// delimiters inside the text column do not shift the label. Rows
/// without a delimiter are dropped with a warning.
pub fn load_delimited<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Vec<CorpusRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.rsplit_once(delimiter) {
            Some((text, label)) => {
                records.push(CorpusRecord::new(text, label));
            }
            None => {
                dropped += 1;
                warn!(
                    "dropping malformed row {} in {}: no '{}' delimiter",
                    line_number + 1,
                    path.display(),
                    delimiter
                );
            }
        }
    }

    if dropped > 0 {
        warn!(
            "dropped {} malformed row(s) while loading {}",
            dropped,
            path.display()
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_delimited() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "i am so happy;joy").unwrap();
        writeln!(file, "this makes me furious;anger").unwrap();
        file.flush().unwrap();

        let records = load_delimited(file.path(), ';').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], CorpusRecord::new("i am so happy", "joy"));
        assert_eq!(records[1].label, "anger");
    }

    #[test]
    fn test_delimiter_inside_text() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "well; that went badly;anger").unwrap();
        file.flush().unwrap();

        let records = load_delimited(file.path(), ';').unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "well; that went badly");
        assert_eq!(records[0].label, "anger");
    }

    #[test]
    fn test_malformed_rows_dropped() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "no delimiter on this line").unwrap();
        writeln!(file, "a valid line;joy").unwrap();
        writeln!(file).unwrap();
        file.flush().unwrap();

        let records = load_delimited(file.path(), ';').unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "joy");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_delimited("/nonexistent/corpus.csv", ';');
        assert!(matches!(
            result,
            Err(crate::error::EmotextError::Io(_))
        ));
    }
}

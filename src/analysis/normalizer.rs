//! Deterministic text normalization.
//!
//! The cleaning policy is deliberately lossy and ASCII-only: digits,
//! punctuation, emoji and non-Latin scripts are all stripped. Callers
//! must treat an all-stripped result as "no usable signal".

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ASCII_LETTER: Regex = Regex::new(r"[^a-zA-Z ]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize raw utterance text into its cleaned form.
///
/// Lower-cases, removes every character that is not an ASCII letter or
/// a space, collapses whitespace runs to a single space and trims.
/// Pure, total and idempotent; empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let stripped = NON_ASCII_LETTER.replace_all(text, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_lowercase()
}

/// Normalize a raw label value (lower-case and trim).
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

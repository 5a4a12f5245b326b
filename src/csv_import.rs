//! CSV bulk-import decoding
//!
//! Uploaded files use a fixed, positional column layout per entity
//! kind (vocabulary: kanji, furigana, meaning; grammar: grammar,
//! furigana, meaning, memo). A header row is present but ignored; the
//! mapping is positional, not header-driven.

use csv::StringRecord;

use crate::error::ApiError;
use crate::storage::types::{NewGrammar, NewVocabulary};

fn column(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

fn optional(record: &StringRecord, index: usize) -> Option<String> {
    let value = column(record, index);
    (!value.is_empty()).then(|| value.to_string())
}

fn required(record: &StringRecord, index: usize, name: &str, row: usize) -> Result<String, ApiError> {
    let value = column(record, index);
    if value.is_empty() {
        return Err(ApiError::Validation(format!(
            "CSV data row {row}: missing {name}"
        )));
    }
    Ok(value.to_string())
}

fn records(bytes: &[u8]) -> impl Iterator<Item = (usize, Result<StringRecord, csv::Error>)> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes)
        .into_records()
        .enumerate()
        .map(|(index, record)| (index + 1, record))
}

/// Decode a vocabulary CSV upload (columns: kanji, furigana, meaning).
pub fn parse_vocabulary(bytes: &[u8]) -> Result<Vec<NewVocabulary>, ApiError> {
    let mut rows = Vec::new();
    for (row, record) in records(bytes) {
        let record = record
            .map_err(|e| ApiError::Validation(format!("CSV data row {row}: {e}")))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(NewVocabulary {
            kanji: required(&record, 0, "kanji", row)?,
            furigana: optional(&record, 1),
            meaning: required(&record, 2, "meaning", row)?,
        });
    }
    Ok(rows)
}

/// Decode a grammar CSV upload (columns: grammar, furigana, meaning,
/// memo).
pub fn parse_grammar(bytes: &[u8]) -> Result<Vec<NewGrammar>, ApiError> {
    let mut rows = Vec::new();
    for (row, record) in records(bytes) {
        let record = record
            .map_err(|e| ApiError::Validation(format!("CSV data row {row}: {e}")))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(NewGrammar {
            grammar: required(&record, 0, "grammar", row)?,
            furigana: optional(&record, 1),
            meaning: required(&record, 2, "meaning", row)?,
            memo: optional(&record, 3),
        });
    }
    Ok(rows)
}

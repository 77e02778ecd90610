//! Delimited-text summarizer built on the `csv` crate

use quorum_application::DataSummarizer;
use quorum_domain::{Attachment, AttachmentSet, FileDigest, TabularKind};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a tabular attachment could not be previewed
///
/// Only ever rendered into a [`FileDigest`] note.
#[derive(Error, Debug)]
pub enum SummarizerParseError {
    #[error("No columns to parse from file")]
    NoColumns,

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow { line: u64, expected: u64, found: u64 },

    #[error("Invalid UTF-8 in line {line}")]
    InvalidUtf8 { line: u64 },

    #[error("{0}")]
    Csv(csv::Error),

    #[error("Could not render preview: {0}")]
    Render(#[from] serde_json::Error),
}

impl From<csv::Error> for SummarizerParseError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Utf8 { pos, .. } => SummarizerParseError::InvalidUtf8 {
                line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            },
            _ => SummarizerParseError::Csv(err),
        }
    }
}

/// Previews the first records of every CSV/TSV attachment
pub struct CsvSummarizer {
    preview_rows: usize,
}

impl CsvSummarizer {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    /// Parse one attachment and render its preview as a compact JSON array.
    ///
    /// The whole file is read so that a malformed row past the preview
    /// still fails the digest. Short rows are padded with nulls; only rows
    /// wider than the header are malformed.
    pub fn preview(&self, kind: TabularKind, bytes: &[u8]) -> Result<String, SummarizerParseError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(kind.delimiter())
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = unique_headers(reader.headers()?);
        if headers.is_empty() {
            return Err(SummarizerParseError::NoColumns);
        }

        let mut rows: Vec<Map<String, Value>> = Vec::with_capacity(self.preview_rows);
        for record in reader.records() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(SummarizerParseError::RaggedRow {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    expected: headers.len() as u64,
                    found: record.len() as u64,
                });
            }
            if rows.len() < self.preview_rows {
                rows.push(
                    headers
                        .iter()
                        .enumerate()
                        .map(|(i, name)| {
                            (name.clone(), record.get(i).map_or(Value::Null, typed_cell))
                        })
                        .collect(),
                );
            }
        }

        Ok(serde_json::to_string(&rows)?)
    }

    fn digest(&self, kind: TabularKind, attachment: &Attachment) -> FileDigest {
        match self.preview(kind, attachment.bytes()) {
            Ok(records) => {
                debug!(file = %attachment.name(), %kind, "Tabular preview ready");
                FileDigest::preview(kind, attachment.name(), records)
            }
            Err(e) => {
                warn!(file = %attachment.name(), %kind, error = %e, "Could not parse attachment");
                FileDigest::parse_error(kind, attachment.name(), e.to_string())
            }
        }
    }
}

impl DataSummarizer for CsvSummarizer {
    fn summarize(&self, attachments: &AttachmentSet) -> Vec<FileDigest> {
        attachments
            .iter()
            .filter_map(|a| a.tabular_kind().map(|kind| self.digest(kind, a)))
            .collect()
    }
}

/// Repeated column names get a `.1`, `.2`... suffix
fn unique_headers(record: &csv::StringRecord) -> Vec<String> {
    if record.len() == 1 && record[0].is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<String> = HashSet::new();
    record
        .iter()
        .map(|name| {
            let mut candidate = name.to_string();
            let mut n = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}.{}", name, n);
                n += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn typed_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(raw.to_string())
}

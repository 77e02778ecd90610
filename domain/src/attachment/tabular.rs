//! Recognized tabular formats

use serde::{Deserialize, Serialize};

/// Delimited tabular formats recognized by file extension (case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabularKind {
    /// Comma-separated values (`.csv`)
    Csv,
    /// Tab-separated values (`.tsv`)
    Tsv,
}

impl TabularKind {
    pub fn from_filename(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Some(TabularKind::Csv)
        } else if lower.ends_with(".tsv") {
            Some(TabularKind::Tsv)
        } else {
            None
        }
    }

    pub fn delimiter(&self) -> u8 {
        match self {
            TabularKind::Csv => b',',
            TabularKind::Tsv => b'\t',
        }
    }

    /// Label used as the first word of a digest line
    pub fn label(&self) -> &'static str {
        match self {
            TabularKind::Csv => "CSV",
            TabularKind::Tsv => "TSV",
        }
    }
}

impl std::fmt::Display for TabularKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

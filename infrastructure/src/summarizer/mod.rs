//! Tabular attachment summaries
//!
//! [`CsvSummarizer`] implements the
//! [`DataSummarizer`](quorum_application::DataSummarizer) port for
//! comma- and tab-separated attachments.

mod delimited;

pub use delimited::{CsvSummarizer, SummarizerParseError};

//! Data summarizer port

use quorum_domain::{AttachmentSet, FileDigest};

/// Produces digests for the tabular attachments of a request
///
/// Implementations must not fail: a file that cannot be parsed yields a
/// digest carrying an error note, and non-tabular files yield nothing.
/// Summarizing is local CPU work, so the method is synchronous.
pub trait DataSummarizer: Send + Sync {
    fn summarize(&self, attachments: &AttachmentSet) -> Vec<FileDigest>;
}

/// Summarizer that never produces digests
pub struct NoSummaries;

impl DataSummarizer for NoSummaries {
    fn summarize(&self, _attachments: &AttachmentSet) -> Vec<FileDigest> {
        Vec::new()
    }
}

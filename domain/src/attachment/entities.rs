//! Attachment entities

use super::tabular::TabularKind;

/// One uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Tabular kind inferred from the file name, if any
    pub fn tabular_kind(&self) -> Option<TabularKind> {
        TabularKind::from_filename(&self.name)
    }
}

/// Ordered set of uploads for one request
///
/// Upload order is preserved and duplicate names are kept as separate
/// entries, so "the first attachment" is always well defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    items: Vec<Attachment>,
}

impl AttachmentSet {
    pub fn new(items: Vec<Attachment>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, attachment: Attachment) {
        self.items.push(attachment);
    }

    /// The question source
    pub fn first(&self) -> Option<&Attachment> {
        self.items.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of attachments with a recognized tabular extension
    pub fn tabular_count(&self) -> usize {
        self.items
            .iter()
            .filter(|a| a.tabular_kind().is_some())
            .count()
    }

    /// Total payload size in bytes
    pub fn total_bytes(&self) -> usize {
        self.items.iter().map(|a| a.bytes.len()).sum()
    }
}

impl FromIterator<Attachment> for AttachmentSet {
    fn from_iter<T: IntoIterator<Item = Attachment>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Local document mirror
//!
//! The server holds the authoritative document. A [`Document`] is the
//! client's cached projection of it: the current text and the revision the
//! client believes it has reached.

use crate::error::Result;
use crate::operation::Operation;
use crate::protocol::DocumentInit;
use crate::DocumentID;

/// Text content plus revision counter for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentID,
    content: String,
    revision: u64,
}

impl Document {
    /// Create a document from a freshly fetched snapshot
    pub fn from_init(id: DocumentID, init: DocumentInit) -> Self {
        Self {
            id,
            content: init.content,
            revision: init.revision,
        }
    }

    /// Get document ID
    pub fn id(&self) -> &DocumentID {
        &self.id
    }

    /// Current text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Length of the text in chars
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Last revision the server confirmed or broadcast
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply an operation to the content. The content is left unchanged if
    /// the operation does not fit.
    pub fn apply(&mut self, op: &Operation) -> Result<()> {
        self.content = op.apply(&self.content)?;
        Ok(())
    }

    /// Replace the content with a local edit that has already happened
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Advance the revision after an acknowledgement or a remote edit
    pub fn bump_revision(&mut self) {
        self.revision = self.revision.saturating_add(1);
    }

    /// Replace content and revision with a fresh server snapshot
    pub fn reset(&mut self, init: DocumentInit) {
        self.content = init.content;
        self.revision = init.revision;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Document {
        Document::from_init("docA".to_string(), DocumentInit::default())
    }

    #[test]
    fn test_empty_document() {
        let doc = empty();
        assert_eq!(doc.id(), "docA");
        assert!(doc.is_empty());
        assert_eq!(doc.revision(), 0);
    }

    #[test]
    fn test_apply_and_revision() {
        let mut doc = Document::from_init(
            "docA".to_string(),
            DocumentInit {
                content: "hello".to_string(),
                revision: 7,
            },
        );

        let mut op = Operation::new();
        op.retain(5).insert(" world");
        doc.apply(&op).unwrap();
        doc.bump_revision();

        assert_eq!(doc.content(), "hello world");
        assert_eq!(doc.len(), 11);
        assert_eq!(doc.revision(), 8);
    }

    #[test]
    fn test_failed_apply_keeps_content() {
        let mut doc = empty();
        doc.set_content("abc".to_string());

        let mut op = Operation::new();
        op.retain(10);
        assert!(doc.apply(&op).is_err());
        assert_eq!(doc.content(), "abc");
    }

    #[test]
    fn test_reset() {
        let mut doc = empty();
        doc.set_content("stale".to_string());
        doc.reset(DocumentInit {
            content: "fresh".to_string(),
            revision: 42,
        });
        assert_eq!(doc.content(), "fresh");
        assert_eq!(doc.revision(), 42);
    }
}

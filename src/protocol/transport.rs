//! Boundary to the connection owned by the caller
//!
//! The engine never holds a connection. The caller passes its transport into
//! [`EditorSession::handle`](crate::sync::EditorSession::handle), which uses it
//! to publish edits and to refetch the document when it has to resync.

use super::messages::{DocumentInit, OutboundEdit};
use crate::error::Result;

/// Connection to the sequencing server
pub trait Transport {
    /// Publish a local edit to the server
    fn publish(&mut self, edit: &OutboundEdit) -> Result<()>;

    /// Fetch the current content and revision of a document
    fn fetch_document(&mut self, session_id: &str, document_id: &str) -> Result<DocumentInit>;
}

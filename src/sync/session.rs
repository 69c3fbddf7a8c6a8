//! Editor session: document mirror, caret and client state for one document
//!
//! An [`EditorSession`] is the single owner of everything the engine mutates.
//! Events must be fed in the order the transport delivers them; each one runs
//! to completion before the next.
//!
//! The low-level entry points ([`local_change`](EditorSession::local_change),
//! [`receive_remote`](EditorSession::receive_remote),
//! [`receive_ack`](EditorSession::receive_ack)) return the messages to publish
//! and leave error recovery to the caller. [`handle`](EditorSession::handle)
//! wires them to a [`Transport`]: it publishes outbound edits and answers any
//! desync by refetching the document and starting over from `Synced`.

use super::client::{Client, SyncState};
use crate::config::SessionConfig;
use crate::cursor::{index_to_row_col, transform_cursor};
use crate::diff::generate_op;
use crate::document::Document;
use crate::error::{OtError, Result};
use crate::operation::Operation;
use crate::protocol::{DocumentInit, OutboundEdit, RemoteEdit, Transport};

/// Something that happened to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user edited the text; `cursor` is the caret offset afterwards
    LocalChange { text: String, cursor: usize },
    /// The server broadcast an edit
    Remote(RemoteEdit),
    /// The server acknowledged our in-flight edit
    Ack,
    /// The connection was re-established
    Reconnected,
}

/// Client side of one collaborative editing session
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: SessionConfig,
    document: Document,
    client: Client,
    cursor: usize,
}

impl EditorSession {
    /// Start a session from a fetched document snapshot.
    ///
    /// The caret starts at the end of the content.
    pub fn new(config: SessionConfig, init: DocumentInit) -> Self {
        let document = Document::from_init(config.document_id.clone(), init);
        let cursor = document.len();
        Self {
            config,
            document,
            client: Client::new(),
            cursor,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn content(&self) -> &str {
        self.document.content()
    }

    pub fn revision(&self) -> u64 {
        self.document.revision()
    }

    /// Caret offset in chars
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> SyncState {
        self.client.state()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Move the caret without editing
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.document.len());
    }

    /// The local text changed to `new_text`.
    ///
    /// Returns the edit to publish, if the change has to be sent right away.
    /// Changes that leave the text untouched produce nothing.
    pub fn local_change(&mut self, new_text: &str, cursor: usize) -> Result<Option<OutboundEdit>> {
        let op = generate_op(self.document.content(), new_text);
        self.document.set_content(new_text.to_string());
        self.set_cursor(cursor);

        if op.is_noop() {
            return Ok(None);
        }
        let to_send = self.client.apply_client(op)?;
        Ok(to_send.map(|op| self.outbound(op)))
    }

    /// A remote edit arrived.
    ///
    /// Echoes of this client's own edits are ignored and return `false`.
    /// A broadcast that names a revision other than the one directly after
    /// the mirror's is rejected as a desync. Any error means the mirror can
    /// no longer be trusted; the caller must [`resync`](Self::resync).
    pub fn receive_remote(&mut self, edit: &RemoteEdit) -> Result<bool> {
        if edit.client_id == self.config.client_id {
            return Ok(false);
        }

        let expected = self.document.revision().saturating_add(1);
        if let Some(revision) = edit.revision.filter(|r| *r != expected) {
            return Err(OtError::Protocol(format!(
                "broadcast revision {} but mirror expects {}",
                revision, expected
            )));
        }

        let remote = edit.decode_operation()?;
        let to_apply = self.client.apply_server(remote)?;
        self.document.apply(&to_apply)?;
        self.cursor = transform_cursor(self.cursor, &to_apply);
        self.document.bump_revision();

        tracing::debug!(
            from = %edit.client_id,
            revision = self.document.revision(),
            op = %to_apply,
            "applied remote operation"
        );
        Ok(true)
    }

    /// The server acknowledged the in-flight edit.
    ///
    /// Returns the buffered edit that is now in flight, if any.
    pub fn receive_ack(&mut self) -> Result<Option<OutboundEdit>> {
        let next = self.client.server_ack()?;
        self.document.bump_revision();
        Ok(next.map(|op| self.outbound(op)))
    }

    /// Replace the mirror with a fresh snapshot and return to `Synced`.
    ///
    /// Unacknowledged local edits are discarded.
    pub fn resync(&mut self, init: DocumentInit) {
        if self.client.state() != SyncState::Synced {
            tracing::warn!(
                document = %self.config.document_id,
                "discarding unacknowledged local edits"
            );
        }
        self.client.reset();
        self.document.reset(init);
        self.cursor = self.document.len();
    }

    /// Process one event, publishing through `transport` as needed.
    ///
    /// Any error that leaves the mirror in doubt triggers a refetch and
    /// resync. Transport errors are returned to the caller.
    pub fn handle<T: Transport>(&mut self, event: SessionEvent, transport: &mut T) -> Result<()> {
        let result = match event {
            SessionEvent::LocalChange { text, cursor } => self
                .local_change(&text, cursor)
                .and_then(|edit| publish(transport, edit)),
            SessionEvent::Remote(edit) => self.receive_remote(&edit).map(|_| ()),
            SessionEvent::Ack => self
                .receive_ack()
                .and_then(|edit| publish(transport, edit)),
            SessionEvent::Reconnected => return self.refetch(transport),
        };

        match result {
            Err(err) if err.requires_resync() => {
                tracing::warn!(error = %err, "session desynchronized, refetching document");
                self.refetch(transport)
            }
            other => other,
        }
    }

    fn refetch<T: Transport>(&mut self, transport: &mut T) -> Result<()> {
        let init = transport.fetch_document(&self.config.session_id, &self.config.document_id)?;
        tracing::debug!(revision = init.revision, "resynchronized document");
        self.resync(init);
        Ok(())
    }

    fn outbound(&self, op: Operation) -> OutboundEdit {
        OutboundEdit {
            client_id: self.config.client_id.clone(),
            document_id: self.config.document_id.clone(),
            session_id: self.config.session_id.clone(),
            revision: self.document.revision(),
            base_length: op.base_len(),
            target_length: op.target_len(),
            operation: op,
            cursor_position: index_to_row_col(self.document.content(), self.cursor),
        }
    }
}

fn publish<T: Transport>(transport: &mut T, edit: Option<OutboundEdit>) -> Result<()> {
    match edit {
        Some(edit) => transport.publish(&edit),
        None => Ok(()),
    }
}

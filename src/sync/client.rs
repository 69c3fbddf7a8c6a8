//! Client synchronization state machine
//!
//! Keeps at most one operation in flight to the server (`pending`) and
//! composes every later local edit into a single `buffer` until the pending
//! one is acknowledged.
//!
//! ```text
//!            local edit                     local edit
//!   Synced ─────────────▶ AwaitingAck ─────────────────▶ AwaitingAckBuffered
//!     ▲                     │    ▲                          │  ▲      │
//!     └──────── ack ────────┘    └──── ack (send buffer) ───┘  └──────┘
//!                                                              local edit
//! ```
//!
//! Remote operations never change the state; they are transformed against
//! `pending` and `buffer` so they apply cleanly on top of unacknowledged
//! local work.

use crate::error::{OtError, Result};
use crate::operation::{transform, Operation};

/// Externally visible state of a [`Client`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing in flight
    Synced,
    /// One operation awaiting acknowledgement
    AwaitingAck,
    /// One operation in flight plus buffered local edits
    AwaitingAckBuffered,
}

/// Pending/buffer slots of one client.
///
/// Invariant: `buffer.is_some()` implies `pending.is_some()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Client {
    pending: Option<Operation>,
    buffer: Option<Operation>,
}

impl Client {
    /// Create a client in the `Synced` state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SyncState {
        match (&self.pending, &self.buffer) {
            (None, _) => SyncState::Synced,
            (Some(_), None) => SyncState::AwaitingAck,
            (Some(_), Some(_)) => SyncState::AwaitingAckBuffered,
        }
    }

    /// Operation currently in flight
    pub fn pending(&self) -> Option<&Operation> {
        self.pending.as_ref()
    }

    /// Local edits made since `pending` was sent
    pub fn buffer(&self) -> Option<&Operation> {
        self.buffer.as_ref()
    }

    /// Record a local edit.
    ///
    /// Returns the operation to transmit when nothing was in flight;
    /// otherwise the edit is composed into the buffer and `None` is returned.
    pub fn apply_client(&mut self, op: Operation) -> Result<Option<Operation>> {
        if self.pending.is_none() {
            self.pending = Some(op.clone());
            tracing::debug!(op = %op, "sending local operation");
            return Ok(Some(op));
        }

        let buffered = match self.buffer.take() {
            Some(buffer) => match buffer.compose(&op) {
                Ok(composed) => composed,
                Err(err) => {
                    self.buffer = Some(buffer);
                    return Err(err);
                }
            },
            None => op,
        };
        tracing::debug!(buffer = %buffered, "buffering local operation");
        self.buffer = Some(buffered);
        Ok(None)
    }

    /// The server acknowledged `pending`.
    ///
    /// Returns the buffered operation, which becomes the new `pending` and
    /// must be transmitted. An acknowledgement with nothing in flight means
    /// client and server disagree and is reported as `UnexpectedAck`.
    pub fn server_ack(&mut self) -> Result<Option<Operation>> {
        if self.pending.is_none() {
            return Err(OtError::UnexpectedAck);
        }

        self.pending = self.buffer.take();
        match &self.pending {
            Some(next) => tracing::debug!(op = %next, "acknowledged, sending buffer"),
            None => tracing::debug!("acknowledged, synced"),
        }
        Ok(self.pending.clone())
    }

    /// Transform a remote operation against outstanding local work.
    ///
    /// Returns the operation to apply to the local document. On error the
    /// client is left untouched.
    pub fn apply_server(&mut self, remote: Operation) -> Result<Operation> {
        let Some(pending) = &self.pending else {
            return Ok(remote);
        };

        let (pending, remote) = transform(pending, &remote)?;
        match &self.buffer {
            None => {
                self.pending = Some(pending);
                Ok(remote)
            }
            Some(buffer) => {
                let (buffer, remote) = transform(buffer, &remote)?;
                self.pending = Some(pending);
                self.buffer = Some(buffer);
                Ok(remote)
            }
        }
    }

    /// Drop all unacknowledged work and return to `Synced`
    pub fn reset(&mut self) {
        self.pending = None;
        self.buffer = None;
    }
}

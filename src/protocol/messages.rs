//! JSON message shapes exchanged with the sequencing server

use super::wire::WireStep;
use crate::cursor::CursorPosition;
use crate::error::Result;
use crate::operation::Operation;
use crate::{ClientID, DocumentID};
use serde::{Deserialize, Serialize};

/// Response of the document-init exchange
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInit {
    pub content: String,
    pub revision: u64,
}

impl DocumentInit {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Edit published by this client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEdit {
    pub client_id: ClientID,
    pub document_id: DocumentID,
    pub session_id: String,
    pub revision: u64,
    pub operation: Operation,
    pub base_length: usize,
    pub target_length: usize,
    pub cursor_position: CursorPosition,
}

impl OutboundEdit {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Edit broadcast by the server, originating from any client.
///
/// The operation is kept in raw wire form so a malformed step list surfaces
/// as a validation error in the session rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEdit {
    pub client_id: ClientID,
    #[serde(default)]
    pub document_id: Option<DocumentID>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub revision: Option<u64>,
    #[serde(default)]
    pub operation: Vec<WireStep>,
    #[serde(default)]
    pub base_length: Option<usize>,
    #[serde(default)]
    pub target_length: Option<usize>,
    #[serde(default)]
    pub cursor_position: Option<CursorPosition>,
}

impl RemoteEdit {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode and validate the carried operation
    pub fn decode_operation(&self) -> Result<Operation> {
        Operation::from_wire_checked(&self.operation, self.base_length, self.target_length)
    }
}

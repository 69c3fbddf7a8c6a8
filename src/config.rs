//! Session configuration
//!
//! Identifies which document and editing session a client joins, and the
//! client itself. Loadable from JSON (camelCase keys, all optional).
//!
//! ```
//! use otkit_core::SessionConfig;
//!
//! let config = SessionConfig::from_json(r#"{"documentId": "notes"}"#).unwrap();
//! assert_eq!(config.document_id, "notes");
//! assert_eq!(config.session_id, "session1");
//! assert!(config.client_id.starts_with("client-"));
//! ```

use crate::error::Result;
use crate::{ClientID, DocumentID};
use serde::{Deserialize, Serialize};

/// Default document joined when none is configured
pub const DEFAULT_DOCUMENT_ID: &str = "docA";

/// Default editing session
pub const DEFAULT_SESSION_ID: &str = "session1";

/// Identifiers carried on every outbound edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub client_id: ClientID,
    pub document_id: DocumentID,
    pub session_id: String,
}

impl SessionConfig {
    pub fn new(document_id: impl Into<DocumentID>, session_id: impl Into<String>) -> Self {
        Self {
            client_id: generate_client_id(),
            document_id: document_id.into(),
            session_id: session_id.into(),
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<ClientID>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_document_id(mut self, document_id: impl Into<DocumentID>) -> Self {
        self.document_id = document_id.into();
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Parse a JSON configuration. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DOCUMENT_ID, DEFAULT_SESSION_ID)
    }
}

/// Fresh random client id of the form `client-xxxxxxxxx`
pub fn generate_client_id() -> ClientID {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("client-{}", &uuid[..9])
}

//! JavaScript bindings for OTKit core types
//!
//! Operations cross the boundary as JSON strings in the compact wire
//! encoding (`[5, "!", -2]`).

use crate::config::SessionConfig;
use crate::operation::Operation;
use crate::protocol::{DocumentInit, OutboundEdit, RemoteEdit};
use crate::sync::{EditorSession, SyncState};
use wasm_bindgen::prelude::*;

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_op(json: &str) -> Result<Operation, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid operation: {}", e)))
}

fn op_to_json(op: &Operation) -> Result<String, JsValue> {
    serde_json::to_string(op).map_err(js_err)
}

fn edit_to_json(edit: Option<OutboundEdit>) -> Result<Option<String>, JsValue> {
    edit.map(|e| e.to_json().map_err(js_err)).transpose()
}

/// JavaScript-friendly wrapper for EditorSession
#[wasm_bindgen]
pub struct WasmEditorSession {
    inner: EditorSession,
}

#[wasm_bindgen]
impl WasmEditorSession {
    /// Create a session from config JSON and document-init JSON
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, init_json: &str) -> Result<WasmEditorSession, JsValue> {
        let config = SessionConfig::from_json(config_json).map_err(js_err)?;
        let init = DocumentInit::from_json(init_json).map_err(js_err)?;
        Ok(Self {
            inner: EditorSession::new(config, init),
        })
    }

    /// Local text changed; returns the outbound edit JSON to publish, if any
    #[wasm_bindgen(js_name = localChange)]
    pub fn local_change(&mut self, text: String, cursor: usize) -> Result<Option<String>, JsValue> {
        let edit = self.inner.local_change(&text, cursor).map_err(js_err)?;
        edit_to_json(edit)
    }

    /// Remote broadcast JSON arrived; returns false for our own echoes.
    /// On error the caller must refetch and call `resync`.
    #[wasm_bindgen(js_name = receiveRemote)]
    pub fn receive_remote(&mut self, message_json: &str) -> Result<bool, JsValue> {
        let edit = RemoteEdit::from_json(message_json).map_err(js_err)?;
        self.inner.receive_remote(&edit).map_err(js_err)
    }

    /// Server acknowledged; returns the next outbound edit JSON, if any
    #[wasm_bindgen(js_name = receiveAck)]
    pub fn receive_ack(&mut self) -> Result<Option<String>, JsValue> {
        let edit = self.inner.receive_ack().map_err(js_err)?;
        edit_to_json(edit)
    }

    /// Reset to a freshly fetched document
    #[wasm_bindgen(js_name = resync)]
    pub fn resync(&mut self, init_json: &str) -> Result<(), JsValue> {
        let init = DocumentInit::from_json(init_json).map_err(js_err)?;
        self.inner.resync(init);
        Ok(())
    }

    #[wasm_bindgen(js_name = content)]
    pub fn content(&self) -> String {
        self.inner.content().to_string()
    }

    #[wasm_bindgen(js_name = cursor)]
    pub fn cursor(&self) -> usize {
        self.inner.cursor()
    }

    #[wasm_bindgen(js_name = setCursor)]
    pub fn set_cursor(&mut self, cursor: usize) {
        self.inner.set_cursor(cursor);
    }

    #[wasm_bindgen(js_name = revision)]
    pub fn revision(&self) -> f64 {
        self.inner.revision() as f64
    }

    /// "synced", "awaitingAck" or "awaitingAckBuffered"
    #[wasm_bindgen(js_name = state)]
    pub fn state(&self) -> String {
        match self.inner.state() {
            SyncState::Synced => "synced",
            SyncState::AwaitingAck => "awaitingAck",
            SyncState::AwaitingAckBuffered => "awaitingAckBuffered",
        }
        .to_string()
    }

    #[wasm_bindgen(js_name = getClientId)]
    pub fn get_client_id(&self) -> String {
        self.inner.config().client_id.clone()
    }
}

/// Diff two snapshots into an operation (JSON)
#[wasm_bindgen(js_name = generateOp)]
pub fn generate_op(old_text: &str, new_text: &str) -> Result<String, JsValue> {
    op_to_json(&crate::diff::generate_op(old_text, new_text))
}

/// Apply an operation (JSON) to text
#[wasm_bindgen(js_name = applyOp)]
pub fn apply_op(op_json: &str, text: &str) -> Result<String, JsValue> {
    parse_op(op_json)?.apply(text).map_err(js_err)
}

/// Compose two sequential operations (JSON)
#[wasm_bindgen(js_name = composeOps)]
pub fn compose_ops(first_json: &str, second_json: &str) -> Result<String, JsValue> {
    let composed = parse_op(first_json)?
        .compose(&parse_op(second_json)?)
        .map_err(js_err)?;
    op_to_json(&composed)
}

/// Transform two concurrent operations; returns `[aPrime, bPrime]` as JSON
#[wasm_bindgen(js_name = transformOps)]
pub fn transform_ops(a_json: &str, b_json: &str) -> Result<String, JsValue> {
    let (a_prime, b_prime) =
        crate::operation::transform(&parse_op(a_json)?, &parse_op(b_json)?).map_err(js_err)?;
    serde_json::to_string(&(a_prime, b_prime)).map_err(js_err)
}

/// Map a caret offset through an operation (JSON)
#[wasm_bindgen(js_name = transformCursor)]
pub fn transform_cursor(index: usize, op_json: &str) -> Result<usize, JsValue> {
    Ok(crate::cursor::transform_cursor(index, &parse_op(op_json)?))
}

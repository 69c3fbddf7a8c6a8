//! WASM bindings for OTKit
//!
//! This module provides JavaScript-friendly bindings for the OT engine and
//! the editor session.

pub mod bindings;
pub mod utils;

// Re-export main types
pub use bindings::WasmEditorSession;
pub use utils::init_panic_hook;

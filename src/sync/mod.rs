//! Client-side synchronization with a central sequencer
//!
//! - [`Client`]: the pending/buffer state machine
//! - [`EditorSession`]: document mirror, caret and client bundled per document

pub mod client;
pub mod session;

pub use client::{Client, SyncState};
pub use session::{EditorSession, SessionEvent};

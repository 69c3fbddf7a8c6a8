//! OTKit Core - Operational transformation for collaborative text editing
//!
//! This is the Rust core of OTKit, compiled to both native and WASM.
//! It implements:
//! - Text operations (retain / insert / delete) in canonical form
//! - `apply`, `invert`, `compose` and `transform` over operations
//! - A prefix/suffix diff turning two snapshots into an operation
//! - Caret mapping through operations
//! - The client pending/buffer state machine and an editor session around it
//! - The compact JSON wire encoding
//!
//! # Examples
//!
//! ```rust
//! use otkit_core::{generate_op, transform};
//!
//! // Two clients edit "hello" concurrently
//! let a = generate_op("hello", "hello!");
//! let b = generate_op("hello", "llo");
//!
//! let (a_prime, b_prime) = transform(&a, &b).unwrap();
//! let on_a = b_prime.apply(&a.apply("hello").unwrap()).unwrap();
//! let on_b = a_prime.apply(&b.apply("hello").unwrap()).unwrap();
//!
//! assert_eq!(on_a, "llo!");
//! assert_eq!(on_a, on_b);
//! ```

pub mod config;
pub mod cursor;
pub mod diff;
pub mod document;
pub mod error;
pub mod operation;
pub mod protocol;
pub mod sync;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for convenience
pub use config::SessionConfig;
pub use cursor::{index_to_row_col, transform_cursor, CursorPosition};
pub use diff::generate_op;
pub use document::Document;
pub use error::{OtError, Result};
pub use operation::{transform, transform_with_priority, InsertPriority, Operation, Step};
pub use sync::{Client, EditorSession, SessionEvent, SyncState};

/// Client identifier type
pub type ClientID = String;

/// Document identifier type
pub type DocumentID = String;

//! Error types for the OT engine and the client session

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, OtError>;

/// Errors raised by operation construction, the engine functions and the
/// client session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtError {
    /// Malformed step (zero or non-integral count, empty insert, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `apply` was given text whose length differs from the operation's base length,
    /// or a step read past the end of the text
    #[error("Operation base length {base_len} does not match text length {text_len}")]
    OperationLengthMismatch { base_len: usize, text_len: usize },

    /// A delete being inverted reaches past the end of the original text
    #[error("Cannot invert delete of {len} characters at offset {offset} (text length: {text_len})")]
    InvertRangeError {
        offset: usize,
        len: usize,
        text_len: usize,
    },

    /// `compose` precondition: first target length must equal second base length
    #[error("Cannot compose operations: target length {first_target} of the first operation differs from base length {second_base} of the second")]
    IncompatibleOperations {
        first_target: usize,
        second_base: usize,
    },

    #[error("Cannot compose operations: {0}")]
    ComposeUnderflow(&'static str),

    #[error("Cannot transform operations: {0}")]
    TransformUnderflow(&'static str),

    /// Server acknowledged while no operation was in flight
    #[error("Acknowledgement received with no operation in flight")]
    UnexpectedAck,

    /// Wire message could not be decoded or failed validation
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Error reported by the caller-supplied transport
    #[error("Transport error: {0}")]
    Transport(String),
}

impl OtError {
    /// Whether this error, raised while handling remote traffic, leaves the
    /// local mirror in an unknown state. Such errors are never recovered
    /// locally; the session refetches the document instead.
    pub fn requires_resync(&self) -> bool {
        !matches!(self, OtError::Transport(_))
    }
}

impl From<serde_json::Error> for OtError {
    fn from(err: serde_json::Error) -> Self {
        OtError::Protocol(err.to_string())
    }
}

//! Wire protocol: compact operation encoding, message shapes, transport seam
//!
//! All messages are JSON. Operations travel in the compact list encoding
//! described in [`wire`].

pub mod messages;
pub mod transport;
pub mod wire;

pub use messages::{DocumentInit, OutboundEdit, RemoteEdit};
pub use transport::Transport;
pub use wire::WireStep;

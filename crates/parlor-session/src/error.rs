//! Error types for the session layer.

use parlor_protocol::ClientId;

/// Errors that can occur during session management.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session exists for the given client. Happens when acting on a
    /// client that already disconnected.
    #[error("no session for client {0}")]
    NotFound(ClientId),
}

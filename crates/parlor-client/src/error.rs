//! Error types for the client connector.

use parlor_transport::TransportError;

/// Errors a connector caller can hit.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The underlying TCP connection failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The connection's background tasks have shut down; no more frames
    /// can be sent or received.
    #[error("connection closed")]
    Closed,
}

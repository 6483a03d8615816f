//! The per-connection session record.

use parlor_protocol::{ClientId, Frame};
use tokio::sync::mpsc;

/// The sending end of a connection's outbound frame queue.
///
/// Every frame addressed to a client is enqueued here; the connection's
/// writer task drains the queue FIFO onto the socket. That single drain
/// point is what keeps concurrent senders (a relay inside another client's
/// dispatch, the operator console) from interleaving bytes on one socket.
pub type OutboundSender = mpsc::UnboundedSender<Frame>;

/// The server's record of one connected client.
///
/// Created on accept, destroyed on disconnect. Room membership is not
/// stored here - the room directory's member index is the single source
/// of truth for "who is in which room".
#[derive(Debug)]
pub struct ClientSession {
    id: ClientId,
    /// Display name, if the client has set one via `name:`.
    pub name: Option<String>,
    outbound: OutboundSender,
}

impl ClientSession {
    pub(crate) fn new(id: ClientId, outbound: OutboundSender) -> Self {
        Self {
            id,
            name: None,
            outbound,
        }
    }

    /// The id assigned at connect time.
    pub fn id(&self) -> &ClientId {
        &self.id
    }

    /// Display name if set, else the id - what chat and console output
    /// call this client.
    pub fn tag(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }

    /// Enqueues a frame for this client's writer task.
    ///
    /// Silently drops the frame if the connection is already torn down -
    /// every send is fire-and-forget; losses surface only as an eventual
    /// disconnect.
    pub fn send(&self, frame: Frame) {
        if self.outbound.send(frame).is_err() {
            tracing::debug!(id = %self.id, "dropping frame for closed connection");
        }
    }
}

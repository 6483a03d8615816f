//! The connector: connection tasks plus typed command helpers.

use std::sync::Arc;

use parlor_protocol::commands::client;
use parlor_protocol::wire::{self, FrameDecoder};
use parlor_protocol::Frame;
use parlor_transport::{Connection, TcpConnection};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::ClientError;

/// A cheap, clonable handle for sending frames from another task while
/// the owning [`Client`] sits in a receive loop.
#[derive(Clone)]
pub struct FrameSender {
    outgoing: UnboundedSender<Frame>,
}

impl FrameSender {
    /// Sends one raw command frame.
    pub fn send(
        &self,
        command: &str,
        payload: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.outgoing
            .send(Frame::new(command, payload))
            .map_err(|_| ClientError::Closed)
    }
}

/// A connected relay client.
///
/// Two background tasks own the socket: a writer draining the outgoing
/// queue, and a reader feeding a [`FrameDecoder`] and forwarding every
/// complete frame to the inbound queue. Malformed fragments are logged
/// and skipped, same as on the server side. Dropping the `Client` aborts
/// both tasks, which releases the connection and closes the socket - the
/// server observes an ordinary EOF.
pub struct Client {
    outgoing: UnboundedSender<Frame>,
    incoming: UnboundedReceiver<Frame>,
    writer: JoinHandle<()>,
    reader: JoinHandle<()>,
}

impl Drop for Client {
    fn drop(&mut self) {
        self.writer.abort();
        self.reader.abort();
    }
}

impl Client {
    /// Connects to a relay server.
    pub async fn connect(addr: &str) -> Result<Self, ClientError> {
        let conn = Arc::new(TcpConnection::connect(addr).await?);

        let (outgoing_tx, mut outgoing_rx) = mpsc::unbounded_channel::<Frame>();
        let (incoming_tx, incoming_rx) = mpsc::unbounded_channel();

        let writer_conn = Arc::clone(&conn);
        let writer = tokio::spawn(async move {
            while let Some(frame) = outgoing_rx.recv().await {
                let bytes = match wire::encode(&frame) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping unencodable frame");
                        continue;
                    }
                };
                if writer_conn.send(&bytes).await.is_err() {
                    break;
                }
            }
        });

        let reader = tokio::spawn(async move {
            let mut decoder = FrameDecoder::new();
            loop {
                let chunk = match conn.recv().await {
                    Ok(Some(chunk)) => chunk,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::debug!(error = %e, "recv error");
                        break;
                    }
                };
                decoder.feed(&chunk);
                while let Some(decoded) = decoder.next_frame() {
                    match decoded {
                        Ok(frame) => {
                            if incoming_tx.send(frame).is_err() {
                                return; // client handle dropped
                            }
                        }
                        Err(e) => tracing::debug!(
                            error = %e,
                            "discarding malformed frame"
                        ),
                    }
                }
            }
        });

        Ok(Self {
            outgoing: outgoing_tx,
            incoming: incoming_rx,
            writer,
            reader,
        })
    }

    /// Sends one raw command frame.
    pub fn send(
        &self,
        command: &str,
        payload: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.outgoing
            .send(Frame::new(command, payload))
            .map_err(|_| ClientError::Closed)
    }

    /// Returns a send-only handle, detached from this client's lifetime
    /// borrows (dropping the `Client` still closes the connection).
    pub fn sender(&self) -> FrameSender {
        FrameSender {
            outgoing: self.outgoing.clone(),
        }
    }

    /// Receives the next frame from the server. `None` once the
    /// connection is gone and the queue is drained.
    pub async fn recv(&mut self) -> Option<Frame> {
        self.incoming.recv().await
    }

    /// Receives frames until one carries the given command, discarding
    /// the rest. `None` if the connection closes first.
    pub async fn recv_command(&mut self, command: &str) -> Option<Frame> {
        while let Some(frame) = self.recv().await {
            if frame.command == command {
                return Some(frame);
            }
        }
        None
    }

    // -- typed commands ---------------------------------------------------

    /// `room:<name>` - join or lazily create a room.
    pub fn join_room(&self, name: &str) -> Result<(), ClientError> {
        self.send(client::ROOM, name)
    }

    /// `uid:` - ask for the assigned id.
    pub fn request_uid(&self) -> Result<(), ClientError> {
        self.send(client::UID, "")
    }

    /// `name:<newname>` - set the display name.
    pub fn set_name(&self, name: &str) -> Result<(), ClientError> {
        self.send(client::NAME, name)
    }

    /// `get_rooms:` - ask for the room listing.
    pub fn request_rooms(&self) -> Result<(), ClientError> {
        self.send(client::GET_ROOMS, "")
    }

    /// `positions:<payload>` - send the board occupancy to the opponent.
    pub fn send_positions(&self, payload: &str) -> Result<(), ClientError> {
        self.send(client::POSITIONS, payload)
    }

    /// `move:<payload>` - send a move to the opponent.
    pub fn send_move(&self, payload: &str) -> Result<(), ClientError> {
        self.send(client::MOVE, payload)
    }

    /// `spawn_opponent:<payload>` - send a piece spawn to the opponent.
    pub fn spawn_opponent(&self, payload: &str) -> Result<(), ClientError> {
        self.send(client::SPAWN_OPPONENT, payload)
    }

    /// `ready:` - ask for the turn-start cue (host only).
    pub fn ready(&self) -> Result<(), ClientError> {
        self.send(client::READY, "")
    }

    /// `lost:` - concede the match.
    pub fn resign(&self) -> Result<(), ClientError> {
        self.send(client::LOST, "")
    }

    /// `exit_room:` - leave the current room.
    pub fn exit_room(&self) -> Result<(), ClientError> {
        self.send(client::EXIT_ROOM, "")
    }

    /// `a:<text>` - public chat.
    pub fn say(&self, text: &str) -> Result<(), ClientError> {
        self.send(client::SAY, text)
    }

    /// `w:<target> <text>` - whisper by id or display name.
    pub fn whisper(&self, target: &str, text: &str) -> Result<(), ClientError> {
        self.send(client::WHISPER, format!("{target} {text}"))
    }
}

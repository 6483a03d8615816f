//! Per-connection handler: registration, the receive loop, and teardown.
//!
//! Each accepted connection gets its own Tokio task running
//! [`handle_connection`], plus a writer task that owns the socket's send
//! path. The flow:
//!
//! 1. Register with the registry → fresh [`ClientId`], outbound channel
//! 2. Spawn the writer task (drains the channel FIFO onto the socket)
//! 3. Loop: recv chunk → feed decoder → dispatch each complete frame
//! 4. On EOF, socket error, or a panicking handler: the drop guard exits
//!    the room, removes the session, and the writer task winds down

use std::sync::Arc;

use parlor_protocol::wire::{self, FrameDecoder};
use parlor_protocol::ClientId;
use parlor_transport::{Connection, TcpConnection};
use tokio::sync::mpsc;

use crate::server::ServerState;

/// Drop guard that removes a client from the registry when its handler
/// task exits - by clean close, socket error, or panic alike. `Drop` is
/// synchronous, so the async removal is a fire-and-forget task.
///
/// Removing the session drops its outbound sender, which ends the writer
/// task's channel and lets it finish naturally.
struct ConnectionGuard {
    client_id: ClientId,
    state: Arc<ServerState>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let client_id = self.client_id.clone();
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            state.registry.lock().await.remove(&client_id);
            tracing::info!(%client_id, "client disconnected");
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: TcpConnection,
    state: Arc<ServerState>,
) {
    let conn = Arc::new(conn);
    let conn_id = conn.id();

    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel();
    let client_id = state.registry.lock().await.register(outbound_tx);
    tracing::info!(%conn_id, %client_id, "client connected");

    // Writer task: the only place bytes are written to this socket.
    let writer_conn = Arc::clone(&conn);
    tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
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

    let _guard = ConnectionGuard {
        client_id: client_id.clone(),
        state: Arc::clone(&state),
    };

    let mut decoder = FrameDecoder::new();
    loop {
        let chunk = match conn.recv().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => {
                tracing::debug!(%client_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%client_id, error = %e, "recv error");
                break;
            }
        };

        decoder.feed(&chunk);
        while let Some(decoded) = decoder.next_frame() {
            match decoded {
                Ok(frame) => {
                    let mut registry = state.registry.lock().await;
                    state.dispatcher.dispatch(&mut registry, &frame, &client_id);
                }
                Err(e) => {
                    // Framing errors cost the fragment, not the connection.
                    tracing::debug!(
                        %client_id,
                        error = %e,
                        "discarding malformed frame"
                    );
                }
            }
        }
    }

    // _guard drops here → registry removal fires.
}

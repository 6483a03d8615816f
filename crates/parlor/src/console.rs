//! The operator console: a stdin loop on the server process.
//!
//! Inspection commands print straight to stdout (this is an operator UI,
//! not a log stream); anything unrecognized is broadcast to every
//! connected client as an `info:` notification.

use std::sync::Arc;

use parlor_protocol::commands::server;
use parlor_protocol::Frame;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::ServerState;

/// Runs the console until the operator types `exit` (or stdin closes).
///
/// Commands: `exit`, `stats`, `names`, `rooms`; any other non-empty line
/// is broadcast.
pub async fn run(state: Arc<ServerState>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "exit" => break,
            "stats" => {
                let stats = state.registry().await.stats();
                println!("clients:{} rooms:{}", stats.clients, stats.rooms);
            }
            "names" => {
                let names = state.registry().await.names();
                println!("{}", names.join(", "));
            }
            "rooms" => {
                let summaries = state.registry().await.room_summaries();
                for room in summaries {
                    println!(
                        "[{}] {}/{} host:{} members:{:?}",
                        room.name,
                        room.occupants,
                        room.capacity,
                        room.host,
                        room.members,
                    );
                }
            }
            text => {
                state
                    .registry()
                    .await
                    .broadcast(Frame::new(server::INFO, text), None);
            }
        }
    }

    tracing::info!("console closed, shutting down");
    Ok(())
}

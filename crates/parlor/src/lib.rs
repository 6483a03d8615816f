//! # Parlor
//!
//! Session relay for a two-player networked board game.
//!
//! Parlor accepts TCP connections, assigns each one an opaque identity,
//! matches clients into named two-seat rooms, and forwards a small set of
//! typed text frames between the two room occupants with simple
//! turn-gating. It never interprets gameplay payloads - move legality
//! lives in the clients; the server is the meeting point and the wire.
//!
//! ```text
//! accept loop ──► connection handler ──► FrameDecoder ──► Dispatcher
//!                                                            │
//!                    outbound channels ◄── Registry ◄────────┘
//!                    (one writer task        (sessions + rooms,
//!                     per socket)             one mutex)
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use parlor::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ParlorError> {
//!     let server = Server::builder().bind("127.0.0.1:8888").build().await?;
//!     server.run().await
//! }
//! ```

mod config;
mod dispatch;
mod error;
mod handler;
mod handlers;
mod registry;
mod server;

pub mod console;

pub use config::ServerConfig;
pub use dispatch::{CommandHandler, Dispatcher};
pub use error::ParlorError;
pub use registry::{Registry, RegistryStats, RoomSummary};
pub use server::{Server, ServerBuilder, ServerState};

/// The handful of names almost every embedder needs.
pub mod prelude {
    pub use crate::{
        ParlorError, Server, ServerBuilder, ServerConfig, ServerState,
    };
    pub use parlor_protocol::{commands, ClientId, Frame};
}

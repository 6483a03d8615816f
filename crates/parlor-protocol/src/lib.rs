//! Wire protocol for Parlor.
//!
//! This crate defines the "language" that the game client and the relay
//! server speak:
//!
//! - **Types** ([`Frame`], [`ClientId`]) - the units that travel on the wire
//!   and the identity they are addressed by.
//! - **Wire format** ([`wire::encode`], [`wire::FrameDecoder`]) - how frames
//!   are laid out on a raw byte stream and reassembled from it.
//! - **Command names** ([`commands`]) - the shared catalog of command
//!   strings, so server and client never drift apart on spelling.
//! - **Errors** ([`ProtocolError`]) - what can go wrong while framing.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and session
//! (client identity). It doesn't know about sockets or rooms - it only
//! knows how to turn byte chunks into frames and back.
//!
//! ```text
//! Transport (bytes) → Protocol (Frame) → Dispatcher (named handler)
//! ```

mod error;
mod types;
pub mod commands;
pub mod wire;

pub use error::ProtocolError;
pub use types::{ClientId, Frame};

//! Connected-client tracking for Parlor.
//!
//! This crate owns the client half of the session registry:
//!
//! 1. **Identity assignment** - a fresh random [`ClientId`] per connection
//! 2. **Session tracking** - who is connected, under what display name
//! 3. **The send path** - each session holds the outbound channel its
//!    connection's writer task drains
//!
//! # Concurrency note
//!
//! [`SessionManager`] is NOT thread-safe by itself - it is a plain
//! `HashMap` owned by the server's registry and guarded by one mutex at
//! that higher level, together with the room directory, so that session
//! and room mutations can never interleave.
//!
//! [`ClientId`]: parlor_protocol::ClientId

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{ClientSession, OutboundSender};

//! Thin client connector for the Parlor relay.
//!
//! This is the network half of a game client, with no opinion about
//! rendering or input: connect, send typed commands, drain incoming
//! frames. The game front end (and the integration tests) decide what a
//! `room_ready:` or a relayed `move:` means.
//!
//! ```rust,no_run
//! use parlor_client::Client;
//!
//! # async fn run() -> Result<(), parlor_client::ClientError> {
//! let mut client = Client::connect("127.0.0.1:8888").await?;
//! client.join_room("alpha")?;
//! while let Some(frame) = client.recv().await {
//!     match frame.command.as_str() {
//!         "room_ready" => { /* both seats filled, set up the board */ }
//!         "move" => { /* opponent moved (or it's our turn) */ }
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod connector;
mod error;

pub use connector::{Client, FrameSender};
pub use error::ClientError;

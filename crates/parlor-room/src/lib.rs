//! Match rooms for Parlor.
//!
//! A room is a named, capacity-bounded grouping of client ids - one match
//! between two seats. Rooms are plain data: every mutation happens under
//! the server registry's single lock, so there is no per-room task and no
//! per-room channel.
//!
//! # Key types
//!
//! - [`Room`] - members in join order, capacity, host
//! - [`RoomDirectory`] - name → room with create-on-miss, plus the
//!   member → room index that enforces "one room at a time"
//! - [`JoinOutcome`] - what a join attempt did (joins never fail, they
//!   resolve to an outcome)

mod directory;
mod room;

pub use directory::{JoinOutcome, RoomDirectory};
pub use room::{Room, MATCH_CAPACITY};

//! Core protocol types: client identity and the frame unit.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClientId
// ---------------------------------------------------------------------------

/// A server-assigned identifier for one connected client.
///
/// Generated at connect time and stable for the connection's lifetime.
/// All identity comparisons go through this token - never through socket
/// or connection object identity - so the underlying connection resource
/// does not need to be comparable at all.
///
/// The inner value is an opaque lowercase-hex string (7 characters as
/// issued by the session layer). `#[serde(transparent)]` keeps it a plain
/// string in any serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Wraps a raw id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One discrete command + payload unit on the wire.
///
/// A frame with an empty payload is valid - `ready:` and `uid:` are
/// payload-less commands. The framing rules (which characters a command
/// or payload may contain) are enforced by [`wire::encode`](crate::wire::encode),
/// not by this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The command name, e.g. `room` or `move`.
    pub command: String,
    /// The raw payload text. Opaque to the relay; only the game client
    /// interprets it.
    pub payload: String,
}

impl Frame {
    /// Creates a frame from a command and payload.
    pub fn new(command: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            payload: payload.into(),
        }
    }

    /// Creates a payload-less frame.
    pub fn bare(command: impl Into<String>) -> Self {
        Self::new(command, "")
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.command, self.payload)
    }
}

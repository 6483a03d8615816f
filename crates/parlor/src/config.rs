//! Server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a relay server.
///
/// `#[serde(default)]` lets a config file specify only the fields it
/// cares about; everything else keeps its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the accept loop binds to.
    pub bind_addr: String,

    /// Seat count for rooms created by `room:` joins. The gameplay relay
    /// only operates in rooms of exactly 2 seats, so anything else turns
    /// joined rooms into plain chat lobbies.
    pub room_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8888".to_string(),
            room_capacity: parlor_room::MATCH_CAPACITY,
        }
    }
}

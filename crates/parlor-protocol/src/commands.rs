//! The shared command catalog.
//!
//! Both sides of the wire address handlers by these names. Keeping them as
//! constants in one place means a renamed command breaks at compile time
//! instead of silently falling into the unknown-command path.

/// Commands a client sends to the relay server.
pub mod client {
    /// `room:<name>` - join (or lazily create) the named room.
    pub const ROOM: &str = "room";
    /// `uid:` - ask for the id assigned at connect time.
    pub const UID: &str = "uid";
    /// `name:<newname>` - set the display name.
    pub const NAME: &str = "name";
    /// `get_rooms:` - ask for the live room list.
    pub const GET_ROOMS: &str = "get_rooms";
    /// `positions:<serialized board occupancy>` - relayed to the opponent.
    pub const POSITIONS: &str = "positions";
    /// `move:<fromX>,<fromY>-><toX>,<toY>` - relayed to the opponent.
    pub const MOVE: &str = "move";
    /// `spawn_opponent:<piecename>-><x>,<y>` - relayed to the opponent.
    pub const SPAWN_OPPONENT: &str = "spawn_opponent";
    /// `ready:` - host-only turn-start trigger.
    pub const READY: &str = "ready";
    /// `lost:` - the sender concedes the match.
    pub const LOST: &str = "lost";
    /// `exit_room:` - leave the current room.
    pub const EXIT_ROOM: &str = "exit_room";
    /// `a:<text>` - public chat broadcast.
    pub const SAY: &str = "a";
    /// `w:<target> <text>` - whisper to a client by id or name.
    pub const WHISPER: &str = "w";
}

/// Commands the relay server sends to a client.
pub mod server {
    /// `uid:<id>` - the sender's assigned id.
    pub const UID: &str = "uid";
    /// `name:<name>` - display-name change confirmation.
    pub const NAME: &str = "name";
    /// `room:<name>` - room-join confirmation.
    pub const ROOM: &str = "room";
    /// `rooms:<comma-separated "name count/max" entries>` - room list.
    pub const ROOMS: &str = "rooms";
    /// `info:<text>` - user-visible notification.
    pub const INFO: &str = "info";
    /// `room_ready:` - both seats filled; the match may start.
    pub const ROOM_READY: &str = "room_ready";
    /// `move:` with empty payload is the turn-start cue; with a payload it
    /// is an opponent move being relayed.
    pub const MOVE: &str = "move";
    /// `positions:<payload>` - relayed board occupancy.
    pub const POSITIONS: &str = "positions";
    /// `spawn_opponent:<payload>` - relayed spawn.
    pub const SPAWN_OPPONENT: &str = "spawn_opponent";
    /// `won:` - the opponent conceded.
    pub const WON: &str = "won";
    /// `lost:` - concession acknowledged.
    pub const LOST: &str = "lost";
    /// `relay:<tag>: <text>` - public chat from another client.
    pub const RELAY: &str = "relay";
}

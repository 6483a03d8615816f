//! The relay's command handlers.
//!
//! Thin shims from the wire catalog onto [`Registry`] operations - the
//! dispatch table in [`Dispatcher::with_game_commands`] is the single
//! place they are wired to names.
//!
//! [`Dispatcher::with_game_commands`]: crate::Dispatcher::with_game_commands

use parlor_protocol::commands::server;
use parlor_protocol::ClientId;

use crate::Registry;

/// `room:<name>` - join or lazily create the named room.
pub fn join_room(registry: &mut Registry, payload: &str, origin: &ClientId) {
    registry.join_room(origin, payload);
}

/// `uid:` - reply with the id assigned at connect time.
pub fn request_uid(registry: &mut Registry, _payload: &str, origin: &ClientId) {
    registry.send_uid(origin);
}

/// `name:<newname>` - set the display name.
pub fn set_name(registry: &mut Registry, payload: &str, origin: &ClientId) {
    registry.set_name(origin, payload);
}

/// `get_rooms:` - reply with the live room listing.
pub fn request_rooms(
    registry: &mut Registry,
    _payload: &str,
    origin: &ClientId,
) {
    registry.send_room_list(origin);
}

/// `positions:<payload>` - relay the board occupancy to the opponent.
pub fn relay_positions(
    registry: &mut Registry,
    payload: &str,
    origin: &ClientId,
) {
    registry.relay_to_opponent(origin, server::POSITIONS, payload);
}

/// `move:<payload>` - relay a move to the opponent.
pub fn relay_move(registry: &mut Registry, payload: &str, origin: &ClientId) {
    registry.relay_to_opponent(origin, server::MOVE, payload);
}

/// `spawn_opponent:<payload>` - relay a piece spawn to the opponent.
pub fn relay_spawn(registry: &mut Registry, payload: &str, origin: &ClientId) {
    registry.relay_to_opponent(origin, server::SPAWN_OPPONENT, payload);
}

/// `ready:` - host-only turn-start trigger.
pub fn ready(registry: &mut Registry, _payload: &str, origin: &ClientId) {
    registry.turn_start(origin);
}

/// `lost:` - the sender concedes; the opponent is declared winner.
pub fn lost(registry: &mut Registry, _payload: &str, origin: &ClientId) {
    registry.declare_loss(origin);
}

/// `exit_room:` - leave the current room.
pub fn exit_room(registry: &mut Registry, _payload: &str, origin: &ClientId) {
    registry.exit_room(origin);
}

/// `a:<text>` - public chat to everyone else.
pub fn say(registry: &mut Registry, payload: &str, origin: &ClientId) {
    registry.say(origin, payload);
}

/// `w:<target> <text>` - whisper by id or display name.
pub fn whisper(registry: &mut Registry, payload: &str, origin: &ClientId) {
    registry.whisper(origin, payload);
}

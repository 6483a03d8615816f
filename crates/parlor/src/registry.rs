//! The session registry: all connected clients, all live rooms, and every
//! operation that mutates or fans out over them.
//!
//! One instance lives behind one `tokio::sync::Mutex` for the whole
//! process. Every mutation - register, join, leave, rename, disconnect -
//! happens inside that lock, which is the synchronization the reference
//! design left out. Nothing here awaits: sends are non-blocking enqueues
//! onto per-connection outbound channels, so the lock is never held across
//! a suspension point.

use parlor_protocol::commands::server;
use parlor_protocol::{ClientId, Frame};
use parlor_room::{JoinOutcome, RoomDirectory};
use parlor_session::{OutboundSender, SessionManager};

use crate::ServerConfig;

/// Connected-count and room-count, for the console's `stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of connected clients.
    pub clients: usize,
    /// Number of live rooms.
    pub rooms: usize,
}

/// One room's console view: occupancy plus resolved member tags.
#[derive(Debug, Clone)]
pub struct RoomSummary {
    /// Room name.
    pub name: String,
    /// Occupied seats.
    pub occupants: usize,
    /// Total seats.
    pub capacity: usize,
    /// Tag of the member with turn-start authority.
    pub host: String,
    /// Tags of all members, in join order.
    pub members: Vec<String>,
}

/// Process-wide state: sessions plus rooms, mutated only under one lock.
#[derive(Debug)]
pub struct Registry {
    sessions: SessionManager,
    rooms: RoomDirectory,
}

impl Registry {
    /// Creates an empty registry sized by the server config.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: SessionManager::new(),
            rooms: RoomDirectory::new(config.room_capacity),
        }
    }

    // -- connection lifecycle ---------------------------------------------

    /// Adds a new connection to the connected set and assigns it a fresh
    /// id.
    pub fn register(&mut self, outbound: OutboundSender) -> ClientId {
        self.sessions.register(outbound)
    }

    /// Disconnect path: leaves the current room (deleting it if emptied),
    /// then removes the session.
    pub fn remove(&mut self, id: &ClientId) {
        self.rooms.leave(id);
        if self.sessions.remove(id).is_err() {
            tracing::debug!(%id, "disconnect for unknown client");
        }
    }

    // -- room membership --------------------------------------------------

    /// Seats the client in the named room, creating it on first use.
    ///
    /// The full join flow: a full room or a repeated join gets an `info:`
    /// reply and changes nothing; a client seated elsewhere is moved; a
    /// successful join is confirmed with `room:<name>`, and the join that
    /// fills the second seat broadcasts `room_ready:` to both members -
    /// the sole trigger that starts a match.
    pub fn join_room(&mut self, origin: &ClientId, name: &str) {
        match self.rooms.join(origin, name) {
            JoinOutcome::Full => {
                self.send_to(origin, Frame::new(server::INFO, "room is full"));
            }
            JoinOutcome::AlreadyInRoom => {
                self.send_to(
                    origin,
                    Frame::new(server::INFO, "you are already in this room"),
                );
            }
            JoinOutcome::Joined { became_full } => {
                self.send_to(origin, Frame::new(server::ROOM, name));
                if became_full {
                    self.room_broadcast(
                        name,
                        Frame::bare(server::ROOM_READY),
                        None,
                    );
                }
            }
        }
    }

    /// Vacates the client's seat, if any. Idempotent.
    pub fn exit_room(&mut self, origin: &ClientId) {
        self.rooms.leave(origin);
    }

    // -- identity ---------------------------------------------------------

    /// Replies with the id assigned at connect time.
    pub fn send_uid(&self, origin: &ClientId) {
        self.send_to(origin, Frame::new(server::UID, origin.as_str()));
    }

    /// Sets the display name and echoes the change back.
    pub fn set_name(&mut self, origin: &ClientId, name: &str) {
        if self.sessions.set_name(origin, name).is_ok() {
            self.send_to(origin, Frame::new(server::NAME, name));
        }
    }

    // -- lobby ------------------------------------------------------------

    /// Replies with the room list: `rooms:name count/max,...`.
    pub fn send_room_list(&self, origin: &ClientId) {
        let listing = self
            .rooms
            .rooms()
            .map(|room| room.info())
            .collect::<Vec<_>>()
            .join(",");
        self.send_to(origin, Frame::new(server::ROOMS, listing));
    }

    /// Public chat: every other client receives `relay:<tag>: <text>`.
    pub fn say(&self, origin: &ClientId, text: &str) {
        let Some(sender) = self.sessions.get(origin) else {
            return;
        };
        let tag = sender.tag();
        tracing::info!(%origin, tag, text, "chat broadcast");
        self.broadcast(
            Frame::new(server::RELAY, format!("{tag}: {text}")),
            Some(origin),
        );
    }

    /// Whisper: `<target> <text>`, target matched against id or display
    /// name. Every match receives `info:<sender tag> says: <text>`. A
    /// payload without a target, or a target nobody wears, goes nowhere.
    pub fn whisper(&self, origin: &ClientId, payload: &str) {
        let Some((target, text)) = payload.split_once(' ') else {
            return;
        };
        let Some(sender) = self.sessions.get(origin) else {
            return;
        };
        let message = format!("{} says: {}", sender.tag(), text.trim());
        for session in self.sessions.find_by_tag(target) {
            session.send(Frame::new(server::INFO, message.clone()));
        }
    }

    // -- gameplay relay ---------------------------------------------------

    /// Forwards a payload verbatim to the other occupant of the sender's
    /// match room. Stray frames - no room, or a room still waiting for
    /// its second seat - are silently dropped.
    pub fn relay_to_opponent(
        &self,
        origin: &ClientId,
        command: &str,
        payload: &str,
    ) {
        let Some(room) = self.match_room(origin) else {
            return;
        };
        for member in room.members() {
            if member != origin {
                self.send_to(member, Frame::new(command, payload));
            }
        }
    }

    /// Host-only turn-start: the host asking `ready:` receives the
    /// `move:` cue (empty payload) and plays first. Non-host callers are
    /// silently ignored.
    pub fn turn_start(&self, origin: &ClientId) {
        let Some(room) = self.match_room(origin) else {
            return;
        };
        if room.host() == Some(origin) {
            self.send_to(origin, Frame::bare(server::MOVE));
        }
    }

    /// Client-asserted match outcome: the sender concedes and is told
    /// `lost:`; the other occupant is told `won:`. The server never
    /// evaluates a win condition itself.
    pub fn declare_loss(&self, origin: &ClientId) {
        let Some(room) = self.match_room(origin) else {
            return;
        };
        for member in room.members() {
            let frame = if member == origin {
                Frame::bare(server::LOST)
            } else {
                Frame::bare(server::WON)
            };
            self.send_to(member, frame);
        }
    }

    /// The sender's room, but only when it is a full two-seat match -
    /// the gate every gameplay command passes through.
    fn match_room(&self, origin: &ClientId) -> Option<&parlor_room::Room> {
        self.rooms
            .room_of(origin)
            .filter(|room| room.is_full() && room.is_match())
    }

    // -- fan-out ----------------------------------------------------------

    /// Enqueues a frame for one client. A closed connection drops it.
    pub fn send_to(&self, id: &ClientId, frame: Frame) {
        if let Some(session) = self.sessions.get(id) {
            session.send(frame);
        }
    }

    /// Sends to every connected client except `exclude`.
    pub fn broadcast(&self, frame: Frame, exclude: Option<&ClientId>) {
        for session in self.sessions.iter() {
            if Some(session.id()) != exclude {
                session.send(frame.clone());
            }
        }
    }

    /// Sends to every member of the named room except `exclude`.
    pub fn room_broadcast(
        &self,
        room_name: &str,
        frame: Frame,
        exclude: Option<&ClientId>,
    ) {
        let Some(room) = self.rooms.get(room_name) else {
            return;
        };
        for member in room.members() {
            if Some(member) != exclude {
                self.send_to(member, frame.clone());
            }
        }
    }

    // -- console views ----------------------------------------------------

    /// Connected-count and room-count.
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            clients: self.sessions.len(),
            rooms: self.rooms.len(),
        }
    }

    /// All known display names.
    pub fn names(&self) -> Vec<String> {
        self.sessions.names()
    }

    /// Per-room console summaries with member tags resolved.
    pub fn room_summaries(&self) -> Vec<RoomSummary> {
        self.rooms
            .rooms()
            .map(|room| {
                let tag_of = |id: &ClientId| {
                    self.sessions
                        .get(id)
                        .map(|s| s.tag().to_string())
                        .unwrap_or_else(|| id.to_string())
                };
                RoomSummary {
                    name: room.name().to_string(),
                    occupants: room.len(),
                    capacity: room.capacity(),
                    host: room.host().map(&tag_of).unwrap_or_default(),
                    members: room.members().iter().map(&tag_of).collect(),
                }
            })
            .collect()
    }
}

// =========================================================================
// Tests
// =========================================================================

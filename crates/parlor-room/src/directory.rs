//! The room directory: name → room, with create-on-miss joins.

use std::collections::HashMap;

use parlor_protocol::ClientId;

use crate::Room;

/// What a join attempt did.
///
/// Joining never fails - a full room and a repeated join are ordinary
/// outcomes the caller answers with an informational reply, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The client was seated.
    Joined {
        /// `true` exactly when this join filled the last seat - the one
        /// transition that triggers the `room_ready:` broadcast.
        became_full: bool,
    },
    /// The client already occupies a seat in this exact room; nothing
    /// changed.
    AlreadyInRoom,
    /// Every seat is taken; nothing changed.
    Full,
}

/// All live rooms, keyed by name, plus the member index.
///
/// Invariants, maintained by every operation here:
/// - a client is a member of at most one room (`membership` is the
///   authority);
/// - a room with zero members does not persist;
/// - lookup is by exact name, and name collisions always resolve to the
///   same room.
#[derive(Debug)]
pub struct RoomDirectory {
    rooms: HashMap<String, Room>,
    membership: HashMap<ClientId, String>,
    capacity: usize,
}

impl RoomDirectory {
    /// Creates an empty directory whose rooms seat `capacity` clients.
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            membership: HashMap::new(),
            capacity,
        }
    }

    /// Looks up a room by exact name.
    pub fn get(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    /// Returns the named room, creating it empty on first use. Name
    /// collisions always resolve to the same room. Plain map lookup, no
    /// memoization: a cached lookup would go stale the moment an emptied
    /// room is deleted.
    pub fn get_or_create(&mut self, name: &str) -> &mut Room {
        self.rooms.entry(name.to_string()).or_insert_with(|| {
            tracing::info!(room = name, "room created");
            Room::new(name, self.capacity)
        })
    }

    /// Returns the room the client currently occupies, if any.
    pub fn room_of(&self, id: &ClientId) -> Option<&Room> {
        let name = self.membership.get(id)?;
        self.rooms.get(name)
    }

    /// Seats a client in the named room, creating the room on first use.
    ///
    /// A client already seated elsewhere is moved: it leaves its old room
    /// first (deleting it if that empties it), then takes the new seat.
    /// The fullness check happens before the move, so a refused join
    /// leaves the client exactly where it was.
    pub fn join(&mut self, id: &ClientId, name: &str) -> JoinOutcome {
        let room = self.get_or_create(name);

        // Fullness wins over membership: re-joining a full room you are
        // already seated in still reads as "room is full".
        if room.is_full() {
            return JoinOutcome::Full;
        }
        if room.contains(id) {
            return JoinOutcome::AlreadyInRoom;
        }

        if self.membership.contains_key(id) {
            self.leave(id);
        }

        let room = self
            .rooms
            .get_mut(name)
            .expect("room inserted above");
        room.add(id.clone());
        let became_full = room.is_full();
        self.membership.insert(id.clone(), name.to_string());
        tracing::info!(%id, room = name, "client joined room");

        JoinOutcome::Joined { became_full }
    }

    /// Vacates the client's seat, deleting the room if it empties.
    ///
    /// Returns the name of the room left, or `None` if the client had no
    /// room (idempotent).
    pub fn leave(&mut self, id: &ClientId) -> Option<String> {
        let name = self.membership.remove(id)?;
        if let Some(room) = self.rooms.get_mut(&name) {
            room.remove(id);
            if room.is_empty() {
                self.rooms.remove(&name);
                tracing::info!(room = %name, "empty room deleted");
            }
        }
        tracing::info!(%id, room = %name, "client left room");
        Some(name)
    }

    /// Iterates over all live rooms.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Returns the number of live rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if no rooms are live.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================

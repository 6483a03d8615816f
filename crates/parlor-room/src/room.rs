//! A single match room.

use parlor_protocol::ClientId;

/// Seat count of a 1v1 match room. Relay commands only operate in rooms
/// of exactly this capacity.
pub const MATCH_CAPACITY: usize = 2;

/// A named, capacity-bounded set of clients.
///
/// Membership order is join order; the first (oldest) member is the host
/// unless one was assigned explicitly. The implicit lifecycle, derived
/// from the member count:
///
/// ```text
/// empty → partial (1) → full (2) → (members leave) → partial / empty
/// ```
///
/// The partial → full transition is the only one the server announces
/// (`room_ready:`); everything else is silent. Invariant:
/// `members.len() <= capacity`, enforced by [`RoomDirectory`] checking
/// fullness before every add.
///
/// [`RoomDirectory`]: crate::RoomDirectory
#[derive(Debug, Clone)]
pub struct Room {
    name: String,
    members: Vec<ClientId>,
    capacity: usize,
    host: Option<ClientId>,
}

impl Room {
    /// Creates an empty room.
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            members: Vec::with_capacity(capacity),
            capacity,
            host: None,
        }
    }

    /// The room's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in join order.
    pub fn members(&self) -> &[ClientId] {
        &self.members
    }

    /// Number of occupied seats.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Maximum number of seats.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if no seats are occupied.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if every seat is occupied.
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    /// Returns `true` if this is a 1v1 match room - the only kind the
    /// gameplay relay operates on.
    pub fn is_match(&self) -> bool {
        self.capacity == MATCH_CAPACITY
    }

    /// Returns `true` if the client occupies a seat here.
    pub fn contains(&self, id: &ClientId) -> bool {
        self.members.contains(id)
    }

    /// The member with turn-start authority: the explicitly assigned host,
    /// else the oldest member. `None` only for an empty room. If the host
    /// leaves, authority falls back to the oldest remaining member.
    pub fn host(&self) -> Option<&ClientId> {
        self.host.as_ref().or_else(|| self.members.first())
    }

    /// Assigns the host explicitly. The id must be a member.
    pub fn set_host(&mut self, id: &ClientId) -> bool {
        if self.contains(id) {
            self.host = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// `"name count/max"` - the entry format of the `rooms:` listing.
    pub fn info(&self) -> String {
        format!("{} {}/{}", self.name, self.members.len(), self.capacity)
    }

    /// Seats the client. Caller must have checked fullness; a full room
    /// refuses the add.
    pub(crate) fn add(&mut self, id: ClientId) -> bool {
        if self.is_full() || self.contains(&id) {
            return false;
        }
        self.members.push(id);
        true
    }

    /// Vacates the client's seat. Clears an explicit host assignment if
    /// the host is the one leaving.
    pub(crate) fn remove(&mut self, id: &ClientId) -> bool {
        let Some(pos) = self.members.iter().position(|m| m == id) else {
            return false;
        };
        self.members.remove(pos);
        if self.host.as_ref() == Some(id) {
            self.host = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> ClientId {
        ClientId::new(s)
    }

    #[test]
    fn test_new_room_is_empty_and_hostless() {
        let room = Room::new("alpha", MATCH_CAPACITY);
        assert!(room.is_empty());
        assert!(!room.is_full());
        assert_eq!(room.host(), None);
    }

    #[test]
    fn test_add_two_members_fills_a_match_room() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        assert!(room.add(cid("aaaaaaa")));
        assert!(!room.is_full());
        assert!(room.add(cid("bbbbbbb")));
        assert!(room.is_full());
    }

    #[test]
    fn test_add_to_full_room_is_refused() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        room.add(cid("aaaaaaa"));
        room.add(cid("bbbbbbb"));
        assert!(!room.add(cid("ccccccc")));
        assert_eq!(room.len(), 2);
    }

    #[test]
    fn test_add_same_member_twice_is_refused() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        room.add(cid("aaaaaaa"));
        assert!(!room.add(cid("aaaaaaa")));
        assert_eq!(room.len(), 1);
    }

    #[test]
    fn test_host_defaults_to_oldest_member() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        room.add(cid("aaaaaaa"));
        room.add(cid("bbbbbbb"));
        assert_eq!(room.host(), Some(&cid("aaaaaaa")));
    }

    #[test]
    fn test_host_falls_back_when_host_leaves() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        room.add(cid("aaaaaaa"));
        room.add(cid("bbbbbbb"));
        room.remove(&cid("aaaaaaa"));
        assert_eq!(room.host(), Some(&cid("bbbbbbb")));
    }

    #[test]
    fn test_explicit_host_survives_other_members_leaving() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        room.add(cid("aaaaaaa"));
        room.add(cid("bbbbbbb"));
        assert!(room.set_host(&cid("bbbbbbb")));
        room.remove(&cid("aaaaaaa"));
        assert_eq!(room.host(), Some(&cid("bbbbbbb")));
    }

    #[test]
    fn test_explicit_host_cleared_when_host_leaves() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        room.add(cid("aaaaaaa"));
        room.add(cid("bbbbbbb"));
        room.set_host(&cid("bbbbbbb"));
        room.remove(&cid("bbbbbbb"));
        // Fallback to oldest remaining member.
        assert_eq!(room.host(), Some(&cid("aaaaaaa")));
    }

    #[test]
    fn test_set_host_rejects_non_member() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        room.add(cid("aaaaaaa"));
        assert!(!room.set_host(&cid("zzzzzzz")));
    }

    #[test]
    fn test_remove_unknown_member_is_noop() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        room.add(cid("aaaaaaa"));
        assert!(!room.remove(&cid("zzzzzzz")));
        assert_eq!(room.len(), 1);
    }

    #[test]
    fn test_info_format() {
        let mut room = Room::new("alpha", MATCH_CAPACITY);
        room.add(cid("aaaaaaa"));
        assert_eq!(room.info(), "alpha 1/2");
    }

    #[test]
    fn test_is_match_only_for_two_seat_rooms() {
        assert!(Room::new("alpha", 2).is_match());
        assert!(!Room::new("hall", 10).is_match());
    }
}

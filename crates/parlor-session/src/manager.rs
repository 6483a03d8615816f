//! The session manager: tracks all connected clients.
//!
//! Responsible for:
//! - Assigning a fresh random id to each accepted connection
//! - Tracking display names
//! - Resolving whisper targets (by id or name)
//! - Removing clients on disconnect

use std::collections::HashMap;

use parlor_protocol::ClientId;
use rand::Rng;

use crate::{ClientSession, OutboundSender, SessionError};

/// Length of a generated client id, in hex characters.
const ID_LEN: usize = 7;

/// Tracks every connected client, keyed by id.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<ClientId, ClientSession>,
}

impl SessionManager {
    /// Creates a new, empty session manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection: generates a fresh unique id, stores the
    /// session, and returns the id.
    pub fn register(&mut self, outbound: OutboundSender) -> ClientId {
        let id = loop {
            let candidate = generate_id();
            if !self.sessions.contains_key(&candidate) {
                break candidate;
            }
        };

        self.sessions
            .insert(id.clone(), ClientSession::new(id.clone(), outbound));
        tracing::info!(%id, "client registered");
        id
    }

    /// Removes a client's session, returning it for final use.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if the client was never
    /// registered (or already removed).
    pub fn remove(
        &mut self,
        id: &ClientId,
    ) -> Result<ClientSession, SessionError> {
        let session = self
            .sessions
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;
        tracing::info!(%id, "client removed");
        Ok(session)
    }

    /// Sets a client's display name.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] for an unknown client.
    pub fn set_name(
        &mut self,
        id: &ClientId,
        name: &str,
    ) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;
        session.name = Some(name.to_string());
        Ok(())
    }

    /// Looks up a session by client id.
    pub fn get(&self, id: &ClientId) -> Option<&ClientSession> {
        self.sessions.get(id)
    }

    /// Returns every session whose id or display name equals `target` -
    /// the whisper lookup. Ids are unique but names are not, so this can
    /// match more than one session.
    pub fn find_by_tag<'a>(
        &'a self,
        target: &'a str,
    ) -> impl Iterator<Item = &'a ClientSession> {
        self.sessions.values().filter(move |session| {
            session.id().as_str() == target
                || session.name.as_deref() == Some(target)
        })
    }

    /// Iterates over all connected sessions.
    pub fn iter(&self) -> impl Iterator<Item = &ClientSession> {
        self.sessions.values()
    }

    /// Returns the display names of every client that set one.
    pub fn names(&self) -> Vec<String> {
        self.sessions
            .values()
            .filter_map(|session| session.name.clone())
            .collect()
    }

    /// Returns the number of connected clients.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no clients are connected.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Generates a random 7-character lowercase-hex id.
///
/// Short enough to type into a whisper, random enough that the manager's
/// collision retry loop essentially never spins.
fn generate_id() -> ClientId {
    let mut rng = rand::rng();
    let bytes: [u8; 4] = rng.random();
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    ClientId::new(&hex[..ID_LEN])
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_protocol::Frame;
    use tokio::sync::mpsc;

    fn manager_with_one() -> (SessionManager, ClientId, mpsc::UnboundedReceiver<Frame>) {
        let mut mgr = SessionManager::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let id = mgr.register(tx);
        (mgr, id, rx)
    }

    // =====================================================================
    // register()
    // =====================================================================

    #[test]
    fn test_register_assigns_seven_hex_chars() {
        let (_mgr, id, _rx) = manager_with_one();
        assert_eq!(id.as_str().len(), 7);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_register_multiple_clients_get_unique_ids() {
        let mut mgr = SessionManager::new();
        let mut ids = std::collections::HashSet::new();
        for _ in 0..50 {
            let (tx, _rx) = mpsc::unbounded_channel();
            // _rx dropped: sessions with closed receivers must still register.
            ids.insert(mgr.register(tx));
        }
        assert_eq!(ids.len(), 50);
        assert_eq!(mgr.len(), 50);
    }

    // =====================================================================
    // tag() / set_name()
    // =====================================================================

    #[test]
    fn test_tag_falls_back_to_id_when_unnamed() {
        let (mgr, id, _rx) = manager_with_one();
        assert_eq!(mgr.get(&id).unwrap().tag(), id.as_str());
    }

    #[test]
    fn test_set_name_changes_tag() {
        let (mut mgr, id, _rx) = manager_with_one();
        mgr.set_name(&id, "ann").expect("known client");
        assert_eq!(mgr.get(&id).unwrap().tag(), "ann");
    }

    #[test]
    fn test_set_name_unknown_client_returns_not_found() {
        let mut mgr = SessionManager::new();
        let ghost = ClientId::new("0000000");
        assert!(matches!(
            mgr.set_name(&ghost, "ann"),
            Err(SessionError::NotFound(id)) if id == ghost
        ));
    }

    // =====================================================================
    // find_by_tag()
    // =====================================================================

    #[test]
    fn test_find_by_tag_matches_id() {
        let (mgr, id, _rx) = manager_with_one();
        let hits: Vec<_> = mgr.find_by_tag(id.as_str()).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), &id);
    }

    #[test]
    fn test_find_by_tag_matches_display_name() {
        let (mut mgr, id, _rx) = manager_with_one();
        mgr.set_name(&id, "ann").unwrap();
        let hits: Vec<_> = mgr.find_by_tag("ann").collect();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_find_by_tag_matches_every_name_collision() {
        // Names are not unique; a whisper to a shared name reaches all.
        let mut mgr = SessionManager::new();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let a = mgr.register(tx1);
        let b = mgr.register(tx2);
        mgr.set_name(&a, "ann").unwrap();
        mgr.set_name(&b, "ann").unwrap();

        assert_eq!(mgr.find_by_tag("ann").count(), 2);
    }

    #[test]
    fn test_find_by_tag_unknown_target_matches_nothing() {
        let (mgr, _id, _rx) = manager_with_one();
        assert_eq!(mgr.find_by_tag("nobody").count(), 0);
    }

    // =====================================================================
    // remove()
    // =====================================================================

    #[test]
    fn test_remove_frees_the_session() {
        let (mut mgr, id, _rx) = manager_with_one();
        mgr.remove(&id).expect("known client");
        assert!(mgr.get(&id).is_none());
        assert!(mgr.is_empty());
    }

    #[test]
    fn test_remove_twice_returns_not_found() {
        let (mut mgr, id, _rx) = manager_with_one();
        mgr.remove(&id).unwrap();
        assert!(matches!(
            mgr.remove(&id),
            Err(SessionError::NotFound(_))
        ));
    }

    // =====================================================================
    // send path
    // =====================================================================

    #[test]
    fn test_send_delivers_to_outbound_channel() {
        let (mgr, id, mut rx) = manager_with_one();
        mgr.get(&id).unwrap().send(Frame::new("info", "hello"));
        assert_eq!(rx.try_recv().unwrap(), Frame::new("info", "hello"));
    }

    #[test]
    fn test_send_after_receiver_dropped_does_not_panic() {
        let (mgr, id, rx) = manager_with_one();
        drop(rx);
        mgr.get(&id).unwrap().send(Frame::bare("uid"));
    }

    // =====================================================================
    // names()
    // =====================================================================

    #[test]
    fn test_names_skips_unnamed_clients() {
        let mut mgr = SessionManager::new();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let a = mgr.register(tx1);
        let _b = mgr.register(tx2);
        mgr.set_name(&a, "ann").unwrap();

        assert_eq!(mgr.names(), vec!["ann".to_string()]);
    }
}

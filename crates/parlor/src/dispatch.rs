//! The command dispatcher: a name → handler table.
//!
//! The reference design grew this table with decorators at import time;
//! here it is an explicit map, populated once before the accept loop
//! starts and read-only from then on, so every connection task can share
//! it without coordination.

use std::collections::HashMap;

use parlor_protocol::commands::client;
use parlor_protocol::{ClientId, Frame};

use crate::handlers;
use crate::Registry;

/// A command handler: runs with the registry lock held, so it may mutate
/// freely and must not block. Replies are non-blocking enqueues on the
/// recipients' outbound channels.
pub type CommandHandler = fn(&mut Registry, &str, &ClientId);

/// Routes decoded frames to named handlers.
#[derive(Debug, Default)]
pub struct Dispatcher {
    commands: HashMap<&'static str, CommandHandler>,
}

impl Dispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher with the full relay command catalog.
    pub fn with_game_commands() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(client::ROOM, handlers::join_room);
        dispatcher.register(client::UID, handlers::request_uid);
        dispatcher.register(client::NAME, handlers::set_name);
        dispatcher.register(client::GET_ROOMS, handlers::request_rooms);
        dispatcher.register(client::POSITIONS, handlers::relay_positions);
        dispatcher.register(client::MOVE, handlers::relay_move);
        dispatcher.register(client::SPAWN_OPPONENT, handlers::relay_spawn);
        dispatcher.register(client::READY, handlers::ready);
        dispatcher.register(client::LOST, handlers::lost);
        dispatcher.register(client::EXIT_ROOM, handlers::exit_room);
        dispatcher.register(client::SAY, handlers::say);
        dispatcher.register(client::WHISPER, handlers::whisper);
        dispatcher
    }

    /// Binds a handler to a command name. Last registration wins.
    pub fn register(&mut self, command: &'static str, handler: CommandHandler) {
        self.commands.insert(command, handler);
    }

    /// Invokes the handler for a frame's command. Unknown commands are
    /// logged and ignored - never fatal to the connection.
    pub fn dispatch(
        &self,
        registry: &mut Registry,
        frame: &Frame,
        origin: &ClientId,
    ) {
        match self.commands.get(frame.command.as_str()) {
            Some(handler) => handler(registry, &frame.payload, origin),
            None => tracing::debug!(
                %origin,
                command = %frame.command,
                "ignoring unknown command"
            ),
        }
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerConfig;
    use tokio::sync::mpsc;

    #[test]
    fn test_with_game_commands_covers_the_catalog() {
        let dispatcher = Dispatcher::with_game_commands();
        assert_eq!(dispatcher.len(), 12);
    }

    #[test]
    fn test_dispatch_routes_to_registered_handler() {
        let dispatcher = Dispatcher::with_game_commands();
        let mut registry = Registry::new(&ServerConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = registry.register(tx);

        dispatcher.dispatch(&mut registry, &Frame::bare("uid"), &id);

        assert_eq!(rx.try_recv().unwrap(), Frame::new("uid", id.as_str()));
    }

    #[test]
    fn test_dispatch_ignores_unknown_command() {
        let dispatcher = Dispatcher::with_game_commands();
        let mut registry = Registry::new(&ServerConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = registry.register(tx);

        dispatcher.dispatch(
            &mut registry,
            &Frame::new("teleport", "anywhere"),
            &id,
        );

        assert!(rx.try_recv().is_err(), "no reply for unknown command");
    }

    #[test]
    fn test_register_lets_embedders_override() {
        fn nop(_: &mut Registry, _: &str, _: &ClientId) {}
        let mut dispatcher = Dispatcher::new();
        dispatcher.register("ping", nop);
        assert_eq!(dispatcher.len(), 1);
    }
}

//! `Server` builder and accept loop.
//!
//! This is the entry point for running a relay. It ties the layers
//! together: transport → protocol → dispatcher → registry.

use std::sync::Arc;

use parlor_transport::{TcpTransport, Transport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::{Dispatcher, ParlorError, Registry, ServerConfig};

/// Shared server state handed to every connection handler task.
///
/// The registry mutex is the process-wide critical section: every
/// session/room mutation from any connection, and every console
/// inspection, goes through it. The dispatcher is populated before the
/// accept loop starts and never mutated again.
pub struct ServerState {
    pub(crate) registry: Mutex<Registry>,
    pub(crate) dispatcher: Dispatcher,
}

impl ServerState {
    /// Locks and returns the registry - the console's way in.
    pub async fn registry(&self) -> tokio::sync::MutexGuard<'_, Registry> {
        self.registry.lock().await
    }
}

/// Builder for configuring and starting a relay server.
///
/// # Example
///
/// ```rust,no_run
/// use parlor::prelude::*;
///
/// # async fn run() -> Result<(), ParlorError> {
/// let server = Server::builder().bind("0.0.0.0:8888").build().await?;
/// server.run().await
/// # }
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
}

impl ServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Sets the address to bind the accept loop to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets the seat count of rooms created by joins.
    pub fn room_capacity(mut self, capacity: usize) -> Self {
        self.config.room_capacity = capacity;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds the transport and assembles the server.
    pub async fn build(self) -> Result<Server, ParlorError> {
        let transport = TcpTransport::bind(&self.config.bind_addr).await?;

        let state = Arc::new(ServerState {
            registry: Mutex::new(Registry::new(&self.config)),
            dispatcher: Dispatcher::with_game_commands(),
        });

        Ok(Server { transport, state })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running relay server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct Server {
    transport: TcpTransport,
    state: Arc<ServerState>,
}

impl Server {
    /// Creates a new builder.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Returns a handle to the shared state, for the operator console.
    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Runs the accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), ParlorError> {
        tracing::info!("parlor relay running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(handle_connection(conn, state));
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}

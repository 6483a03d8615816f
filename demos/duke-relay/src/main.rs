//! The Duke relay server: pairs two Duke clients into a room and forwards
//! their moves. Runs the accept loop and the operator console side by
//! side; typing `exit` at the console shuts the process down.

use std::path::PathBuf;

use clap::Parser;
use parlor::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duke-relay", about = "Relay server for two-player Duke matches")]
struct Args {
    /// Address to listen on (overrides the config file).
    #[arg(long)]
    bind: Option<String>,

    /// Optional JSON config file with a `ServerConfig`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "parlor=debug".
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let server = Server::builder().config(config).build().await?;
    tracing::info!(addr = %server.local_addr()?, "duke relay listening");

    let state = server.state();
    tokio::select! {
        result = server.run() => result?,
        result = parlor::console::run(state) => result?,
    }

    Ok(())
}

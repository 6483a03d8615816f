//! A terminal client for poking at a running relay.
//!
//! Lines are sent as `command:payload` if they contain a colon, otherwise
//! as public chat. Incoming frames print as they arrive. Useful for
//! watching a match's relay traffic without starting the game client.

use clap::Parser;
use parlor_client::Client;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "duke-chat", about = "Terminal client for the Duke relay")]
struct Args {
    /// Relay address to connect to.
    #[arg(long, default_value = "127.0.0.1:8888")]
    addr: String,

    /// Display name to claim after connecting.
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut client = Client::connect(&args.addr).await?;
    client.request_uid()?;
    if let Some(name) = &args.name {
        client.set_name(name)?;
    }

    // The receive loop below borrows `client`; stdin sends go through a
    // detached handle.
    let sender = client.sender();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            frame = client.recv() => {
                let Some(frame) = frame else {
                    println!("connection closed");
                    break;
                };
                match frame.command.as_str() {
                    "info" | "relay" => println!("{}", frame.payload),
                    "uid" => println!("connected as {}", frame.payload),
                    "name" => println!("name set to {}", frame.payload),
                    "room" => println!("joined room {}", frame.payload),
                    "rooms" => println!("rooms: {}", frame.payload),
                    "room_ready" => println!("both seats filled"),
                    "won" => println!("opponent conceded"),
                    "lost" => println!("loss recorded"),
                    _ => println!("[{}] {}", frame.command, frame.payload),
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match line.split_once(':') {
                    Some((command, payload)) => sender.send(command, payload)?,
                    None => sender.send("a", line)?,
                }
            }
        }
    }

    Ok(())
}

//! Integration tests for the relay: real TCP connections driven through
//! the client connector, plus raw-socket tests for wire-level behavior.

use std::time::Duration;

use parlor::prelude::*;
use parlor_client::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

// =========================================================================
// Helpers
// =========================================================================

/// Starts a relay on an ephemeral port and returns its address.
async fn start_server() -> String {
    let server = Server::builder()
        .bind("127.0.0.1:0")
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn connect(addr: &str) -> Client {
    Client::connect(addr).await.expect("should connect")
}

/// Joins a room and waits for the `room:` confirmation.
async fn join(client: &mut Client, name: &str) {
    client.join_room(name).expect("send");
    let confirm = client
        .recv_command(commands::server::ROOM)
        .await
        .expect("room confirmation");
    assert_eq!(confirm.payload, name);
}

/// Connects two clients into one full room, consuming the ready signals.
async fn full_room(addr: &str, name: &str) -> (Client, Client) {
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    join(&mut a, name).await;
    join(&mut b, name).await;
    a.recv_command(commands::server::ROOM_READY).await.unwrap();
    b.recv_command(commands::server::ROOM_READY).await.unwrap();
    (a, b)
}

/// Asserts that no frame arrives within a short window.
async fn assert_silent(client: &mut Client) {
    let result =
        tokio::time::timeout(Duration::from_millis(100), client.recv()).await;
    assert!(result.is_err(), "expected silence, got {result:?}");
}

// =========================================================================
// Room lifecycle
// =========================================================================

#[tokio::test]
async fn test_join_creates_room_and_confirms() {
    let addr = start_server().await;
    let mut x = connect(&addr).await;

    x.join_room("alpha").unwrap();

    let reply = x.recv().await.expect("reply");
    assert_eq!(reply, Frame::new("room", "alpha"));
}

#[tokio::test]
async fn test_second_join_fires_room_ready_for_both() {
    // The matchmaking happy path: X creates alpha, Y fills it.
    let addr = start_server().await;
    let mut x = connect(&addr).await;
    let mut y = connect(&addr).await;

    join(&mut x, "alpha").await;
    join(&mut y, "alpha").await;

    let x_ready = x.recv().await.expect("frame");
    let y_ready = y.recv().await.expect("frame");
    assert_eq!(x_ready, Frame::bare("room_ready"));
    assert_eq!(y_ready, Frame::bare("room_ready"));

    // room_ready fires exactly once.
    assert_silent(&mut x).await;
    assert_silent(&mut y).await;
}

#[tokio::test]
async fn test_third_join_rejected_with_room_is_full() {
    let addr = start_server().await;
    let (mut a, mut b) = full_room(&addr, "alpha").await;
    let mut c = connect(&addr).await;

    c.join_room("alpha").unwrap();

    let reply = c.recv().await.expect("reply");
    assert_eq!(reply, Frame::new("info", "room is full"));

    // Membership unchanged: still exactly 2/2, and the occupants heard
    // nothing about it.
    c.request_rooms().unwrap();
    let listing = c.recv_command(commands::server::ROOMS).await.unwrap();
    assert_eq!(listing.payload, "alpha 2/2");
    assert_silent(&mut a).await;
    assert_silent(&mut b).await;
}

#[tokio::test]
async fn test_disconnect_frees_seat_and_rearms_room_ready() {
    let addr = start_server().await;
    let (mut a, b) = full_room(&addr, "alpha").await;

    // B's socket drops; the registry teardown runs asynchronously.
    drop(b);
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The room is partial now, so A's relays go nowhere and A hears
    // nothing.
    a.send_move("1,1->2,2").unwrap();
    assert_silent(&mut a).await;

    // A fresh client can take the freed seat, which re-fires room_ready.
    let mut c = connect(&addr).await;
    join(&mut c, "alpha").await;
    assert_eq!(
        c.recv().await.expect("frame"),
        Frame::bare("room_ready")
    );
    assert_eq!(
        a.recv().await.expect("frame"),
        Frame::bare("room_ready")
    );

    // And the relay works again.
    a.send_move("2,2->3,3").unwrap();
    assert_eq!(
        c.recv().await.expect("frame"),
        Frame::new("move", "2,2->3,3")
    );
}

// =========================================================================
// Identity and lobby
// =========================================================================

#[tokio::test]
async fn test_uid_request_returns_assigned_id() {
    let addr = start_server().await;
    let mut x = connect(&addr).await;

    x.request_uid().unwrap();

    let reply = x.recv().await.expect("reply");
    assert_eq!(reply.command, "uid");
    assert_eq!(reply.payload.len(), 7);
    assert!(reply.payload.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_uid_is_stable_across_requests() {
    let addr = start_server().await;
    let mut x = connect(&addr).await;

    x.request_uid().unwrap();
    let first = x.recv().await.unwrap().payload;
    x.request_uid().unwrap();
    let second = x.recv().await.unwrap().payload;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_name_change_is_echoed() {
    let addr = start_server().await;
    let mut x = connect(&addr).await;

    x.set_name("ann").unwrap();

    assert_eq!(x.recv().await.unwrap(), Frame::new("name", "ann"));
}

#[tokio::test]
async fn test_room_listing_shows_occupancy() {
    let addr = start_server().await;
    let mut x = connect(&addr).await;
    join(&mut x, "alpha").await;

    x.request_rooms().unwrap();

    let listing = x.recv().await.unwrap();
    assert_eq!(listing, Frame::new("rooms", "alpha 1/2"));
}

#[tokio::test]
async fn test_chat_broadcast_excludes_sender() {
    let addr = start_server().await;
    let mut a = connect(&addr).await;
    let mut b = connect(&addr).await;
    a.set_name("ann").unwrap();
    a.recv_command(commands::server::NAME).await.unwrap();
    // Make sure b's handler task has registered it before broadcasting.
    b.request_uid().unwrap();
    b.recv_command(commands::server::UID).await.unwrap();

    a.say("good game").unwrap();

    assert_eq!(
        b.recv().await.unwrap(),
        Frame::new("relay", "ann: good game")
    );
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn test_whisper_reaches_named_target_only() {
    let addr = start_server().await;
    let a = connect(&addr).await;
    let mut b = connect(&addr).await;
    let mut c = connect(&addr).await;
    b.set_name("bob").unwrap();
    b.recv_command(commands::server::NAME).await.unwrap();

    a.whisper("bob", "psst").unwrap();

    let reply = b.recv().await.unwrap();
    assert_eq!(reply.command, "info");
    assert!(reply.payload.ends_with("says: psst"));
    assert_silent(&mut c).await;
}

// =========================================================================
// Gameplay relay
// =========================================================================

#[tokio::test]
async fn test_move_relays_to_opponent_only() {
    let addr = start_server().await;
    let (mut a, mut b) = full_room(&addr, "alpha").await;

    a.send_move("0,1->2,3").unwrap();

    assert_eq!(b.recv().await.unwrap(), Frame::new("move", "0,1->2,3"));
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn test_positions_and_spawn_relay_verbatim() {
    let addr = start_server().await;
    let (a, mut b) = full_room(&addr, "alpha").await;

    a.send_positions("DUKE 2,5,0-FOOTMAN 3,5,1").unwrap();
    a.spawn_opponent("PIKEMAN->2,4").unwrap();

    assert_eq!(
        b.recv().await.unwrap(),
        Frame::new("positions", "DUKE 2,5,0-FOOTMAN 3,5,1")
    );
    assert_eq!(
        b.recv().await.unwrap(),
        Frame::new("spawn_opponent", "PIKEMAN->2,4")
    );
}

#[tokio::test]
async fn test_relay_before_match_is_dropped() {
    let addr = start_server().await;
    let mut a = connect(&addr).await;
    join(&mut a, "alpha").await;

    // Alone in the room: stray gameplay frames vanish silently.
    a.send_move("1,1->2,2").unwrap();
    a.send_positions("DUKE 2,5,0").unwrap();
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn test_ready_cues_host_and_ignores_guest() {
    let addr = start_server().await;
    let (mut a, mut b) = full_room(&addr, "alpha").await;

    // a joined first → a is host and receives the turn-start cue.
    a.ready().unwrap();
    assert_eq!(a.recv().await.unwrap(), Frame::bare("move"));
    assert_silent(&mut b).await;

    // The guest asking is silently ignored.
    b.ready().unwrap();
    assert_silent(&mut a).await;
    assert_silent(&mut b).await;
}

#[tokio::test]
async fn test_lost_notifies_loser_and_winner() {
    let addr = start_server().await;
    let (mut a, mut b) = full_room(&addr, "alpha").await;

    a.resign().unwrap();

    assert_eq!(a.recv().await.unwrap(), Frame::bare("lost"));
    assert_eq!(b.recv().await.unwrap(), Frame::bare("won"));
}

#[tokio::test]
async fn test_lost_in_partial_room_is_silent() {
    let addr = start_server().await;
    let mut a = connect(&addr).await;
    join(&mut a, "alpha").await;

    a.resign().unwrap();

    assert_silent(&mut a).await;
}

// =========================================================================
// Wire-level behavior (raw sockets)
// =========================================================================

/// Reads from a raw socket until `n` frame delimiters have arrived,
/// returning the decoded frames.
async fn read_frames(stream: &mut TcpStream, n: usize) -> Vec<Frame> {
    use parlor_protocol::wire::FrameDecoder;

    let mut decoder = FrameDecoder::new();
    let mut frames = Vec::new();
    let mut buf = [0u8; 1024];
    while frames.len() < n {
        let read = tokio::time::timeout(
            Duration::from_secs(2),
            stream.read(&mut buf),
        )
        .await
        .expect("read timed out")
        .expect("read failed");
        assert!(read > 0, "connection closed early");
        decoder.feed(&buf[..read]);
        while let Some(decoded) = decoder.next_frame() {
            frames.push(decoded.expect("well-formed reply"));
        }
    }
    frames
}

#[tokio::test]
async fn test_fragmented_writes_decode_like_one_stream() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(&addr).await.unwrap();

    // One frame split across three writes, with flushes and pauses in
    // between, must dispatch exactly once.
    for part in ["ro", "om:al", "pha|"] {
        stream.write_all(part.as_bytes()).await.unwrap();
        stream.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let frames = read_frames(&mut stream, 1).await;
    assert_eq!(frames, vec![Frame::new("room", "alpha")]);
}

#[tokio::test]
async fn test_batched_writes_dispatch_in_order() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(&addr).await.unwrap();

    // Three frames in one write dispatch in order.
    stream
        .write_all(b"name:ann|room:beta|get_rooms:|")
        .await
        .unwrap();

    let frames = read_frames(&mut stream, 3).await;
    assert_eq!(frames[0], Frame::new("name", "ann"));
    assert_eq!(frames[1], Frame::new("room", "beta"));
    assert_eq!(frames[2], Frame::new("rooms", "beta 1/2"));
}

#[tokio::test]
async fn test_malformed_fragment_does_not_kill_connection() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(&addr).await.unwrap();

    // A fragment with no colon is discarded; the frame after it works.
    stream.write_all(b"garbage|uid:|").await.unwrap();

    let frames = read_frames(&mut stream, 1).await;
    assert_eq!(frames[0].command, "uid");
    assert_eq!(frames[0].payload.len(), 7);
}

#[tokio::test]
async fn test_unknown_command_is_ignored_not_fatal() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(&addr).await.unwrap();

    stream.write_all(b"teleport:moon|uid:|").await.unwrap();

    let frames = read_frames(&mut stream, 1).await;
    assert_eq!(frames[0].command, "uid");
}

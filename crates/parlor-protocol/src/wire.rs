//! The `command:payload|` wire format.
//!
//! Every frame on the stream is laid out as
//!
//! ```text
//! COMMAND : PAYLOAD |
//! ```
//!
//! with a trailing `|` after every frame, including the last one in a
//! batch. The receiver splits on `|`, keeps any incomplete tail buffered,
//! and splits each complete fragment on the *first* `:` - so a payload may
//! itself contain `:` (chat and whisper payloads do), but never `|`, and a
//! command may contain neither.
//!
//! TCP gives no message boundaries: one frame may arrive across several
//! reads, and one read may carry several frames. [`FrameDecoder`] owns the
//! reassembly buffer; feed it every chunk as it arrives and drain complete
//! frames with [`FrameDecoder::next_frame`].

use crate::{Frame, ProtocolError};

/// Separates consecutive frames on the stream.
pub const FRAME_DELIMITER: u8 = b'|';

/// Separates a frame's command from its payload.
pub const COMMAND_DELIMITER: char = ':';

/// Encodes one frame into its self-delimited wire form.
///
/// A frame with an empty payload encodes as `command:|`.
///
/// # Errors
/// Returns [`ProtocolError::IllegalDelimiter`] if the command contains
/// either delimiter or the payload contains the frame delimiter. Payloads
/// originating from board-position strings never contain them by
/// construction; anything else is a caller bug, not a recoverable state.
pub fn encode(frame: &Frame) -> Result<Vec<u8>, ProtocolError> {
    if frame.command.contains(COMMAND_DELIMITER) {
        return Err(ProtocolError::IllegalDelimiter {
            part: "command",
            delimiter: COMMAND_DELIMITER,
        });
    }
    if frame.command.contains(FRAME_DELIMITER as char) {
        return Err(ProtocolError::IllegalDelimiter {
            part: "command",
            delimiter: FRAME_DELIMITER as char,
        });
    }
    if frame.payload.contains(FRAME_DELIMITER as char) {
        return Err(ProtocolError::IllegalDelimiter {
            part: "payload",
            delimiter: FRAME_DELIMITER as char,
        });
    }

    let mut out =
        Vec::with_capacity(frame.command.len() + frame.payload.len() + 2);
    out.extend_from_slice(frame.command.as_bytes());
    out.push(COMMAND_DELIMITER as u8);
    out.extend_from_slice(frame.payload.as_bytes());
    out.push(FRAME_DELIMITER);
    Ok(out)
}

/// Reassembles frames from an arbitrarily chunked byte stream.
///
/// Incomplete tails stay buffered until the closing `|` arrives, so a
/// UTF-8 sequence split across two reads is never parsed half-way. A
/// malformed fragment is returned as an `Err` and discarded; the decoder
/// remains usable for everything after it.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    /// Creates a decoder with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one received chunk to the reassembly buffer.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Consumes and returns the next complete frame, if one is buffered.
    ///
    /// Returns `None` when the buffer holds no complete fragment - the
    /// partial tail (if any) is kept for the next [`feed`](Self::feed).
    pub fn next_frame(&mut self) -> Option<Result<Frame, ProtocolError>> {
        let end = self.buf.iter().position(|&b| b == FRAME_DELIMITER)?;
        let mut fragment: Vec<u8> = self.buf.drain(..=end).collect();
        fragment.pop(); // the trailing delimiter

        let text = match String::from_utf8(fragment) {
            Ok(text) => text,
            Err(e) => return Some(Err(ProtocolError::InvalidUtf8(e))),
        };

        match text.split_once(COMMAND_DELIMITER) {
            Some((command, payload)) => Some(Ok(Frame::new(command, payload))),
            None => Some(Err(ProtocolError::MalformedFrame(text))),
        }
    }

    /// Number of bytes waiting for their closing delimiter.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}

//! Error types for the protocol layer.

/// Errors that can occur while framing or unframing messages.
///
/// Decode-side errors ([`MalformedFrame`](Self::MalformedFrame),
/// [`InvalidUtf8`](Self::InvalidUtf8)) are per-fragment: the offending
/// fragment is discarded and the decoder stays usable, so a connection
/// survives one bad frame. Encode-side rejection
/// ([`IllegalDelimiter`](Self::IllegalDelimiter)) is a caller bug - the
/// relay never emits frames it could not re-read.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A complete fragment arrived with no command delimiter in it.
    #[error("malformed frame (no command delimiter): {0:?}")]
    MalformedFrame(String),

    /// A complete fragment was not valid UTF-8.
    #[error("frame is not valid utf-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Encoding rejected a command or payload containing a delimiter
    /// character that would corrupt the stream.
    #[error("frame {part} may not contain {delimiter:?}")]
    IllegalDelimiter {
        /// Which half of the frame was at fault: `"command"` or `"payload"`.
        part: &'static str,
        /// The offending delimiter character.
        delimiter: char,
    },
}

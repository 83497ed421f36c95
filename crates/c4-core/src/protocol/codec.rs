//! Binary codec for session messages.
//!
//! Wire format: one or two big-endian `i32` fields, no header.
//!
//! ```text
//! PLAYER_ASSIGN [player:4]
//! START         [signal:4]      always 1
//! MOVE          [column:4]      0-based
//! STATUS        [code:4]        1=P1 win 2=P2 win 3=draw 4=proceed
//! MOVE_ECHO     [row:4][col:4]  0-based, row 0 is the top
//! ```

use thiserror::Error;

use crate::protocol::messages::{
    MessageType, PlayerId, SessionMessage, StatusCode, FIELD_SIZE, START_SIGNAL,
};

/// Errors that can occur while decoding a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the expected message.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// A PLAYER_ASSIGN carried something other than 1 or 2.
    #[error("unknown player id: {0}")]
    UnknownPlayerId(i32),

    /// A STATUS carried something other than 1..=4.
    #[error("unknown status code: {0}")]
    UnknownStatusCode(i32),

    /// A START carried something other than the start signal.
    #[error("unexpected start signal: {0}")]
    UnexpectedStartSignal(i32),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a message into its wire bytes.
///
/// # Examples
///
/// ```rust
/// use c4_core::protocol::{decode_message, encode_message, MessageType, SessionMessage};
///
/// let msg = SessionMessage::MoveEcho { row: 5, column: 3 };
/// let bytes = encode_message(&msg);
/// assert_eq!(bytes, [0, 0, 0, 5, 0, 0, 0, 3]);
/// let (decoded, consumed) = decode_message(MessageType::MoveEcho, &bytes).unwrap();
/// assert_eq!(decoded, msg);
/// assert_eq!(consumed, 8);
/// ```
pub fn encode_message(msg: &SessionMessage) -> Vec<u8> {
    let mut buf = Vec::with_capacity(msg.message_type().wire_len());
    match *msg {
        SessionMessage::PlayerAssign(player) => write_i32(&mut buf, player as i32),
        SessionMessage::Start => write_i32(&mut buf, START_SIGNAL),
        SessionMessage::Move { column } => write_i32(&mut buf, column),
        SessionMessage::Status(code) => write_i32(&mut buf, code as i32),
        SessionMessage::MoveEcho { row, column } => {
            write_i32(&mut buf, row);
            write_i32(&mut buf, column);
        }
    }
    buf
}

/// Decodes one message of the `expected` kind from the front of `bytes`.
///
/// Returns the message and the number of bytes consumed.  Trailing bytes are
/// left for the caller.
///
/// # Errors
///
/// [`ProtocolError::InsufficientData`] if `bytes` is too short, or one of the
/// value errors if a field is out of range for its message kind.
pub fn decode_message(
    expected: MessageType,
    bytes: &[u8],
) -> Result<(SessionMessage, usize), ProtocolError> {
    let consumed = expected.wire_len();
    let first = read_i32(bytes, 0)?;

    let msg = match expected {
        MessageType::PlayerAssign => SessionMessage::PlayerAssign(
            PlayerId::try_from(first).map_err(|()| ProtocolError::UnknownPlayerId(first))?,
        ),
        MessageType::Start => {
            if first != START_SIGNAL {
                return Err(ProtocolError::UnexpectedStartSignal(first));
            }
            SessionMessage::Start
        }
        MessageType::Move => SessionMessage::Move { column: first },
        MessageType::Status => SessionMessage::Status(
            StatusCode::try_from(first).map_err(|()| ProtocolError::UnknownStatusCode(first))?,
        ),
        MessageType::MoveEcho => SessionMessage::MoveEcho {
            row: first,
            column: read_i32(bytes, FIELD_SIZE)?,
        },
    };

    Ok((msg, consumed))
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn write_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn read_i32(buf: &[u8], offset: usize) -> Result<i32, ProtocolError> {
    let end = offset + FIELD_SIZE;
    match buf.get(offset..end) {
        Some(&[a, b, c, d]) => Ok(i32::from_be_bytes([a, b, c, d])),
        _ => Err(ProtocolError::InsufficientData {
            needed: end,
            available: buf.len(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

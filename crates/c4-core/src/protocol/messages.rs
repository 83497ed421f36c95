//! Session message types.
//!
//! Every field on the wire is a signed 32-bit big-endian integer.  There is no
//! type tag: both ends know from the conversation so far which message comes
//! next, so readers always name the [`MessageType`] they expect.
//!
//! Conversation for one session:
//!
//! ```text
//! server → P1   PLAYER_ASSIGN(1)          on accept
//! server → P2   PLAYER_ASSIGN(2)          on accept
//! server → P1   START(1)
//! active → srv  MOVE(column)              repeated until valid
//! server → wait STATUS(PROCEED) ECHO(r,c) game continues
//! server → mvr  STATUS(outcome)           game over
//! server → wait STATUS(outcome) ECHO(r,c) game over
//! ```

use crate::domain::board::{Outcome, Token};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Value carried by the START message.
pub const START_SIGNAL: i32 = 1;

/// Size in bytes of one wire field.
pub const FIELD_SIZE: usize = 4;

// ── Player identifiers ────────────────────────────────────────────────────────

/// Seat assigned by the server in connection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PlayerId {
    One = 1,
    Two = 2,
}

impl PlayerId {
    /// Player 1 plays Red, player 2 plays Yellow.
    pub fn token(self) -> Token {
        match self {
            PlayerId::One => Token::Red,
            PlayerId::Two => Token::Yellow,
        }
    }

    pub fn from_token(token: Token) -> Self {
        match token {
            Token::Red => PlayerId::One,
            Token::Yellow => PlayerId::Two,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl TryFrom<i32> for PlayerId {
    type Error = ();

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", *self as i32)
    }
}

// ── Status codes ──────────────────────────────────────────────────────────────

/// Game status sent after every accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum StatusCode {
    P1Win = 1,
    P2Win = 2,
    Draw = 3,
    Proceed = 4,
}

impl StatusCode {
    /// Maps the engine's view of the game onto a status code.
    pub fn from_outcome(outcome: Option<Outcome>) -> Self {
        match outcome {
            None => StatusCode::Proceed,
            Some(Outcome::Draw) => StatusCode::Draw,
            Some(Outcome::Win(token)) => match PlayerId::from_token(token) {
                PlayerId::One => StatusCode::P1Win,
                PlayerId::Two => StatusCode::P2Win,
            },
        }
    }

    /// `None` for [`StatusCode::Proceed`].
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            StatusCode::P1Win => Some(Outcome::Win(Token::Red)),
            StatusCode::P2Win => Some(Outcome::Win(Token::Yellow)),
            StatusCode::Draw => Some(Outcome::Draw),
            StatusCode::Proceed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != StatusCode::Proceed
    }
}

impl TryFrom<i32> for StatusCode {
    type Error = ();

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(StatusCode::P1Win),
            2 => Ok(StatusCode::P2Win),
            3 => Ok(StatusCode::Draw),
            4 => Ok(StatusCode::Proceed),
            _ => Err(()),
        }
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// The kind of message a reader expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    PlayerAssign,
    Start,
    Move,
    Status,
    MoveEcho,
}

impl MessageType {
    /// Encoded size in bytes.
    pub fn wire_len(self) -> usize {
        match self {
            MessageType::MoveEcho => 2 * FIELD_SIZE,
            _ => FIELD_SIZE,
        }
    }
}

/// One message exchanged during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMessage {
    /// Server → client on accept: which seat this connection holds.
    PlayerAssign(PlayerId),
    /// Server → player 1 once both seats are filled.
    Start,
    /// Client → server: the chosen column.  Kept signed so that hostile or
    /// buggy values survive decoding and are rejected as invalid moves.
    Move { column: i32 },
    /// Server → client after each accepted move.
    Status(StatusCode),
    /// Server → waiting client: where the opponent's token landed.
    MoveEcho { row: i32, column: i32 },
}

impl SessionMessage {
    pub fn message_type(&self) -> MessageType {
        match self {
            SessionMessage::PlayerAssign(_) => MessageType::PlayerAssign,
            SessionMessage::Start => MessageType::Start,
            SessionMessage::Move { .. } => MessageType::Move,
            SessionMessage::Status(_) => MessageType::Status,
            SessionMessage::MoveEcho { .. } => MessageType::MoveEcho,
        }
    }
}

//! # c4-core
//!
//! Shared library for networked Connect Four containing the board engine,
//! the turn state machine, the random computer opponent, and the session wire
//! protocol.
//!
//! This crate is used by both the server and the client applications.
//! It has no dependency on sockets, terminals, or any presentation layer; the
//! only I/O it knows about is the pair of async read/write traits used by the
//! protocol framing helpers.
//!
//! # Architecture overview
//!
//! - **`domain`** – Pure game rules.  [`BoardEngine`] owns the 6x7 grid and
//!   applies gravity drops, [`TurnCoordinator`] alternates the active token and
//!   freezes the game once it is won or drawn, and [`RandomMovePlayer`] picks
//!   columns for the computer opponent.
//!
//! - **`protocol`** – How moves travel between two peers and the authority.
//!   Every message is one or two big-endian 32-bit integers with no type tag,
//!   so each read names the message kind it expects.

pub mod domain;
pub mod protocol;

pub use domain::board::{
    BoardEngine, Cell, MoveError, Outcome, Placement, Token, WinCheck, COLS, MAX_MOVES, ROWS,
};
pub use domain::random_player::RandomMovePlayer;
pub use domain::turn::{MoveReport, Phase, TurnCoordinator, TurnState};
pub use protocol::codec::{decode_message, encode_message, ProtocolError};
pub use protocol::framing::{read_message, write_message, FrameError};
pub use protocol::messages::{MessageType, PlayerId, SessionMessage, StatusCode};

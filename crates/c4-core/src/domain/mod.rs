//! Game rules for Connect Four.
//!
//! Everything in this module is synchronous and free of I/O.  Callers feed
//! column choices in and read board snapshots out; how those columns were
//! chosen (keyboard, network, random) and how the board is displayed is the
//! business of the outer layers.

/// Grid state, gravity drops, and win/draw detection.
pub mod board;

/// The uniformly random computer opponent.
pub mod random_player;

/// Turn alternation and terminal-state handling.
pub mod turn;

//! c4-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does c4-client do? (for beginners)
//!
//! The client is what a person actually plays with.  It has two modes:
//!
//! 1. **Local**: both sides share one terminal, or one side is the built-in
//!    random computer player.  The whole game runs in this process.
//! 2. **Online**: the client connects to a `c4-server`, learns whether it is
//!    player 1 or 2, and exchanges moves with the server.  The server decides
//!    the game; the client keeps a mirror of the board so it can draw it and
//!    catch bad input before it is sent.
//!
//! Moves come from a [`MoveSource`](application::ports::MoveSource) (keyboard
//! or computer) and the board goes to a
//! [`BoardRenderer`](application::ports::BoardRenderer), so the game drivers
//! never touch stdin or stdout directly.

/// Application layer: game drivers and the trait seams they depend on.
pub mod application;

/// Infrastructure layer: terminal input and output, and the TCP connection.
pub mod infrastructure;

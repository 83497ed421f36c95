//! Network infrastructure for the session server.
//!
//! # Sub-modules
//!
//! - **`listener`** – Binds the TCP port, pairs incoming connections two at a
//!   time, assigns player numbers, and spawns one task per session.

pub mod listener;

pub use listener::{NetworkError, PlayerPair, SessionListener};

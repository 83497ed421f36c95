//! Application layer use cases for the session server.
//!
//! Use cases in this layer orchestrate `c4_core` domain objects and talk to
//! peers only through tokio's async I/O traits, never through a concrete
//! socket type.  That keeps them testable over in-memory pipes.
//!
//! # Sub-modules
//!
//! - **`run_session`** – Drives one game between two connected players: start
//!   signal, move validation, status and echo fan-out, and termination.
//!
//! - **`session_registry`** – Keeps a numbered record of every session the
//!   server has started and how each one ended.

pub mod run_session;
pub mod session_registry;

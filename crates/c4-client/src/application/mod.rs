//! Application layer use cases for the client.
//!
//! # What use cases does the client have?
//!
//! - **`local_game`** – Runs a whole game in-process with a local
//!   [`TurnCoordinator`](c4_core::TurnCoordinator), optionally with the
//!   computer playing Yellow.
//!
//! - **`remote_game`** – Plays one seat of a server-run session, mirroring
//!   the board locally.
//!
//! - **`computer_player`** – Adapts the random computer opponent to the
//!   [`MoveSource`](ports::MoveSource) seam.
//!
//! Neither driver performs terminal I/O itself; that goes through the traits
//! in **`ports`**, implemented in the infrastructure layer.

pub mod computer_player;
pub mod game_end;
pub mod local_game;
pub mod ports;
pub mod remote_game;

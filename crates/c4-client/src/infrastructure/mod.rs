//! Infrastructure layer for the client.
//!
//! Contains the terminal adapters (line input, text board output) and the TCP
//! connection to the server.
//!
//! **Dependency rule**: this layer may depend on `application` and `c4_core`,
//! but MUST NOT be imported by the `application` layer.

pub mod console;
pub mod network;

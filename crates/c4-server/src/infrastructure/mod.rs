//! Infrastructure layer for the session server.
//!
//! Contains OS-facing adapters: the TCP accept loop and the TOML config file.
//!
//! **Dependency rule**: this layer may depend on `application` and `c4_core`,
//! but MUST NOT be imported by the `application` layer.

pub mod network;
pub mod storage;

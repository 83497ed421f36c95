//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads and writes the server's TOML file and fills
//! in defaults for anything the file leaves out, including the case where
//! the file does not exist at all.

pub mod config;

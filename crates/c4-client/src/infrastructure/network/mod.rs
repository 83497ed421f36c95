//! Network infrastructure for the client.
//!
//! Opens the TCP connection to the server.  Everything after the connect
//! (seat assignment, moves, status) is handled by the `remote_game` driver
//! over the returned stream.

use thiserror::Error;
use tokio::net::TcpStream;
use tracing::{debug, info};

/// Errors that can occur in the client network layer.
#[derive(Debug, Error)]
pub enum ClientNetworkError {
    /// TCP connection to the server failed.
    #[error("failed to connect to server at {addr}: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where to find the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConnectionConfig {
    /// Hostname or IP address.
    pub host: String,
    pub port: u16,
}

impl Default for ClientConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ClientConnectionConfig {
    /// `host:port` as shown in logs and errors.
    pub fn display_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connects to the server described by `config`.
///
/// # Errors
///
/// [`ClientNetworkError::ConnectFailed`] if the host does not resolve or
/// refuses the connection.
pub async fn connect(config: &ClientConnectionConfig) -> Result<TcpStream, ClientNetworkError> {
    let stream = TcpStream::connect((config.host.as_str(), config.port))
        .await
        .map_err(|source| ClientNetworkError::ConnectFailed {
            addr: config.display_addr(),
            source,
        })?;

    if let Err(e) = stream.set_nodelay(true) {
        debug!("could not set TCP_NODELAY: {e}");
    }
    info!("connected to server at {}", config.display_addr());
    Ok(stream)
}

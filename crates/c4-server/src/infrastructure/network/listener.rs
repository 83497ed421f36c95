//! SessionListener: TCP accept loop that pairs players into sessions.
//!
//! Connections are paired strictly in arrival order.  The first connection of
//! a pair is told it is player 1, the second that it is player 2, and the
//! pair is handed to a new [`GameSession`] task.  The accept loop goes
//! straight back to waiting for the next pair, so any number of games can
//! run at once.
//!
//! ```text
//! accept ─► PLAYER_ASSIGN(1) ─► accept ─► PLAYER_ASSIGN(2) ─► spawn session
//!    ▲                                                             │
//!    └─────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use c4_core::{write_message, PlayerId, SessionMessage};
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::application::run_session::GameSession;
use crate::application::session_registry::SessionRegistry;

/// Error type for the accept loop.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("bind failed on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),
}

/// Two connected players that have both received their seat number.
#[derive(Debug)]
pub struct PlayerPair {
    pub player1: TcpStream,
    pub player1_addr: SocketAddr,
    pub player2: TcpStream,
    pub player2_addr: SocketAddr,
}

/// Listens for players and runs their sessions.
pub struct SessionListener {
    listener: TcpListener,
    local_addr: SocketAddr,
    /// `0` means no limit.
    max_sessions: usize,
    registry: Arc<Mutex<SessionRegistry>>,
}

impl SessionListener {
    /// Binds the listening socket.
    ///
    /// # Errors
    ///
    /// [`NetworkError::BindFailed`] if the address is in use or not permitted.
    pub async fn bind(addr: SocketAddr, max_sessions: usize) -> Result<Self, NetworkError> {
        let bind_err = |source| NetworkError::BindFailed { addr, source };
        let listener = TcpListener::bind(addr).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        Ok(Self {
            listener,
            local_addr,
            max_sessions,
            registry: Arc::new(Mutex::new(SessionRegistry::new())),
        })
    }

    /// The address actually bound; useful when binding port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Shared handle to the session registry.
    pub fn registry(&self) -> Arc<Mutex<SessionRegistry>> {
        Arc::clone(&self.registry)
    }

    /// Accepts player 1 and then player 2, sending each its seat number.
    ///
    /// A connection that cannot be sent its seat number is dropped and the
    /// seat is offered to the next connection.  If player 1 hangs up while
    /// waiting for an opponent, pairing starts over and the next connection
    /// becomes player 1.
    ///
    /// # Errors
    ///
    /// [`NetworkError::Accept`] if the listening socket itself fails.
    pub async fn accept_pair(&self) -> Result<PlayerPair, NetworkError> {
        loop {
            let (player1, player1_addr) = self.accept_seat(PlayerId::One).await?;

            let (player2, player2_addr) = tokio::select! {
                seated = self.accept_seat(PlayerId::Two) => seated?,
                () = hung_up(&player1) => {
                    warn!(addr = %player1_addr, "player 1 left before an opponent arrived");
                    continue;
                }
            };

            return Ok(PlayerPair {
                player1,
                player1_addr,
                player2,
                player2_addr,
            });
        }
    }

    /// Runs the accept loop until `shutdown` completes.
    ///
    /// Sessions already running are left to finish on their own tasks.
    ///
    /// # Errors
    ///
    /// Accept failures are logged and retried, so this currently only returns
    /// `Ok`.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), NetworkError>
    where
        F: Future<Output = ()>,
    {
        info!("listening for players on {}", self.local_addr);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested; stopping accept loop");
                    return Ok(());
                }
                pair = self.accept_pair() => match pair {
                    Ok(pair) => {
                        self.start_session(pair).await;
                    }
                    Err(e) => warn!("pairing failed: {e}"),
                },
            }
        }
    }

    /// Registers `pair` as a new session and spawns its game task.
    pub async fn start_session(&self, pair: PlayerPair) -> JoinHandle<()> {
        let record = self
            .registry
            .lock()
            .await
            .open(pair.player1_addr, pair.player2_addr);
        let number = record.number;
        info!(
            session = number,
            session_id = %record.id,
            player1 = %pair.player1_addr,
            player2 = %pair.player2_addr,
            "pair matched"
        );

        // Every event the session logs carries its number and id.
        let span = info_span!("session", session = number, session_id = %record.id);
        let registry = Arc::clone(&self.registry);
        tokio::spawn(
            async move {
                let result = GameSession::new(number, pair.player1, pair.player2)
                    .run()
                    .await;
                let mut registry = registry.lock().await;
                match result {
                    Ok(outcome) => registry.finish(number, outcome),
                    Err(e) => {
                        warn!(session = number, "session aborted: {e}");
                        registry.abort(number, e.to_string());
                    }
                }
            }
            .instrument(span),
        )
    }

    async fn accept_seat(&self, player: PlayerId) -> Result<(TcpStream, SocketAddr), NetworkError> {
        loop {
            let (mut stream, addr) = self.listener.accept().await.map_err(NetworkError::Accept)?;

            if player == PlayerId::One && self.at_capacity().await {
                warn!(%addr, limit = self.max_sessions, "session limit reached; refusing connection");
                continue;
            }

            if let Err(e) = stream.set_nodelay(true) {
                debug!(%addr, "could not set TCP_NODELAY: {e}");
            }

            match write_message(&mut stream, &SessionMessage::PlayerAssign(player)).await {
                Ok(()) => {
                    info!(%addr, "{player} connected");
                    return Ok((stream, addr));
                }
                Err(e) => warn!(%addr, "could not assign {player}: {e}"),
            }
        }
    }

    async fn at_capacity(&self) -> bool {
        self.max_sessions != 0 && self.registry.lock().await.active_count() >= self.max_sessions
    }
}

/// Resolves once `stream` reaches EOF or fails.
///
/// Bytes a player sends before START stay queued for the session, and the
/// watch then never resolves.
async fn hung_up(stream: &TcpStream) {
    let mut byte = [0u8; 1];
    match stream.peek(&mut byte).await {
        Ok(0) | Err(_) => {}
        Ok(_) => std::future::pending().await,
    }
}

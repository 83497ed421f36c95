//! RemoteGameUseCase: one seat of a server-run session.
//!
//! The server is the authority.  The client keeps a *mirror*
//! [`TurnCoordinator`] fed with its own moves and the opponent's echoed
//! moves, and uses it for three things:
//!
//! 1. Drawing the board.
//! 2. Checking the player's column before sending it, so the server never
//!    has to silently discard one of ours.
//! 3. Knowing what comes next on the wire.  A STATUS that follows our own
//!    game-ending move stands alone; a STATUS that arrives while we wait is
//!    always followed by the MOVE_ECHO of the opponent's move.
//!
//! If the server's STATUS ever disagrees with what the mirror computed, the
//! game stops with [`ClientError::Desync`].

use c4_core::{
    read_message, write_message, MessageType, MoveReport, PlayerId, SessionMessage, StatusCode,
    Token, TurnCoordinator,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::application::game_end::{outcome_message, rejection_notice, ClientError, GameEnd};
use crate::application::ports::{BoardRenderer, ColumnEvent, MoveSource};

pub struct RemoteGame<S, M, V> {
    stream: S,
    moves: M,
    renderer: V,
    mirror: TurnCoordinator,
}

impl<S, M, V> RemoteGame<S, M, V>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
    M: MoveSource,
    V: BoardRenderer,
{
    pub fn new(stream: S, moves: M, renderer: V) -> Self {
        Self {
            stream,
            moves,
            renderer,
            mirror: TurnCoordinator::new(PlayerId::One.token()),
        }
    }

    /// The local copy of the board.
    pub fn mirror(&self) -> &TurnCoordinator {
        &self.mirror
    }

    /// Plays from seat assignment to the end of the game.
    ///
    /// # Errors
    ///
    /// - [`ClientError::ConnectionLost`] if the server goes away.
    /// - [`ClientError::Protocol`] or [`ClientError::Desync`] if the server's
    ///   messages make no sense.
    /// - [`ClientError::Input`] if the move source fails.
    pub async fn play(&mut self) -> Result<GameEnd, ClientError> {
        let me = match read_message(&mut self.stream, MessageType::PlayerAssign).await? {
            SessionMessage::PlayerAssign(player) => player,
            other => return Err(unexpected(MessageType::PlayerAssign, other)),
        };
        let my_token = me.token();
        info!(player = %me, token = %my_token, "seat assigned");
        self.renderer.notice(&format!(
            "You are {} and play {} ({}).",
            me,
            my_token,
            my_token.symbol()
        ));

        if me == PlayerId::One {
            self.renderer.notice("Waiting for an opponent...");
            read_message(&mut self.stream, MessageType::Start).await?;
            self.renderer.notice("Opponent connected. You move first.");
        } else {
            self.renderer.notice("Waiting for player 1 to move...");
        }

        loop {
            self.render();
            let report = if self.mirror.active_token() == my_token {
                match self.take_my_turn(my_token).await? {
                    Some(report) => report,
                    None => return Ok(GameEnd::Quit),
                }
            } else {
                self.receive_opponent_move().await?
            };

            if let Some(outcome) = report.outcome {
                self.render();
                self.renderer.notice(&outcome_message(outcome, Some(my_token)));
                info!(%outcome, "online game finished");
                return Ok(GameEnd::Finished(outcome));
            }
        }
    }

    /// Gets a valid column from the move source, sends it, and applies it to
    /// the mirror.  Returns `None` if the player quits.
    async fn take_my_turn(&mut self, my_token: Token) -> Result<Option<MoveReport>, ClientError> {
        self.renderer.notice(&format!(
            "Your turn ({}). Choose a column (1-7, q to quit):",
            my_token.symbol()
        ));

        let column = loop {
            match self.moves.next_choice(self.mirror.board()).await {
                Ok(ColumnEvent::Exit) => {
                    info!("player quit online game");
                    return Ok(None);
                }
                Ok(ColumnEvent::Column(column)) => match self.mirror.board().landing_row(column) {
                    Ok(_) => break column,
                    Err(err) => {
                        let notice = rejection_notice(err).ok_or(ClientError::Move(err))?;
                        self.renderer.notice(&notice);
                    }
                },
                Err(err) if err.is_recoverable() => {
                    self.renderer.notice(&format!("{err}. Select again."));
                }
                Err(err) => return Err(err.into()),
            }
        };

        write_message(
            &mut self.stream,
            &SessionMessage::Move {
                column: column as i32,
            },
        )
        .await?;
        let report = self.mirror.submit(column)?;
        debug!(column, row = report.placement.row, "sent move");
        self.renderer.notice(&format!(
            "{} played column {}.",
            self.moves.label(),
            column + 1
        ));

        if let Some(expected) = report.outcome {
            // Our move ended the game: the server sends STATUS with no echo.
            let status = self.read_status().await?;
            if status.outcome() != Some(expected) {
                return Err(ClientError::Desync(format!(
                    "our final move gives {expected}, server says {status:?}"
                )));
            }
        } else {
            self.renderer.notice("Waiting for opponent...");
        }
        Ok(Some(report))
    }

    /// Reads STATUS and MOVE_ECHO for the opponent's move and applies it.
    async fn receive_opponent_move(&mut self) -> Result<MoveReport, ClientError> {
        let status = self.read_status().await?;
        let (row, column) = match read_message(&mut self.stream, MessageType::MoveEcho).await? {
            SessionMessage::MoveEcho { row, column } => (row, column),
            other => return Err(unexpected(MessageType::MoveEcho, other)),
        };

        let index = usize::try_from(column)
            .map_err(|_| ClientError::Desync(format!("echoed column {column} is negative")))?;
        let report = self
            .mirror
            .submit(index)
            .map_err(|e| ClientError::Desync(format!("echoed column {column} rejected: {e}")))?;

        if report.placement.row as i32 != row {
            return Err(ClientError::Desync(format!(
                "echo says row {row}, mirror placed at row {}",
                report.placement.row
            )));
        }
        if StatusCode::from_outcome(report.outcome) != status {
            return Err(ClientError::Desync(format!(
                "server says {status:?} after column {column}, mirror says {:?}",
                report.outcome
            )));
        }

        debug!(row, column, ?status, "opponent move received");
        self.renderer
            .notice(&format!("Opponent played column {}.", column + 1));
        Ok(report)
    }

    async fn read_status(&mut self) -> Result<StatusCode, ClientError> {
        match read_message(&mut self.stream, MessageType::Status).await? {
            SessionMessage::Status(code) => Ok(code),
            other => Err(unexpected(MessageType::Status, other)),
        }
    }

    fn render(&mut self) {
        self.renderer
            .render(self.mirror.board(), &self.mirror.state());
    }
}

fn unexpected(expected: MessageType, got: SessionMessage) -> ClientError {
    ClientError::Desync(format!("expected {expected:?}, decoded {got:?}"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

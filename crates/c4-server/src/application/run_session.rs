//! RunSessionUseCase: the authoritative game loop for one pair of players.
//!
//! The session owns the only [`TurnCoordinator`] that decides the game.  Both
//! players are plain byte streams; the session reads MOVE messages from the
//! active player and fans STATUS and MOVE_ECHO messages out to both.
//!
//! # Message flow (for beginners)
//!
//! ```text
//!              P1                 server                 P2
//!               │◄──── START ───────┤                     │
//!               ├──── MOVE(c) ─────►│ invalid? read again │
//!               │                   ├── STATUS(PROCEED) ─►│
//!               │                   ├── MOVE_ECHO(r,c) ──►│
//!               │                   │◄──── MOVE(c) ───────┤
//!               │◄─ STATUS(PROCEED) ┤                     │
//!               │◄─ MOVE_ECHO(r,c) ─┤                     │
//!              ...                 ...                   ...
//!               ├──── MOVE(c) ─────►│ wins                │
//!               │◄── STATUS(P1WIN) ─┼── STATUS(P1WIN) ───►│
//!               │                   ├── MOVE_ECHO(r,c) ──►│
//! ```
//!
//! Invalid columns (off the board, negative, or full) are dropped silently
//! and the same player is read again.  The other player is never read while
//! it is not their turn.
//!
//! When the session ends, for any reason, both streams are dropped.  A peer
//! that is still waiting therefore sees EOF instead of hanging.

use c4_core::{
    read_message, write_message, FrameError, MessageType, MoveError, MoveReport, Outcome, PlayerId,
    ProtocolError, SessionMessage, StatusCode, Token, TurnCoordinator,
};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

/// Why a session ended without a result.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A player closed the connection or the socket failed.
    #[error("{player} disconnected: {source}")]
    ConnectionLost {
        player: PlayerId,
        #[source]
        source: std::io::Error,
    },

    /// A player sent bytes that do not decode as the expected message.
    #[error("{player} sent malformed data: {source}")]
    Protocol {
        player: PlayerId,
        #[source]
        source: ProtocolError,
    },

    /// A read produced a different message kind than the one requested.
    #[error("expected a move from {player}, got {got:?}")]
    UnexpectedMessage { player: PlayerId, got: MessageType },

    /// The engine refused a move for a reason other than a bad column.
    #[error("engine refused move: {0}")]
    Engine(#[from] MoveError),
}

impl SessionError {
    fn from_frame(player: PlayerId, err: FrameError) -> Self {
        match err {
            FrameError::ConnectionLost(source) => SessionError::ConnectionLost { player, source },
            FrameError::Protocol(source) => SessionError::Protocol { player, source },
        }
    }
}

/// One game between two connected players.
///
/// Player 1 always plays Red and moves first.
pub struct GameSession<S> {
    number: u64,
    player1: S,
    player2: S,
    game: TurnCoordinator,
}

impl<S> GameSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(number: u64, player1: S, player2: S) -> Self {
        Self {
            number,
            player1,
            player2,
            game: TurnCoordinator::new(PlayerId::One.token()),
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    /// Plays the game to completion.
    ///
    /// Consumes the session so both streams are closed on return.
    ///
    /// # Errors
    ///
    /// [`SessionError`] if either player disconnects or misbehaves.  The game
    /// is abandoned and no status is sent to the remaining player.
    pub async fn run(mut self) -> Result<Outcome, SessionError> {
        info!(session = self.number, "session started");
        self.send(PlayerId::One, &SessionMessage::Start).await?;

        loop {
            let mover = PlayerId::from_token(self.game.active_token());
            let waiter = mover.other();
            let report = self.next_valid_move(mover).await?;

            let status = SessionMessage::Status(StatusCode::from_outcome(report.outcome));
            let echo = SessionMessage::MoveEcho {
                row: report.placement.row as i32,
                column: report.placement.column as i32,
            };

            if let Some(outcome) = report.outcome {
                self.send(mover, &status).await?;
                self.send(waiter, &status).await?;
                self.send(waiter, &echo).await?;
                info!(
                    session = self.number,
                    %outcome,
                    moves = self.game.state().move_count,
                    "session finished"
                );
                return Ok(outcome);
            }

            self.send(waiter, &status).await?;
            self.send(waiter, &echo).await?;
        }
    }

    /// Reads from `mover` until a column the engine accepts arrives.
    async fn next_valid_move(&mut self, mover: PlayerId) -> Result<MoveReport, SessionError> {
        let number = self.number;
        loop {
            let msg = read_message(self.stream(mover), MessageType::Move)
                .await
                .map_err(|e| SessionError::from_frame(mover, e))?;
            let SessionMessage::Move { column } = msg else {
                return Err(SessionError::UnexpectedMessage {
                    player: mover,
                    got: msg.message_type(),
                });
            };

            let Ok(index) = usize::try_from(column) else {
                warn!(session = number, player = %mover, column, "negative column ignored");
                continue;
            };

            match self.game.submit(index) {
                Ok(report) => {
                    debug!(
                        session = number,
                        player = %mover,
                        row = report.placement.row,
                        column = index,
                        "move applied"
                    );
                    return Ok(report);
                }
                Err(err @ (MoveError::InvalidColumn { .. } | MoveError::ColumnFull { .. })) => {
                    warn!(session = number, player = %mover, "move rejected: {err}");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn send(&mut self, to: PlayerId, msg: &SessionMessage) -> Result<(), SessionError> {
        write_message(self.stream(to), msg)
            .await
            .map_err(|e| SessionError::from_frame(to, e))
    }

    fn stream(&mut self, player: PlayerId) -> &mut S {
        match player {
            PlayerId::One => &mut self.player1,
            PlayerId::Two => &mut self.player2,
        }
    }

    /// The token whose turn it currently is.
    pub fn active_token(&self) -> Token {
        self.game.active_token()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use c4_core::{BoardEngine, MAX_MOVES, ROWS};
    use tokio::io::DuplexStream;
    use tokio::task::JoinHandle;
    use tokio::time::timeout;

    use super::*;

    /// A full-board game with no four-in-a-row at any point (Red first).
    const DRAW_SEQUENCE: [usize; MAX_MOVES] = [
        5, 3, 2, 3, 1, 5, 3, 1, 0, 1, 4, 1, 2, 5, 0, 5, 6, 6, 2, 0, 6, 0, 4, 2, 3, 0, 3, 4, 2,
        3, 2, 6, 0, 4, 1, 1, 5, 4, 4, 5, 6, 6,
    ];

    const STEP: Duration = Duration::from_secs(5);

    fn start_session() -> (
        JoinHandle<Result<Outcome, SessionError>>,
        DuplexStream,
        DuplexStream,
    ) {
        let (p1, server_p1) = tokio::io::duplex(64);
        let (p2, server_p2) = tokio::io::duplex(64);
        let session = GameSession::new(1, server_p1, server_p2);
        (tokio::spawn(session.run()), p1, p2)
    }

    async fn send_move(stream: &mut DuplexStream, column: i32) {
        write_message(stream, &SessionMessage::Move { column })
            .await
            .unwrap();
    }

    async fn expect_status(stream: &mut DuplexStream, code: StatusCode) {
        let msg = timeout(STEP, read_message(stream, MessageType::Status))
            .await
            .expect("status should arrive")
            .unwrap();
        assert_eq!(msg, SessionMessage::Status(code));
    }

    async fn expect_echo(stream: &mut DuplexStream, row: i32, column: i32) {
        let msg = timeout(STEP, read_message(stream, MessageType::MoveEcho))
            .await
            .expect("echo should arrive")
            .unwrap();
        assert_eq!(msg, SessionMessage::MoveEcho { row, column });
    }

    async fn expect_start(stream: &mut DuplexStream) {
        let msg = timeout(STEP, read_message(stream, MessageType::Start))
            .await
            .expect("start should arrive")
            .unwrap();
        assert_eq!(msg, SessionMessage::Start);
    }

    #[tokio::test]
    async fn test_vertical_win_notifies_both_players() {
        // Arrange
        let (session, mut p1, mut p2) = start_session();
        expect_start(&mut p1).await;

        // Act: P1 stacks column 0, P2 stacks column 1.
        for turn in 0..3 {
            let row = 5 - turn;
            send_move(&mut p1, 0).await;
            expect_status(&mut p2, StatusCode::Proceed).await;
            expect_echo(&mut p2, row, 0).await;

            send_move(&mut p2, 1).await;
            expect_status(&mut p1, StatusCode::Proceed).await;
            expect_echo(&mut p1, row, 1).await;
        }
        send_move(&mut p1, 0).await;

        // Assert: the mover gets only the status, the waiter also gets the echo.
        expect_status(&mut p1, StatusCode::P1Win).await;
        expect_status(&mut p2, StatusCode::P1Win).await;
        expect_echo(&mut p2, 2, 0).await;

        let outcome = session.await.unwrap().unwrap();
        assert_eq!(outcome, Outcome::Win(Token::Red));

        // Both streams are closed after the game.
        assert!(read_message(&mut p1, MessageType::Status).await.is_err());
        assert!(read_message(&mut p2, MessageType::Status).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_columns_are_reread_from_the_same_player() {
        let (_session, mut p1, mut p2) = start_session();
        expect_start(&mut p1).await;

        send_move(&mut p1, 7).await;
        send_move(&mut p1, -1).await;
        send_move(&mut p1, 3).await;
        expect_status(&mut p2, StatusCode::Proceed).await;
        expect_echo(&mut p2, 5, 3).await;

        // Player 2's invalid move must be re-read from player 2, not player 1.
        send_move(&mut p2, 100).await;
        send_move(&mut p2, 3).await;
        expect_status(&mut p1, StatusCode::Proceed).await;
        expect_echo(&mut p1, 4, 3).await;
    }

    #[tokio::test]
    async fn test_full_column_is_rejected_silently() {
        let (_session, mut p1, mut p2) = start_session();
        expect_start(&mut p1).await;

        // Fill column 0 with alternating tokens.
        for row in (0..ROWS as i32).rev().step_by(2) {
            send_move(&mut p1, 0).await;
            expect_status(&mut p2, StatusCode::Proceed).await;
            expect_echo(&mut p2, row, 0).await;
            send_move(&mut p2, 0).await;
            expect_status(&mut p1, StatusCode::Proceed).await;
            expect_echo(&mut p1, row - 1, 0).await;
        }

        send_move(&mut p1, 0).await;
        send_move(&mut p1, 6).await;
        expect_status(&mut p2, StatusCode::Proceed).await;
        expect_echo(&mut p2, 5, 6).await;
    }

    #[tokio::test]
    async fn test_draw_ends_on_player_two_move() {
        let (session, mut p1, mut p2) = start_session();
        expect_start(&mut p1).await;
        let mut mirror = BoardEngine::new();
        let mut token = Token::Red;

        for (index, &column) in DRAW_SEQUENCE.iter().enumerate() {
            let row = mirror.apply_move(column, token).unwrap().row as i32;
            token = token.other();
            let (mover, waiter) = if index % 2 == 0 {
                (&mut p1, &mut p2)
            } else {
                (&mut p2, &mut p1)
            };

            send_move(mover, column as i32).await;
            if index + 1 < MAX_MOVES {
                expect_status(waiter, StatusCode::Proceed).await;
                expect_echo(waiter, row, column as i32).await;
            } else {
                expect_status(mover, StatusCode::Draw).await;
                expect_status(waiter, StatusCode::Draw).await;
                expect_echo(waiter, row, column as i32).await;
            }
        }

        assert_eq!(session.await.unwrap().unwrap(), Outcome::Draw);
    }

    #[tokio::test]
    async fn test_disconnect_aborts_session_and_closes_peer() {
        let (session, mut p1, mut p2) = start_session();
        expect_start(&mut p1).await;

        drop(p1);

        let err = session.await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            SessionError::ConnectionLost {
                player: PlayerId::One,
                ..
            }
        ));
        let eof = timeout(STEP, read_message(&mut p2, MessageType::Status))
            .await
            .expect("peer must not hang");
        assert!(matches!(eof, Err(FrameError::ConnectionLost(_))));
    }

    #[tokio::test]
    async fn test_new_session_waits_for_red() {
        let (a, _) = tokio::io::duplex(8);
        let (b, _) = tokio::io::duplex(8);
        let session = GameSession::new(9, a, b);
        assert_eq!(session.number(), 9);
        assert_eq!(session.active_token(), Token::Red);
    }
}

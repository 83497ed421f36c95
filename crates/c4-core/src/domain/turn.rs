//! TurnCoordinator: whose turn it is, and when the game stops.
//!
//! The coordinator wraps a [`BoardEngine`] and owns the *active token*.  Every
//! accepted move hands the turn to the other token unless that move ended the
//! game, in which case the coordinator enters its terminal phase and refuses
//! everything that follows.
//!
//! ```text
//!   WaitingForMove(Red) ──accepted──▶ WaitingForMove(Yellow) ──accepted──▶ ...
//!          │  ▲                                │
//!          └──┘ rejected (same token retries)  └──win / 42nd move──▶ Terminal
//! ```

use rand::Rng;
use tracing::debug;

use super::board::{BoardEngine, MoveError, Outcome, Placement, Token};

/// The coordinator's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The given token is expected to move next.
    WaitingForMove(Token),
    /// The game is over; no further moves are accepted.
    Terminal(Outcome),
}

/// A snapshot of the turn bookkeeping.
///
/// Once the game is terminal, `active` keeps the token that made the final
/// move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub active: Token,
    pub move_count: usize,
    pub terminal: Option<Outcome>,
}

impl TurnState {
    pub fn phase(&self) -> Phase {
        match self.terminal {
            Some(outcome) => Phase::Terminal(outcome),
            None => Phase::WaitingForMove(self.active),
        }
    }
}

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub placement: Placement,
    /// `Some` when this move won or drew the game.
    pub outcome: Option<Outcome>,
}

/// Alternates turns between Red and Yellow over one board.
#[derive(Debug, Clone)]
pub struct TurnCoordinator {
    board: BoardEngine,
    active: Token,
}

impl TurnCoordinator {
    /// Starts a fresh game in which `first` moves first.
    pub fn new(first: Token) -> Self {
        Self {
            board: BoardEngine::new(),
            active: first,
        }
    }

    /// Starts a fresh game with the first token chosen uniformly at random.
    pub fn with_random_first<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first = if rng.gen_bool(0.5) {
            Token::Red
        } else {
            Token::Yellow
        };
        Self::new(first)
    }

    /// Applies `column` for the active token.
    ///
    /// On success the turn passes to the other token, unless the move ended
    /// the game.  On failure nothing changes and the same token must try
    /// again.
    ///
    /// # Errors
    ///
    /// Any [`MoveError`] from [`BoardEngine::apply_move`].
    pub fn submit(&mut self, column: usize) -> Result<MoveReport, MoveError> {
        let placement = self.board.apply_move(column, self.active)?;
        let outcome = self.board.outcome();

        debug!(
            token = %placement.token,
            row = placement.row,
            column = placement.column,
            move_count = self.board.move_count(),
            "move accepted"
        );

        if outcome.is_none() {
            self.active = self.active.other();
        }

        Ok(MoveReport { placement, outcome })
    }

    pub fn state(&self) -> TurnState {
        TurnState {
            active: self.active,
            move_count: self.board.move_count(),
            terminal: self.board.outcome(),
        }
    }

    pub fn board(&self) -> &BoardEngine {
        &self.board
    }

    pub fn active_token(&self) -> Token {
        self.active
    }

    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.board.outcome()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::domain::board::MAX_MOVES;

    /// A full-board game with no four-in-a-row at any point (Red first).
    const DRAW_SEQUENCE: [usize; MAX_MOVES] = [
        5, 3, 2, 3, 1, 5, 3, 1, 0, 1, 4, 1, 2, 5, 0, 5, 6, 6, 2, 0, 6, 0, 4, 2, 3, 0, 3, 4, 2, 3,
        2, 6, 0, 4, 1, 1, 5, 4, 4, 5, 6, 6,
    ];

    #[test]
    fn test_accepted_moves_alternate_tokens() {
        let mut game = TurnCoordinator::new(Token::Red);

        let first = game.submit(0).unwrap();
        assert_eq!(first.placement.token, Token::Red);
        assert_eq!(game.active_token(), Token::Yellow);

        let second = game.submit(0).unwrap();
        assert_eq!(second.placement.token, Token::Yellow);
        assert_eq!(second.placement.row, 4);
        assert_eq!(game.active_token(), Token::Red);
    }

    #[test]
    fn test_rejected_move_keeps_the_same_token_active() {
        let mut game = TurnCoordinator::new(Token::Yellow);

        assert_eq!(
            game.submit(9),
            Err(MoveError::InvalidColumn { column: 9 })
        );
        assert_eq!(game.active_token(), Token::Yellow);
        assert_eq!(game.state().move_count, 0);
    }

    #[test]
    fn test_vertical_win_enters_terminal_phase() {
        // Arrange: Red stacks column 0 while Yellow plays column 1.
        let mut game = TurnCoordinator::new(Token::Red);
        for _ in 0..3 {
            game.submit(0).unwrap();
            game.submit(1).unwrap();
        }

        // Act
        let report = game.submit(0).unwrap();

        // Assert
        assert_eq!(report.outcome, Some(Outcome::Win(Token::Red)));
        assert_eq!(game.state().phase(), Phase::Terminal(Outcome::Win(Token::Red)));
        assert_eq!(game.state().active, Token::Red, "last mover stays recorded");
        assert_eq!(game.submit(2), Err(MoveError::GameAlreadyTerminal));
    }

    #[test]
    fn test_full_board_without_a_line_is_a_draw() {
        let mut game = TurnCoordinator::new(Token::Red);
        let mut expected = Token::Red;

        for (index, &column) in DRAW_SEQUENCE.iter().enumerate() {
            let report = game.submit(column).unwrap();
            assert_eq!(report.placement.token, expected, "move {} out of turn", index + 1);
            expected = expected.other();
            if index + 1 < MAX_MOVES {
                assert_eq!(report.outcome, None, "move {} ended the game early", index + 1);
            } else {
                assert_eq!(report.outcome, Some(Outcome::Draw));
                assert_eq!(report.placement.token, Token::Yellow);
            }
        }

        assert!(game.board().is_draw());
        assert_eq!(game.submit(0), Err(MoveError::GameAlreadyTerminal));
    }

    #[test]
    fn test_waiting_phase_names_active_token() {
        let game = TurnCoordinator::new(Token::Yellow);
        assert_eq!(game.state().phase(), Phase::WaitingForMove(Token::Yellow));
    }

    #[test]
    fn test_random_first_is_reproducible_and_covers_both_tokens() {
        let pick = |seed| TurnCoordinator::with_random_first(&mut StdRng::seed_from_u64(seed)).active_token();

        assert_eq!(pick(7), pick(7));
        let firsts: Vec<Token> = (0..64).map(pick).collect();
        assert!(firsts.contains(&Token::Red));
        assert!(firsts.contains(&Token::Yellow));
    }
}

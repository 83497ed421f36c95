//! RandomMovePlayer: the computer opponent.
//!
//! The player samples a column uniformly from `0..COLS`.  When the sampled
//! column is full it simply samples again, so over many games every open
//! column is chosen equally often.  Randomness comes from an injectable
//! [`Rng`] so tests can seed it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::board::{BoardEngine, MoveError, COLS};
use super::turn::{MoveReport, TurnCoordinator};

/// Picks uniformly random legal columns.
#[derive(Debug, Clone)]
pub struct RandomMovePlayer<R = StdRng> {
    rng: R,
}

impl RandomMovePlayer<StdRng> {
    /// A player seeded from operating-system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A player whose choices are fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomMovePlayer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomMovePlayer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// One raw sample from `0..COLS`, which may name a full column.
    pub fn sample_column(&mut self) -> usize {
        self.rng.gen_range(0..COLS)
    }

    /// Samples until a column with space is found.
    ///
    /// Returns `None` when the game is over or every column is full.
    pub fn pick_column(&mut self, board: &BoardEngine) -> Option<usize> {
        if board.is_terminal() || (0..COLS).all(|column| board.is_column_full(column)) {
            return None;
        }
        loop {
            let column = self.sample_column();
            if !board.is_column_full(column) {
                return Some(column);
            }
            trace!(column, "sampled full column, resampling");
        }
    }

    /// Submits a random column for the coordinator's active token.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameAlreadyTerminal`] if the game is already over.
    pub fn play(&mut self, game: &mut TurnCoordinator) -> Result<MoveReport, MoveError> {
        loop {
            match game.submit(self.sample_column()) {
                Err(MoveError::ColumnFull { column }) => {
                    trace!(column, "sampled full column, resampling");
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Token;

    #[test]
    fn test_same_seed_gives_same_columns() {
        let mut a = RandomMovePlayer::seeded(42);
        let mut b = RandomMovePlayer::seeded(42);
        let first: Vec<usize> = (0..20).map(|_| a.sample_column()).collect();
        let second: Vec<usize> = (0..20).map(|_| b.sample_column()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_samples_cover_every_column() {
        let mut player = RandomMovePlayer::seeded(3);
        let mut seen = [false; COLS];
        for _ in 0..1_000 {
            seen[player.sample_column()] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_pick_column_skips_full_columns() {
        // Arrange: fill every column except 6 without making four in a row.
        let mut board = BoardEngine::new();
        let mut token = Token::Red;
        for column in 0..COLS - 1 {
            for _ in 0..3 {
                board.apply_move(column, token).unwrap();
                board.apply_move(column, token).unwrap();
                token = token.other();
            }
        }
        assert!(board.outcome().is_none());

        // Act / Assert
        let mut player = RandomMovePlayer::seeded(11);
        for _ in 0..50 {
            assert_eq!(player.pick_column(&board), Some(COLS - 1));
        }
    }

    #[test]
    fn test_pick_column_on_finished_game_is_none() {
        let mut game = TurnCoordinator::new(Token::Red);
        for _ in 0..3 {
            game.submit(0).unwrap();
            game.submit(1).unwrap();
        }
        game.submit(0).unwrap();

        let mut player = RandomMovePlayer::seeded(1);
        assert_eq!(player.pick_column(game.board()), None);
        assert_eq!(player.play(&mut game), Err(MoveError::GameAlreadyTerminal));
    }

    #[test]
    fn test_two_random_players_always_finish_a_game() {
        for seed in 0..25 {
            let mut game = TurnCoordinator::new(Token::Red);
            let mut player = RandomMovePlayer::seeded(seed);
            while !game.is_terminal() {
                player.play(&mut game).unwrap();
            }
            assert!(game.outcome().is_some());
            assert!(game.state().move_count <= crate::domain::board::MAX_MOVES);
        }
    }
}

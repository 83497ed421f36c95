//! ComputerMoveSource: the random computer player behind the `MoveSource` seam.

use async_trait::async_trait;
use c4_core::{BoardEngine, RandomMovePlayer};
use rand::Rng;
use tracing::debug;

use crate::application::ports::{ColumnEvent, InputError, MoveSource};

/// Answers every request with a uniformly random column that has space.
pub struct ComputerMoveSource<R = rand::rngs::StdRng> {
    player: RandomMovePlayer<R>,
}

impl<R: Rng> ComputerMoveSource<R> {
    pub fn new(player: RandomMovePlayer<R>) -> Self {
        Self { player }
    }
}

#[async_trait]
impl<R: Rng + Send> MoveSource for ComputerMoveSource<R> {
    async fn next_choice(&mut self, board: &BoardEngine) -> Result<ColumnEvent, InputError> {
        let column = self.player.pick_column(board).ok_or(InputError::Closed)?;
        debug!(column, "computer chose column");
        Ok(ColumnEvent::Column(column))
    }

    fn label(&self) -> &str {
        "Computer"
    }
}

#[cfg(test)]
mod tests {
    use c4_core::{Token, COLS};

    use super::*;

    #[tokio::test]
    async fn test_computer_only_offers_open_columns() {
        // Arrange: fill column 2.
        let mut board = BoardEngine::new();
        let mut token = Token::Red;
        for _ in 0..6 {
            board.apply_move(2, token).unwrap();
            token = token.other();
        }
        let mut source = ComputerMoveSource::new(RandomMovePlayer::seeded(5));

        // Act / Assert
        for _ in 0..100 {
            match source.next_choice(&board).await.unwrap() {
                ColumnEvent::Column(column) => {
                    assert!(column < COLS);
                    assert_ne!(column, 2);
                }
                ColumnEvent::Exit => panic!("computer never exits"),
            }
        }
    }

    #[tokio::test]
    async fn test_computer_on_finished_board_is_closed() {
        let mut board = BoardEngine::new();
        for _ in 0..4 {
            board.apply_move(0, Token::Red).unwrap();
        }
        assert!(board.is_terminal());
        let mut source = ComputerMoveSource::new(RandomMovePlayer::seeded(1));
        assert!(matches!(
            source.next_choice(&board).await,
            Err(InputError::Closed)
        ));
        assert_eq!(source.label(), "Computer");
    }
}

//! How a client-side game finishes, and the messages shown when it does.

use c4_core::protocol::FrameError;
use c4_core::{MoveError, Outcome, ProtocolError, Token};
use thiserror::Error;

use crate::application::ports::InputError;

/// Normal ways for a game driver to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// The game reached a win or a draw.
    Finished(Outcome),
    /// The player chose to leave.
    Quit,
}

/// Fatal errors from the client drivers.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("lost connection to the server: {0}")]
    ConnectionLost(#[source] std::io::Error),

    #[error("server sent malformed data: {0}")]
    Protocol(#[from] ProtocolError),

    /// The server's view of the game disagrees with the local mirror.
    #[error("local board out of sync with the server: {0}")]
    Desync(String),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("move refused: {0}")]
    Move(#[from] MoveError),
}

impl From<FrameError> for ClientError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::ConnectionLost(source) => ClientError::ConnectionLost(source),
            FrameError::Protocol(source) => ClientError::Protocol(source),
        }
    }
}

/// Final message for `outcome`.  With `me` set the message is written from
/// that player's point of view.
pub fn outcome_message(outcome: Outcome, me: Option<Token>) -> String {
    match (outcome, me) {
        (Outcome::Draw, _) => "The game is a draw.".to_string(),
        (Outcome::Win(winner), Some(me)) if winner == me => "You win!".to_string(),
        (Outcome::Win(winner), Some(_)) => format!("You lose. {} ({}) wins.", winner, winner.symbol()),
        (Outcome::Win(winner), None) => format!("{} ({}) wins!", winner, winner.symbol()),
    }
}

/// Re-prompt text for a recoverable move rejection; `None` if the error is
/// fatal.
pub fn rejection_notice(err: MoveError) -> Option<String> {
    match err {
        MoveError::InvalidColumn { column } => Some(format!(
            "Column {} is not on the board. Select again.",
            column + 1
        )),
        MoveError::ColumnFull { column } => {
            Some(format!("Column {} is full. Select again.", column + 1))
        }
        MoveError::GameAlreadyTerminal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_message_from_each_perspective() {
        let red_wins = Outcome::Win(Token::Red);
        assert_eq!(outcome_message(red_wins, Some(Token::Red)), "You win!");
        assert_eq!(
            outcome_message(red_wins, Some(Token::Yellow)),
            "You lose. Red (X) wins."
        );
        assert_eq!(outcome_message(red_wins, None), "Red (X) wins!");
        assert_eq!(outcome_message(Outcome::Draw, None), "The game is a draw.");
    }

    #[test]
    fn test_rejection_notice_is_one_based() {
        assert_eq!(
            rejection_notice(MoveError::ColumnFull { column: 0 }).unwrap(),
            "Column 1 is full. Select again."
        );
        assert!(rejection_notice(MoveError::GameAlreadyTerminal).is_none());
    }
}

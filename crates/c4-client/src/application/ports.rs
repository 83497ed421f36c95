//! Trait seams between the game drivers and the outside world.
//!
//! The drivers in this layer depend only on these traits.  Terminal-backed
//! implementations live in `infrastructure::console`; tests substitute
//! mocks or scripted sources.

use std::io;

use async_trait::async_trait;
use c4_core::{BoardEngine, TurnState};
use thiserror::Error;

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEvent {
    /// A 0-based column.
    Column(usize),
    /// The player wants to leave the game.
    Exit,
}

/// Problems reading a column choice.
///
/// `MalformedInput` and `OutOfRange` are recoverable: show the message and
/// ask again.  `Closed` and `Io` end the game.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("'{0}' is not a column number")]
    MalformedInput(String),

    /// Carries the 1-based number the player typed.
    #[error("column {0} is not on the board; choose 1-7")]
    OutOfRange(i64),

    /// The source can produce no more choices (EOF, thread gone, no legal move).
    #[error("input closed")]
    Closed,

    #[error("input error: {0}")]
    Io(#[from] io::Error),
}

impl InputError {
    /// `true` for errors worth re-prompting on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, InputError::MalformedInput(_) | InputError::OutOfRange(_))
    }
}

/// Blocking source of column choices, used by the local driver.
pub trait ColumnPrompt {
    fn next_event(&mut self) -> Result<ColumnEvent, InputError>;
}

/// Displays the board and free-form notices.
#[cfg_attr(test, mockall::automock)]
pub trait BoardRenderer: Send {
    fn render(&mut self, board: &BoardEngine, state: &TurnState);

    fn notice(&mut self, message: &str);
}

/// Produces the next column choice for one player.
#[async_trait]
pub trait MoveSource: Send {
    /// Waits for the player's next choice.  `board` is the current position,
    /// for sources that look at it.
    async fn next_choice(&mut self, board: &BoardEngine) -> Result<ColumnEvent, InputError>;

    /// Short label used in notices, such as "Computer".
    fn label(&self) -> &str {
        "You"
    }
}

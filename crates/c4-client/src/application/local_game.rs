//! LocalGameUseCase: a whole game in one process.
//!
//! Two people take turns at the same prompt, or one person plays Red against
//! the random computer playing Yellow.  Which token moves first is decided by
//! the [`TurnCoordinator`] handed in (the binary picks it at random).
//!
//! Bad input never ends the game: a malformed line, an out-of-range number,
//! or a full column produces a notice and the same player is asked again.

use c4_core::{RandomMovePlayer, Token, TurnCoordinator};
use tracing::info;

use crate::application::game_end::{outcome_message, rejection_notice, ClientError, GameEnd};
use crate::application::ports::{BoardRenderer, ColumnEvent, ColumnPrompt};

/// The computer always plays this token.
pub const COMPUTER_TOKEN: Token = Token::Yellow;

pub struct LocalGame<P, V> {
    game: TurnCoordinator,
    prompt: P,
    renderer: V,
    computer: Option<RandomMovePlayer>,
}

impl<P: ColumnPrompt, V: BoardRenderer> LocalGame<P, V> {
    pub fn new(game: TurnCoordinator, prompt: P, renderer: V) -> Self {
        Self {
            game,
            prompt,
            renderer,
            computer: None,
        }
    }

    /// Lets `player` make Yellow's moves.
    pub fn with_computer(mut self, player: RandomMovePlayer) -> Self {
        self.computer = Some(player);
        self
    }

    pub fn game(&self) -> &TurnCoordinator {
        &self.game
    }

    /// Runs the game until it is won, drawn, or the player quits.
    ///
    /// # Errors
    ///
    /// [`ClientError::Input`] if the prompt closes or fails.
    pub fn play(&mut self) -> Result<GameEnd, ClientError> {
        info!(
            first = %self.game.active_token(),
            computer = self.computer.is_some(),
            "local game started"
        );

        loop {
            self.renderer.render(self.game.board(), &self.game.state());

            if let Some(outcome) = self.game.outcome() {
                self.renderer.notice(&outcome_message(outcome, None));
                info!(%outcome, "local game finished");
                return Ok(GameEnd::Finished(outcome));
            }

            let active = self.game.active_token();
            if let Some(computer) = self.computer.as_mut().filter(|_| active == COMPUTER_TOKEN) {
                let report = computer.play(&mut self.game)?;
                self.renderer.notice(&format!(
                    "Computer played column {}.",
                    report.placement.column + 1
                ));
                continue;
            }

            self.renderer.notice(&format!(
                "{} ({}), choose a column (1-7, q to quit):",
                active,
                active.symbol()
            ));

            match self.prompt.next_event() {
                Ok(ColumnEvent::Exit) => {
                    info!("player quit local game");
                    return Ok(GameEnd::Quit);
                }
                Ok(ColumnEvent::Column(column)) => {
                    if let Err(err) = self.game.submit(column) {
                        let notice = rejection_notice(err).ok_or(ClientError::Move(err))?;
                        self.renderer.notice(&notice);
                    }
                }
                Err(err) if err.is_recoverable() => {
                    self.renderer.notice(&format!("{err}. Select again."));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

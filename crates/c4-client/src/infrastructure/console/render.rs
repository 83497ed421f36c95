//! Text board renderer.
//!
//! ```text
//!  1 2 3 4 5 6 7
//! | | | | | | | |
//! | | | | | | | |
//! | | | | | | | |
//! | | | |O| | | |
//! | | |O|X| | | |
//! | |X|X|O| | | |
//! ---------------
//! Red (X): 18 tokens left   Yellow (O): 18 tokens left
//! Next: Red (X)
//! ```

use std::io::{self, Write};

use c4_core::{BoardEngine, Phase, Token, TurnState, COLS};
use tracing::warn;

use crate::application::ports::BoardRenderer;

/// Writes boards and notices as plain text.
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write + Send> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_board(&mut self, board: &BoardEngine, state: &TurnState) -> io::Result<()> {
        let header: String = (1..=COLS).map(|n| format!(" {n}")).collect();
        writeln!(self.out, "{header}")?;

        for row in board.rows() {
            let cells: String = row.iter().map(|cell| format!("|{}", cell.symbol())).collect();
            writeln!(self.out, "{cells}|")?;
        }
        writeln!(self.out, "{}", "-".repeat(2 * COLS + 1))?;

        writeln!(
            self.out,
            "{}   {}",
            tokens_line(board, Token::Red),
            tokens_line(board, Token::Yellow)
        )?;
        if let Phase::WaitingForMove(token) = state.phase() {
            writeln!(self.out, "Next: {} ({})", token, token.symbol())?;
        }
        self.out.flush()
    }
}

fn tokens_line(board: &BoardEngine, token: Token) -> String {
    format!(
        "{} ({}): {} tokens left",
        token,
        token.symbol(),
        board.tokens_remaining(token)
    )
}

impl<W: Write + Send> BoardRenderer for TextRenderer<W> {
    fn render(&mut self, board: &BoardEngine, state: &TurnState) {
        if let Err(e) = self.write_board(board, state) {
            warn!("failed to draw board: {e}");
        }
    }

    fn notice(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{message}").and_then(|()| self.out.flush()) {
            warn!("failed to write notice: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use c4_core::TurnCoordinator;

    use super::*;

    fn render_to_string(game: &TurnCoordinator) -> String {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(game.board(), &game.state());
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_board_layout() {
        let text = render_to_string(&TurnCoordinator::new(Token::Red));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], " 1 2 3 4 5 6 7");
        assert_eq!(lines[1], "| | | | | | | |");
        assert_eq!(lines[7], "---------------");
        assert_eq!(
            lines[8],
            "Red (X): 21 tokens left   Yellow (O): 21 tokens left"
        );
        assert_eq!(lines[9], "Next: Red (X)");
    }

    #[test]
    fn test_tokens_appear_at_the_bottom() {
        // Arrange
        let mut game = TurnCoordinator::new(Token::Red);
        game.submit(1).unwrap();
        game.submit(1).unwrap();
        game.submit(3).unwrap();

        // Act
        let text = render_to_string(&game);
        let lines: Vec<&str> = text.lines().collect();

        // Assert
        assert_eq!(lines[5], "| |O| | | | | |");
        assert_eq!(lines[6], "| |X| |X| | | |");
        assert!(lines[8].starts_with("Red (X): 19 tokens left"));
        assert_eq!(lines[9], "Next: Yellow (O)");
    }

    #[test]
    fn test_finished_game_has_no_next_line() {
        let mut game = TurnCoordinator::new(Token::Yellow);
        for _ in 0..3 {
            game.submit(0).unwrap();
            game.submit(1).unwrap();
        }
        game.submit(0).unwrap();

        let text = render_to_string(&game);
        assert!(!text.contains("Next:"));
    }

    #[test]
    fn test_notice_is_written_as_a_line() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.notice("Column 3 is full. Select again.");
        assert_eq!(
            String::from_utf8(renderer.into_inner()).unwrap(),
            "Column 3 is full. Select again.\n"
        );
    }
}

//! Line-based column input.
//!
//! Players type columns as `1`..`7`; everything handed to the rest of the
//! program is 0-based.  `q` or `quit` (any case) asks to leave the game.

use std::io::BufRead;

use c4_core::COLS;

use crate::application::ports::{ColumnEvent, ColumnPrompt, InputError};

/// Parses one line of player input.
///
/// # Errors
///
/// [`InputError::MalformedInput`] for anything that is not a number or a quit
/// command, [`InputError::OutOfRange`] for numbers outside `1..=7`.
pub fn parse_column(line: &str) -> Result<ColumnEvent, InputError> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Ok(ColumnEvent::Exit);
    }

    let number: i64 = trimmed
        .parse()
        .map_err(|_| InputError::MalformedInput(trimmed.to_string()))?;
    if !(1..=COLS as i64).contains(&number) {
        return Err(InputError::OutOfRange(number));
    }
    Ok(ColumnEvent::Column((number - 1) as usize))
}

/// Reads column choices one line at a time.
pub struct ColumnInput<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> ColumnInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> ColumnPrompt for ColumnInput<R> {
    /// Reads and parses the next line.
    ///
    /// # Errors
    ///
    /// [`InputError::Closed`] at end of input, [`InputError::Io`] if reading
    /// fails, otherwise whatever [`parse_column`] reports.
    fn next_event(&mut self) -> Result<ColumnEvent, InputError> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Err(InputError::Closed);
        }
        parse_column(&self.line)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_one_based_input_becomes_zero_based() {
        assert_eq!(parse_column("1").unwrap(), ColumnEvent::Column(0));
        assert_eq!(parse_column(" 7 \n").unwrap(), ColumnEvent::Column(6));
    }

    #[test]
    fn test_quit_commands() {
        assert_eq!(parse_column("q").unwrap(), ColumnEvent::Exit);
        assert_eq!(parse_column("QUIT\n").unwrap(), ColumnEvent::Exit);
    }

    #[test]
    fn test_out_of_range_numbers() {
        assert!(matches!(parse_column("0"), Err(InputError::OutOfRange(0))));
        assert!(matches!(parse_column("8"), Err(InputError::OutOfRange(8))));
        assert!(matches!(parse_column("-3"), Err(InputError::OutOfRange(-3))));
    }

    #[test]
    fn test_non_numeric_input_is_malformed() {
        let err = parse_column("four").unwrap_err();
        assert!(matches!(&err, InputError::MalformedInput(text) if text == "four"));
        assert!(err.is_recoverable());
        assert!(matches!(parse_column(""), Err(InputError::MalformedInput(_))));
    }

    #[test]
    fn test_column_input_reads_line_by_line_until_eof() {
        // Arrange
        let mut input = ColumnInput::new(Cursor::new("abc\n9\n3\nq\n"));

        // Act / Assert
        assert!(matches!(input.next_event(), Err(InputError::MalformedInput(_))));
        assert!(matches!(input.next_event(), Err(InputError::OutOfRange(9))));
        assert_eq!(input.next_event().unwrap(), ColumnEvent::Column(2));
        assert_eq!(input.next_event().unwrap(), ColumnEvent::Exit);
        let closed = input.next_event().unwrap_err();
        assert!(matches!(closed, InputError::Closed));
        assert!(!closed.is_recoverable());
    }
}

//! BoardEngine: the 6x7 grid, gravity drops, and win/draw detection.
//!
//! Row 0 is the top of the board and row 5 the bottom, matching the order in
//! which the grid is printed.  A dropped token therefore lands in the
//! *highest-index* empty row of its column.
//!
//! # Win detection (for beginners)
//!
//! A new four-in-a-row can only ever pass through the cell that was just
//! filled, so [`BoardEngine::evaluate_win`] never scans the whole board.  For
//! each of the four line directions it walks outward from the placed cell in
//! both senses, counting matching tokens, and reports a win as soon as one
//! line reaches four.

use std::fmt;

use thiserror::Error;

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Number of columns on the board.
pub const COLS: usize = 7;

/// Moves needed to fill every cell.  Reaching it without a win is a draw.
pub const MAX_MOVES: usize = ROWS * COLS;

const CONNECT: usize = 4;

/// Line directions through a cell as (row step, column step).  Each one is
/// walked both ways, so "horizontal" also covers runs to the left.
const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),   // horizontal
    (1, 0),   // vertical
    (-1, 1),  // diagonal up-right
    (-1, -1), // diagonal up-left
];

// ── Tokens and cells ──────────────────────────────────────────────────────────

/// A player's piece identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Red,
    Yellow,
}

impl Token {
    /// Returns the opposing token.
    pub fn other(self) -> Token {
        match self {
            Token::Red => Token::Yellow,
            Token::Yellow => Token::Red,
        }
    }

    /// Single-character board symbol: `X` for Red, `O` for Yellow.
    pub fn symbol(self) -> char {
        match self {
            Token::Red => 'X',
            Token::Yellow => 'O',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Token::Red => "Red",
            Token::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of one board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The token occupying this cell, if any.
    pub fn token(self) -> Option<Token> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Token::Red),
            Cell::Yellow => Some(Token::Yellow),
        }
    }

    /// Board symbol; a space for an empty cell.
    pub fn symbol(self) -> char {
        self.token().map_or(' ', Token::symbol)
    }
}

impl From<Token> for Cell {
    fn from(token: Token) -> Self {
        match token {
            Token::Red => Cell::Red,
            Token::Yellow => Cell::Yellow,
        }
    }
}

// ── Move results ──────────────────────────────────────────────────────────────

/// Where an accepted move landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub token: Token,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Token),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(token) => write!(f, "{token} wins"),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

/// Result of [`BoardEngine::evaluate_win`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinCheck {
    Win,
    NoWin,
}

/// Reasons a move is rejected.  A rejected move never changes the board.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The requested column is outside `0..COLS`.
    #[error("column {column} is not on the board")]
    InvalidColumn { column: usize },

    /// Every cell of the requested column is occupied.
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    /// A previous move already won or drew the game.
    #[error("the game is already over")]
    GameAlreadyTerminal,
}

// ── BoardEngine ───────────────────────────────────────────────────────────────

/// Owns the grid and enforces the gravity and terminal-state rules.
///
/// The engine records the outcome of every accepted move, so once a game is
/// won or drawn every further [`apply_move`](Self::apply_move) is refused with
/// [`MoveError::GameAlreadyTerminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEngine {
    cells: [[Cell; COLS]; ROWS],
    move_count: usize,
    outcome: Option<Outcome>,
}

impl BoardEngine {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
            move_count: 0,
            outcome: None,
        }
    }

    /// Returns the cell at `(row, column)`, or `None` when off the board.
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.cells.get(row)?.get(column).copied()
    }

    /// Iterates the grid top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLS]> + '_ {
        self.cells.iter()
    }

    /// Number of accepted moves so far.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// `true` when `column` cannot take another token.  Columns off the board
    /// count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        column >= COLS || self.cells[0][column] != Cell::Empty
    }

    /// Validates a move without applying it and returns the row it would land
    /// in.
    ///
    /// # Errors
    ///
    /// Same as [`apply_move`](Self::apply_move).
    pub fn landing_row(&self, column: usize) -> Result<usize, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameAlreadyTerminal);
        }
        if column >= COLS {
            return Err(MoveError::InvalidColumn { column });
        }
        (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][column] == Cell::Empty)
            .ok_or(MoveError::ColumnFull { column })
    }

    /// Drops `token` into `column` and records the resulting outcome.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameAlreadyTerminal`] if the game was already won or drawn.
    /// - [`MoveError::InvalidColumn`] if `column >= COLS`.
    /// - [`MoveError::ColumnFull`] if the column has no empty cell.
    pub fn apply_move(&mut self, column: usize, token: Token) -> Result<Placement, MoveError> {
        let row = self.landing_row(column)?;
        self.cells[row][column] = token.into();
        self.move_count += 1;

        if self.evaluate_win(row, column, token) == WinCheck::Win {
            self.outcome = Some(Outcome::Win(token));
        } else if self.move_count == MAX_MOVES {
            self.outcome = Some(Outcome::Draw);
        }

        Ok(Placement { row, column, token })
    }

    /// Checks the four lines through `(row, column)` for four consecutive
    /// `token` cells.
    ///
    /// Returns [`WinCheck::NoWin`] if the cell itself is off the board or does
    /// not hold `token`.
    pub fn evaluate_win(&self, row: usize, column: usize, token: Token) -> WinCheck {
        if self.cell(row, column) != Some(Cell::from(token)) {
            return WinCheck::NoWin;
        }

        let connected = DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, column, dr, dc, token)
                + self.run_length(row, column, -dr, -dc, token)
                >= CONNECT
        });

        if connected {
            WinCheck::Win
        } else {
            WinCheck::NoWin
        }
    }

    /// `true` exactly when all 42 moves have been played without a win.
    pub fn is_draw(&self) -> bool {
        self.move_count == MAX_MOVES && !matches!(self.outcome, Some(Outcome::Win(_)))
    }

    /// Tokens `token` still has in hand; each player starts with 21.
    pub fn tokens_remaining(&self, token: Token) -> usize {
        let placed = self
            .cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::from(token))
            .count();
        (MAX_MOVES / 2).saturating_sub(placed)
    }

    /// Counts matching cells stepping away from `(row, column)`, excluding the
    /// start cell.  Stops after `CONNECT - 1` since more cannot change the
    /// answer.
    fn run_length(&self, row: usize, column: usize, dr: isize, dc: isize, token: Token) -> usize {
        let target = Cell::from(token);
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = column as isize + dc;
        while count < CONNECT - 1 && self.cell_at(r, c) == Some(target) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn cell_at(&self, row: isize, column: isize) -> Option<Cell> {
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        self.cell(row, column)
    }
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

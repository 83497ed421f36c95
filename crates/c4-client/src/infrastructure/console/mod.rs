//! Terminal adapters.
//!
//! - **`input`** – Parses typed 1-based column numbers (and `q` to quit) from
//!   any `BufRead`.
//! - **`render`** – Draws the board as text to any `Write`.
//! - **`source`** – Runs `input` on a dedicated thread and hands finished
//!   choices to the async online driver over a channel.

pub mod input;
pub mod render;
pub mod source;

pub use input::{parse_column, ColumnInput};
pub use render::TextRenderer;
pub use source::ConsoleMoveSource;

//! ConsoleMoveSource: keyboard input for the async online driver.
//!
//! Reading a terminal line blocks, so it runs on its own OS thread.  The
//! driver asks for a choice by sending a request; the thread reads one line,
//! parses it, and sends the result back.  Nothing is read while it is not
//! this player's turn.
//!
//! ```text
//!  driver (tokio task)            input thread
//!        │ ── request ───────────────► │ read_line()
//!        │ ◄── Result<ColumnEvent> ─── │
//! ```

use std::io::BufRead;

use async_trait::async_trait;
use c4_core::BoardEngine;
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::ports::{ColumnEvent, ColumnPrompt, InputError, MoveSource};
use crate::infrastructure::console::input::ColumnInput;

/// Keyboard-backed [`MoveSource`].
pub struct ConsoleMoveSource {
    requests: mpsc::Sender<()>,
    events: mpsc::Receiver<Result<ColumnEvent, InputError>>,
}

impl ConsoleMoveSource {
    /// Starts the input thread over `reader`.
    ///
    /// The thread exits when `reader` reaches EOF or the source is dropped.
    pub fn spawn<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (request_tx, mut request_rx) = mpsc::channel::<()>(1);
        let (event_tx, event_rx) = mpsc::channel(1);

        std::thread::spawn(move || {
            let mut input = ColumnInput::new(reader);
            while request_rx.blocking_recv().is_some() {
                let event = input.next_event();
                let closed = matches!(event, Err(InputError::Closed | InputError::Io(_)));
                if event_tx.blocking_send(event).is_err() || closed {
                    break;
                }
            }
            debug!("input thread finished");
        });

        Self {
            requests: request_tx,
            events: event_rx,
        }
    }
}

#[async_trait]
impl MoveSource for ConsoleMoveSource {
    async fn next_choice(&mut self, _board: &BoardEngine) -> Result<ColumnEvent, InputError> {
        self.requests
            .send(())
            .await
            .map_err(|_| InputError::Closed)?;
        self.events.recv().await.unwrap_or(Err(InputError::Closed))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[tokio::test]
    async fn test_choices_arrive_in_order_then_closed() {
        let board = BoardEngine::new();
        let mut source = ConsoleMoveSource::spawn(Cursor::new("3\nx\nq\n"));

        assert_eq!(source.next_choice(&board).await.unwrap(), ColumnEvent::Column(2));
        assert!(matches!(
            source.next_choice(&board).await,
            Err(InputError::MalformedInput(_))
        ));
        assert_eq!(source.next_choice(&board).await.unwrap(), ColumnEvent::Exit);
        assert!(matches!(
            source.next_choice(&board).await,
            Err(InputError::Closed)
        ));
        // The thread is gone; further requests still report closed.
        assert!(matches!(
            source.next_choice(&board).await,
            Err(InputError::Closed)
        ));
        assert_eq!(source.label(), "You");
    }
}

//! SessionRegistry: numbered record of every game the server has started.
//!
//! Sessions are numbered from 1 in the order their second player connects.
//! Each record keeps both peer addresses and the session's current state:
//!
//! ```text
//! InProgress ──► Finished(outcome)
//!      │
//!      └───────► Aborted(reason)
//! ```
//!
//! The registry lives behind a `tokio::sync::Mutex` shared by the accept loop
//! and every session task.  It is also how the accept loop enforces the
//! configured session limit.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use c4_core::Outcome;
use uuid::Uuid;

/// Lifecycle state of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Both players are connected and moves are flowing.
    InProgress,
    /// The game reached a win or a draw.
    Finished(Outcome),
    /// A player disconnected or misbehaved before the game ended.
    Aborted(String),
}

/// Everything the server remembers about one session.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Sequential number, starting at 1.
    pub number: u64,
    /// Random id carried as `session_id` on every log line of the session.
    /// Numbers restart at 1 with each server run; ids do not.
    pub id: Uuid,
    pub player1_addr: SocketAddr,
    pub player2_addr: SocketAddr,
    pub state: SessionState,
}

/// In-memory registry of all sessions.
///
/// A `BTreeMap` keyed by session number keeps [`all`](Self::all) in start
/// order.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: BTreeMap<u64, SessionRecord>,
    next_number: u64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new in-progress session and returns a copy of its record.
    pub fn open(&mut self, player1_addr: SocketAddr, player2_addr: SocketAddr) -> SessionRecord {
        self.next_number += 1;
        let record = SessionRecord {
            number: self.next_number,
            id: Uuid::new_v4(),
            player1_addr,
            player2_addr,
            state: SessionState::InProgress,
        };
        self.sessions.insert(record.number, record.clone());
        record
    }

    /// Marks a session as finished with `outcome`.
    pub fn finish(&mut self, number: u64, outcome: Outcome) {
        self.set_state(number, SessionState::Finished(outcome));
    }

    /// Marks a session as aborted.
    pub fn abort(&mut self, number: u64, reason: impl Into<String>) {
        self.set_state(number, SessionState::Aborted(reason.into()));
    }

    /// Number of sessions still in progress.
    pub fn active_count(&self) -> usize {
        self.sessions
            .values()
            .filter(|record| record.state == SessionState::InProgress)
            .count()
    }

    pub fn get(&self, number: u64) -> Option<&SessionRecord> {
        self.sessions.get(&number)
    }

    /// Returns a snapshot of all sessions in start order.
    pub fn all(&self) -> Vec<SessionRecord> {
        self.sessions.values().cloned().collect()
    }

    fn set_state(&mut self, number: u64, state: SessionState) {
        if let Some(record) = self.sessions.get_mut(&number) {
            record.state = state;
        }
    }
}

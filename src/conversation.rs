//! Conversation state for a single customer session
//!
//! A session is a flat, append-only history plus a turn state that says
//! whether the latest customer message has been answered yet.

mod history;
mod message;

#[cfg(test)]
mod proptests;

pub use history::{transcript, History, HistoryWindow, ParseWindowError};
pub use message::{Message, Role};

/// Where a session is within the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Ready for the next customer message
    AwaitingInput,
    /// Customer message recorded, waiting on the completion service
    Processing,
    /// Reply recorded; the turn is over
    Completed,
}

/// One customer conversation
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    history: History,
    state: TurnState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            history: History::new(),
            state: TurnState::AwaitingInput,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// True once the model (or the fallback) has answered the latest message
    pub fn is_completed(&self) -> bool {
        self.state == TurnState::Completed
    }

    /// Clear the completion flag and record the customer message.
    ///
    /// A session left in `Processing` (turn abandoned mid-flight) is
    /// restarted rather than rejected.
    pub(crate) fn begin_turn(&mut self, text: &str) {
        if self.state == TurnState::Processing {
            tracing::warn!(session = %self.id, "Previous turn was abandoned before completion");
        }
        self.state = TurnState::Processing;
        self.history.append(Message::user(text));
    }

    /// Record the reply and mark the turn completed.
    pub(crate) fn complete_turn(&mut self, reply: &str) {
        self.history.append(Message::assistant(reply));
        self.state = TurnState::Completed;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

//! Append-only conversation history and prompt windowing

use super::{Message, Role};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How much prior history is folded into each prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWindow {
    /// Every prior message
    Full,
    /// Only the last `n` prior messages
    Last(usize),
}

impl HistoryWindow {
    /// The tail of `messages` covered by this window, in original order
    pub fn select(self, messages: &[Message]) -> &[Message] {
        match self {
            HistoryWindow::Full => messages,
            HistoryWindow::Last(n) => {
                let start = messages.len().saturating_sub(n);
                messages.get(start..).unwrap_or_default()
            }
        }
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        HistoryWindow::Last(5)
    }
}

impl fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryWindow::Full => f.write_str("all"),
            HistoryWindow::Last(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid history window {0:?}: expected \"all\" or a message count")]
pub struct ParseWindowError(String);

impl FromStr for HistoryWindow {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("full") {
            return Ok(HistoryWindow::Full);
        }
        trimmed
            .parse()
            .map(HistoryWindow::Last)
            .map_err(|_| ParseWindowError(s.to_string()))
    }
}

/// Ordered, append-only message list.
///
/// Role alternation is not enforced here; the turn controller is what keeps
/// user and assistant messages paired.
#[derive(Debug, Clone, Default)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Last `n` messages in original order, or all of them if there are fewer
    pub fn recent(&self, n: usize) -> &[Message] {
        HistoryWindow::Last(n).select(&self.messages)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether roles alternate user/assistant starting with user
    pub fn is_alternating(&self) -> bool {
        self.messages.iter().enumerate().all(|(i, m)| {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            m.role == expected
        })
    }

    pub fn format_as_transcript(&self) -> String {
        transcript(&self.messages)
    }
}

/// Render messages as `Customer: ...` / `Assistant: ...` lines
pub fn transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.transcript_label(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(n: usize) -> History {
        let mut history = History::new();
        for i in 0..n {
            if i % 2 == 0 {
                history.append(Message::user(format!("q{i}")));
            } else {
                history.append(Message::assistant(format!("a{i}")));
            }
        }
        history
    }

    #[test]
    fn test_recent_returns_last_n_in_order() {
        let history = history_of(12);
        let recent = history.recent(5);
        assert_eq!(recent.len(), 5);
        let contents: Vec<_> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["a7", "q8", "a9", "q10", "a11"]);
    }

    #[test]
    fn test_recent_with_short_history_returns_all() {
        let history = history_of(3);
        assert_eq!(history.recent(5), history.messages());
        assert!(history.recent(0).is_empty());
        assert!(History::new().recent(5).is_empty());
    }

    #[test]
    fn test_full_window_selects_everything() {
        let history = history_of(12);
        assert_eq!(HistoryWindow::Full.select(history.messages()).len(), 12);
    }

    #[test]
    fn test_format_as_transcript() {
        let mut history = History::new();
        history.append(Message::user("Do you sell tablets?"));
        history.append(Message::assistant("Yes, the SlateBook Air."));
        assert_eq!(
            history.format_as_transcript(),
            "Customer: Do you sell tablets?\nAssistant: Yes, the SlateBook Air."
        );
        assert_eq!(History::new().format_as_transcript(), "");
    }

    #[test]
    fn test_append_is_permissive_about_roles() {
        let mut history = History::new();
        history.append(Message::user("one"));
        history.append(Message::user("two"));
        assert_eq!(history.len(), 2);
        assert!(!history.is_alternating());
        assert!(history_of(6).is_alternating());
    }

    #[test]
    fn test_parse_window() {
        assert_eq!("all".parse::<HistoryWindow>(), Ok(HistoryWindow::Full));
        assert_eq!("FULL".parse::<HistoryWindow>(), Ok(HistoryWindow::Full));
        assert_eq!(" 5 ".parse::<HistoryWindow>(), Ok(HistoryWindow::Last(5)));
        assert_eq!("0".parse::<HistoryWindow>(), Ok(HistoryWindow::Last(0)));
        assert!("-1".parse::<HistoryWindow>().is_err());
        assert!("lots".parse::<HistoryWindow>().is_err());
        assert_eq!(HistoryWindow::default().to_string(), "5");
        assert_eq!(HistoryWindow::Full.to_string(), "all");
    }
}

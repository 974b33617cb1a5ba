//! Property-based tests for history windowing and session bookkeeping

use super::{History, HistoryWindow, Message, Session};
use proptest::prelude::*;

fn arb_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        "[a-zA-Z0-9 ?!.]{0,40}".prop_map(Message::user),
        "[a-zA-Z0-9 ?!.$]{0,40}".prop_map(Message::assistant),
    ]
}

fn arb_history() -> impl Strategy<Value = History> {
    proptest::collection::vec(arb_message(), 0..40).prop_map(|messages| {
        let mut history = History::new();
        for m in messages {
            history.append(m);
        }
        history
    })
}

proptest! {
    #[test]
    fn recent_is_the_ordered_suffix(history in arb_history(), n in 0usize..50) {
        let recent = history.recent(n);
        let all = history.messages();

        prop_assert_eq!(recent.len(), n.min(all.len()));
        prop_assert!(all.ends_with(recent));
    }

    #[test]
    fn full_window_is_identity(history in arb_history()) {
        prop_assert_eq!(HistoryWindow::Full.select(history.messages()), history.messages());
    }

    #[test]
    fn transcript_has_one_line_per_message(history in arb_history()) {
        // Generated contents never contain newlines
        let transcript = history.format_as_transcript();
        let lines = if history.is_empty() { 0 } else { transcript.split('\n').count() };
        prop_assert_eq!(lines, history.len());
    }

    #[test]
    fn paired_turns_keep_history_alternating(turns in proptest::collection::vec(("[a-z ]{0,20}", "[a-z ]{0,20}"), 0..20)) {
        let mut session = Session::new();
        for (question, answer) in &turns {
            session.begin_turn(question);
            session.complete_turn(answer);
            prop_assert!(session.is_completed());
        }
        prop_assert_eq!(session.history().len(), turns.len() * 2);
        prop_assert!(session.history().is_alternating());
    }
}

//! Append-only conversation log.

use crate::chat::ConversationTurn;

/// An ordered, append-only log of conversation turns.
///
/// The orchestrator owns one `Transcript` per query. Turns are appended
/// as the round loop progresses and snapshotted immediately before each
/// model call to assemble the request payload. No turn, once appended,
/// can be edited or removed — there is deliberately no mutable access
/// to past turns.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn to the end of the log.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Returns a copy of all turns in order.
    ///
    /// Returned by value: the caller gets an independent snapshot that
    /// later appends cannot affect, and cannot mutate the log through it.
    pub fn snapshot(&self) -> Vec<ConversationTurn> {
        self.turns.clone()
    }

    /// Returns the last appended turn, if any.
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Number of turns appended so far.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if no turns have been appended.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ToolCallRequest, ToolOutcome, ToolResultEntry};

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append(ConversationTurn::user("q"));
        transcript.append(ConversationTurn::assistant("a"));

        let turns = transcript.snapshot();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], ConversationTurn::user("q"));
        assert_eq!(turns[1], ConversationTurn::assistant("a"));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut transcript = Transcript::new();
        transcript.append(ConversationTurn::user("first"));

        let snap = transcript.snapshot();
        transcript.append(ConversationTurn::assistant("second"));

        assert_eq!(snap.len(), 1);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert!(transcript.last().is_none());
        assert!(transcript.snapshot().is_empty());
    }

    #[test]
    fn test_tool_round_turn_sequence() {
        let mut transcript = Transcript::new();
        transcript.append(ConversationTurn::user("q"));
        transcript.append(ConversationTurn::tool_calls(vec![ToolCallRequest {
            id: "c1".into(),
            tool_name: "search_course_content".into(),
            arguments: serde_json::json!({"query": "q"}),
        }]));
        transcript.append(ConversationTurn::tool_results(vec![ToolResultEntry {
            call_id: "c1".into(),
            tool_name: "search_course_content".into(),
            outcome: ToolOutcome::Ok("hit".into()),
        }]));

        assert_eq!(transcript.len(), 3);
        assert!(matches!(
            transcript.last(),
            Some(ConversationTurn::ToolResults { .. })
        ));
    }
}

//! In-memory session store for conversation history.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One completed user/assistant exchange.
#[derive(Debug, Clone, PartialEq)]
struct Exchange {
    user: String,
    assistant: String,
}

/// Tracks conversation history per session, bounded to the most recent
/// `max_history` exchanges.
///
/// Sessions live only in memory. History is rendered as a plain text
/// block for inclusion in the system context, not replayed as
/// structured turns.
#[derive(Debug)]
pub struct SessionManager {
    sessions: Mutex<HashMap<String, VecDeque<Exchange>>>,
    max_history: usize,
}

impl SessionManager {
    /// Creates a manager keeping up to `max_history` exchanges per session.
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_history,
        }
    }

    /// Creates a new empty session and returns its id.
    pub fn create_session(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.clone(), VecDeque::new());
        id
    }

    /// Records one exchange, evicting the oldest beyond the cap.
    ///
    /// Unknown session ids are created implicitly.
    pub fn add_exchange(&self, session_id: &str, user: impl Into<String>, assistant: impl Into<String>) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push_back(Exchange {
            user: user.into(),
            assistant: assistant.into(),
        });
        while history.len() > self.max_history {
            history.pop_front();
        }
    }

    /// Renders the session's history, oldest exchange first.
    ///
    /// Returns `None` for unknown sessions and for sessions with no
    /// exchanges yet.
    pub fn history(&self, session_id: &str) -> Option<String> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let history = sessions.get(session_id)?;
        if history.is_empty() {
            return None;
        }
        Some(
            history
                .iter()
                .map(|e| format!("User: {}\nAssistant: {}", e.user, e.assistant))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

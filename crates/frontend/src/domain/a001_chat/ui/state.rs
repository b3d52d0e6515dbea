//! Conversation state for the chat screen.
//!
//! Pure data, no signals: the view model keeps one `ConversationState` in a
//! signal and every transition goes through the methods below.
//!
//! At most one send is in flight at a time, whichever session it targets.
//! Switching sessions does not end it; only the completion for that same
//! session does.

use contracts::domain::a001_chat::aggregate::{ChatMessage, ChatSession};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SendPhase {
    #[default]
    Idle,
    Sending { session_id: i64 },
    Failed { session_id: i64, message: String },
}

/// Why a send was refused before any request went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejected {
    NoActiveSession,
    EmptyDraft,
    AlreadySending,
}

impl SendRejected {
    pub fn message(self) -> &'static str {
        match self {
            SendRejected::NoActiveSession => "Сначала создайте или выберите чат",
            SendRejected::EmptyDraft => "Введите сообщение",
            SendRejected::AlreadySending => "Сообщение уже отправляется",
        }
    }
}

/// Everything a send request needs, captured at the moment of submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SendTicket {
    pub session_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    pub sessions: Vec<ChatSession>,
    pub active_id: Option<i64>,
    pub messages: Vec<ChatMessage>,
    pub phase: SendPhase,
}

impl ConversationState {
    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active_id?;
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.phase, SendPhase::Sending { .. })
    }

    /// Failure of the last send, shown only while its session is active.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SendPhase::Failed { session_id, message } if self.active_id == Some(*session_id) => {
                Some(message)
            }
            _ => None,
        }
    }

    /// Replace the session list with a fresh server copy.
    ///
    /// The active session survives if it is still listed, otherwise the
    /// first session becomes active (or none when the list is empty).
    /// Returns the session whose messages must be loaded, if the active
    /// session changed.
    pub fn set_sessions(&mut self, sessions: Vec<ChatSession>) -> Option<i64> {
        self.sessions = sessions;
        let still_there = self
            .active_id
            .map(|id| self.sessions.iter().any(|s| s.id == id))
            .unwrap_or(false);
        if still_there {
            return None;
        }
        let next = self.sessions.first().map(|s| s.id);
        self.switch_to(next);
        next
    }

    /// Make `id` active. Returns true if this changed the active session.
    pub fn select(&mut self, id: i64) -> bool {
        if self.active_id == Some(id) || !self.sessions.iter().any(|s| s.id == id) {
            return false;
        }
        self.switch_to(Some(id));
        true
    }

    fn switch_to(&mut self, id: Option<i64>) {
        self.active_id = id;
        self.messages.clear();
        if matches!(self.phase, SendPhase::Failed { .. }) {
            self.phase = SendPhase::Idle;
        }
    }

    fn is_sending_to(&self, session_id: i64) -> bool {
        self.phase == SendPhase::Sending { session_id }
    }

    /// The in-flight send targets the session on screen.
    pub fn is_sending_in_active(&self) -> bool {
        self.active_id.is_some_and(|id| self.is_sending_to(id))
    }

    /// Apply a loaded message list. Lists for a session that is no longer
    /// active are dropped.
    pub fn apply_messages(&mut self, session_id: i64, messages: Vec<ChatMessage>) -> bool {
        if self.active_id != Some(session_id) {
            return false;
        }
        self.messages = messages;
        true
    }

    pub fn begin_send(&mut self, draft: &str) -> Result<SendTicket, SendRejected> {
        if self.is_sending() {
            return Err(SendRejected::AlreadySending);
        }
        let session_id = self.active_id.ok_or(SendRejected::NoActiveSession)?;
        let content = draft.trim();
        if content.is_empty() {
            return Err(SendRejected::EmptyDraft);
        }
        self.phase = SendPhase::Sending { session_id };
        Ok(SendTicket {
            session_id,
            content: content.to_string(),
        })
    }

    /// The send to `session_id` went through and `messages` is the reloaded
    /// server list. Completions that do not match the in-flight send are
    /// ignored apart from refreshing that session's messages.
    pub fn finish_send(&mut self, session_id: i64, messages: Vec<ChatMessage>) {
        if self.is_sending_to(session_id) {
            self.phase = SendPhase::Idle;
        }
        self.apply_messages(session_id, messages);
    }

    pub fn fail_send(&mut self, session_id: i64, message: impl Into<String>) {
        if self.is_sending_to(session_id) {
            self.phase = SendPhase::Failed {
                session_id,
                message: message.into(),
            };
        }
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.phase, SendPhase::Failed { .. }) {
            self.phase = SendPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_chat::aggregate::ChatRole;

    fn session(id: i64) -> ChatSession {
        ChatSession {
            id,
            title: format!("Чат {}", id),
            model: "gpt-4".into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn message(id: i64, session_id: i64, role: ChatRole) -> ChatMessage {
        ChatMessage {
            id,
            session_id: Some(session_id),
            role,
            content: format!("m{}", id),
            model: None,
            tokens: None,
            attachments: None,
            created_at: None,
        }
    }

    fn with_sessions(ids: &[i64]) -> ConversationState {
        let mut state = ConversationState::default();
        state.set_sessions(ids.iter().copied().map(session).collect());
        state
    }

    #[test]
    fn first_load_selects_first_session() {
        let mut state = ConversationState::default();
        assert_eq!(state.set_sessions(vec![session(3), session(1)]), Some(3));
        assert_eq!(state.active_id, Some(3));
    }

    #[test]
    fn reload_keeps_active_session() {
        let mut state = with_sessions(&[1, 2]);
        assert!(state.select(2));
        state.apply_messages(2, vec![message(10, 2, ChatRole::User)]);
        assert_eq!(state.set_sessions(vec![session(1), session(2), session(5)]), None);
        assert_eq!(state.active_id, Some(2));
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn deleting_active_falls_back_to_first_remaining() {
        let mut state = with_sessions(&[1, 2, 3]);
        state.select(2);
        assert_eq!(state.set_sessions(vec![session(1), session(3)]), Some(1));
        assert_eq!(state.active_id, Some(1));
        assert!(state.messages.is_empty());
    }

    #[test]
    fn deleting_last_session_leaves_empty_state() {
        let mut state = with_sessions(&[7]);
        assert_eq!(state.set_sessions(Vec::new()), None);
        assert_eq!(state.active_id, None);
        assert!(state.active_session().is_none());
    }

    #[test]
    fn stale_message_lists_are_ignored() {
        let mut state = with_sessions(&[1, 2]);
        state.select(2);
        assert!(!state.apply_messages(1, vec![message(1, 1, ChatRole::User)]));
        assert!(state.messages.is_empty());
    }

    #[test]
    fn select_unknown_or_same_is_noop() {
        let mut state = with_sessions(&[1]);
        assert!(!state.select(1));
        assert!(!state.select(42));
        assert_eq!(state.active_id, Some(1));
    }

    #[test]
    fn send_requires_session_and_text() {
        let mut empty = ConversationState::default();
        assert_eq!(empty.begin_send("hi"), Err(SendRejected::NoActiveSession));

        let mut state = with_sessions(&[1]);
        assert_eq!(state.begin_send("   "), Err(SendRejected::EmptyDraft));
        assert_eq!(state.phase, SendPhase::Idle);
    }

    #[test]
    fn second_send_is_refused_while_in_flight() {
        let mut state = with_sessions(&[1]);
        let ticket = state.begin_send("  привет ").unwrap();
        assert_eq!(ticket.session_id, 1);
        assert_eq!(ticket.content, "привет");
        assert_eq!(state.begin_send("ещё"), Err(SendRejected::AlreadySending));
    }

    #[test]
    fn finished_send_shows_exactly_the_server_list() {
        let mut state = with_sessions(&[1]);
        state.apply_messages(1, vec![message(1, 1, ChatRole::User), message(2, 1, ChatRole::Assistant)]);
        state.begin_send("next").unwrap();

        let server = vec![
            message(1, 1, ChatRole::User),
            message(2, 1, ChatRole::Assistant),
            message(3, 1, ChatRole::User),
            message(4, 1, ChatRole::Assistant),
        ];
        state.finish_send(1, server.clone());
        assert_eq!(state.messages, server);
        assert!(!state.is_sending());
    }

    #[test]
    fn failure_is_reported_then_dismissed() {
        let mut state = with_sessions(&[1]);
        state.begin_send("x").unwrap();
        state.fail_send(1, "Недостаточно средств на балансе");
        assert_eq!(state.error(), Some("Недостаточно средств на балансе"));
        assert!(state.begin_send("x").is_ok());
        state.fail_send(1, "again");
        state.dismiss_error();
        assert_eq!(state.phase, SendPhase::Idle);
    }

    #[test]
    fn switching_sessions_keeps_the_send_in_flight() {
        let mut state = with_sessions(&[1, 2]);
        state.begin_send("first").unwrap();

        assert!(state.select(2));
        assert!(state.is_sending());
        assert!(!state.is_sending_in_active());
        assert_eq!(state.begin_send("second"), Err(SendRejected::AlreadySending));

        // Session 1 finishes while session 2 is on screen
        state.finish_send(1, vec![message(1, 1, ChatRole::User)]);
        assert!(!state.is_sending());
        assert!(state.messages.is_empty());
        assert!(state.begin_send("second").is_ok());
    }

    #[test]
    fn completion_of_another_session_does_not_end_current_send() {
        let mut state = with_sessions(&[1, 2]);
        state.select(2);
        state.begin_send("to two").unwrap();

        state.finish_send(1, Vec::new());
        state.fail_send(1, "late error from one");
        assert_eq!(state.phase, SendPhase::Sending { session_id: 2 });
        assert_eq!(state.begin_send("again"), Err(SendRejected::AlreadySending));
    }

    #[test]
    fn failure_stays_with_its_session() {
        let mut state = with_sessions(&[1, 2]);
        state.begin_send("x").unwrap();
        state.select(2);
        state.fail_send(1, "ошибка первого чата");
        assert_eq!(state.error(), None);

        let mut state = with_sessions(&[1, 2]);
        state.begin_send("x").unwrap();
        state.fail_send(1, "ошибка");
        state.select(2);
        assert_eq!(state.error(), None);
        assert_eq!(state.phase, SendPhase::Idle);
    }
}

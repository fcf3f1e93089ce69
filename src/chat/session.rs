use tracing::{debug, info, warn};

use super::{ChatMessage, Role};
use crate::http::{AdviceService, AdviceUnavailable};

pub const GREETING_TEXT: &str = "Hello! I'm your Numus AI DJ. I can help you explore the world \
of Suno.ai generated music. What vibe are you looking for today?";

pub const FALLBACK_TEXT: &str = "Sorry, I lost the connection to the audio server.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// The query of an accepted submission. Only [`ChatSession::submit`] hands these
/// out, and only while no other request is outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAdvice {
    pub query: String,
}

/// Transcript plus the input buffer of the AI DJ panel.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    input: String,
    state: ChatState,
    next_id: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self::empty();
        session.push(Role::Model, GREETING_TEXT.to_string());
        session
    }

    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            state: ChatState::Idle,
            next_id: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == ChatState::AwaitingResponse
    }

    /// Whether a submission right now would be accepted.
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.input.trim().is_empty()
    }

    pub fn push_char(&mut self, c: char) -> bool {
        if self.is_busy() {
            return false;
        }
        self.input.push(c);
        true
    }

    pub fn pop_char(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.input.pop().is_some()
    }

    pub fn paste(&mut self, text: &str) -> bool {
        if self.is_busy() {
            return false;
        }
        self.input
            .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
        true
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if self.is_busy() {
            return false;
        }
        self.input = text.into();
        true
    }

    /// Idle -> AwaitingResponse. Appends the user's message and clears the input.
    pub fn submit(&mut self) -> Option<PendingAdvice> {
        if !self.can_submit() {
            debug!(busy = self.is_busy(), "chat_submit_ignored");
            return None;
        }

        let query = std::mem::take(&mut self.input);
        self.push(Role::User, query.clone());
        self.state = ChatState::AwaitingResponse;
        info!(chars = query.chars().count(), "chat_submitted");
        Some(PendingAdvice { query })
    }

    /// AwaitingResponse -> Idle. Failures become the fallback reply.
    pub fn settle(&mut self, result: Result<String, AdviceUnavailable>) {
        if !self.is_busy() {
            warn!("chat_settle_without_pending_request");
            return;
        }

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "advice_unavailable");
                FALLBACK_TEXT.to_string()
            }
        };
        self.push(Role::Model, text);
        self.state = ChatState::Idle;
    }

    /// Submits the current input and awaits the reply in place.
    pub async fn ask(&mut self, advice: &dyn AdviceService) -> bool {
        let Some(pending) = self.submit() else {
            return false;
        };
        let result = advice.advise(&pending.query).await;
        self.settle(result);
        true
    }

    fn push(&mut self, role: Role, text: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, role, text });
    }
}

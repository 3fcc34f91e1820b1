pub mod segment;
pub mod sources;

use crate::api::models::{ChatRequest, ChatResponse, Source};
use crate::api::{ApiClient, ApiError};
use crate::library::SearchScope;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

pub const GREETING_ID: &str = "1";
pub const GREETING: &str = "Hello! I am ConTrackt AI. I am ready to analyze your documents.";
pub const ERROR_REPLY: &str = "⚠️ I encountered an error connecting to the server.";

/// Content prefix that marks a system notice in the flat `{role, content}` form.
pub const SYSTEM_NOTICE_PREFIX: &str = "SYSTEM_UPDATE:";

/// Wire-level role. Notices travel as assistant messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    User,
    Assistant,
    SystemNotice,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: String,
    pub kind: MessageKind,
    pub content: String,
    pub sources: Vec<Source>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            content: content.into(),
            sources: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    fn greeting() -> Self {
        Self {
            id: GREETING_ID.to_string(),
            ..Self::new(MessageKind::Assistant, GREETING)
        }
    }

    /// Rebuilds a message from the flat role/content form, recognising
    /// prefixed notices.
    pub fn from_raw(role: Role, content: &str) -> Self {
        match (role, content.strip_prefix(SYSTEM_NOTICE_PREFIX)) {
            (Role::Assistant, Some(text)) => {
                Self::new(MessageKind::SystemNotice, text.strip_prefix(' ').unwrap_or(text))
            }
            (Role::Assistant, None) => Self::new(MessageKind::Assistant, content),
            (Role::User, _) => Self::new(MessageKind::User, content),
        }
    }

    pub fn role(&self) -> Role {
        match self.kind {
            MessageKind::User => Role::User,
            MessageKind::Assistant | MessageKind::SystemNotice => Role::Assistant,
        }
    }

    pub fn is_notice(&self) -> bool {
        self.kind == MessageKind::SystemNotice
    }

    /// Content in the flat form, with the notice prefix restored.
    pub fn raw_content(&self) -> String {
        match self.kind {
            MessageKind::SystemNotice => format!("{} {}", SYSTEM_NOTICE_PREFIX, self.content),
            _ => self.content.clone(),
        }
    }
}

/// The message list and in-flight flag of one conversation.
///
/// The first message is always the greeting. Messages are only appended,
/// except by [`Transcript::reset`], which truncates back to the greeting.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    awaiting: bool,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::greeting()],
            awaiting: false,
        }
    }

    /// Replaces everything with a fresh greeting.
    pub fn initialize(&mut self) {
        *self = Self::new();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> &Message {
        // The greeting is never removed.
        &self.messages[self.messages.len() - 1]
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }

    /// Appends the user's turn and returns the query to send.
    ///
    /// Returns `None` without touching the transcript when `text` is blank
    /// or a previous query has not settled yet.
    pub fn append_user_turn(&mut self, text: &str, scope: &SearchScope) -> Option<ChatRequest> {
        if text.trim().is_empty() || self.awaiting {
            return None;
        }
        self.messages.push(Message::new(MessageKind::User, text));
        self.awaiting = true;
        Some(scope.request(text))
    }

    /// Records the outcome of the outstanding query.
    pub fn settle(&mut self, outcome: Result<ChatResponse, ApiError>) {
        let reply = match outcome {
            Ok(resp) => {
                debug!(
                    sources = resp.sources.len(),
                    processing_time = resp.processing_time,
                    "chat answer received"
                );
                Message {
                    sources: resp.sources,
                    ..Message::new(MessageKind::Assistant, resp.answer)
                }
            }
            Err(e) => {
                warn!(error = %e, "chat query failed");
                Message::new(MessageKind::Assistant, ERROR_REPLY)
            }
        };
        self.messages.push(reply);
        self.awaiting = false;
    }

    /// Runs one full turn against the backend. Returns `false` if the turn
    /// was refused.
    pub async fn send(&mut self, client: &ApiClient, text: &str, scope: &SearchScope) -> bool {
        let Some(request) = self.append_user_turn(text, scope) else {
            return false;
        };
        let outcome = client.chat(&request).await;
        self.settle(outcome);
        true
    }

    pub fn append_system_notice(&mut self, text: &str) {
        self.messages.push(Message::new(MessageKind::SystemNotice, text));
    }

    pub fn reset(&mut self) {
        self.messages.truncate(1);
        self.awaiting = false;
    }
}

//! Core chat session management.
//!
//! This module provides the session context (identifiers plus the rolling
//! conversation history) and the `ChatSession` struct which drives the
//! send cycle against the assistant service.

use uuid::Uuid;

use crate::chat::actions::{ActionOutcome, ActionTray};
use crate::chat::config::ChatConfig;
use crate::client::ChatClient;
use crate::error::{Error, Result};
use crate::observability::{CHAT_TURNS, CHAT_TURN_FAILURES, HISTORY_REPLACEMENTS};
use crate::render::Renderer;
use crate::types::{
    ChatRequest, ConversationMessage, HealthStatus, MessageInput, MessageRole,
};
use time::OffsetDateTime;

/// Shown when the request never reached a server verdict.
const CONNECT_FAILURE_TEXT: &str = "Error: Could not connect to the assistant.";

/// Identifiers and rolling history for one conversation.
///
/// The session id is generated exactly once, at construction. History order
/// is server-authoritative after the first successful exchange: the
/// optimistic local append is superseded whenever the server returns a
/// replacement sequence.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user_id: String,
    session_id: String,
    history: Vec<ConversationMessage>,
}

impl SessionContext {
    /// Creates a context for the given user with a fresh session id.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: generate_session_id(),
            history: Vec::new(),
        }
    }

    /// The user this session belongs to.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The identifier of this session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The full conversation history, oldest first.
    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    /// Appends one message to the history.
    pub fn append(&mut self, message: ConversationMessage) {
        self.history.push(message);
    }

    /// Replaces the history wholesale with a server-provided sequence.
    pub fn replace(&mut self, history: Vec<ConversationMessage>) {
        self.history = history;
    }

    /// The most recent `n` history entries, in chronological order.
    pub fn recent(&self, n: usize) -> &[ConversationMessage] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Discards the history.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// Builds a session id with enough entropy to distinguish concurrent
/// sessions against the same backend: millisecond timestamp plus a random
/// token.
fn generate_session_id() -> String {
    let millis = crate::utils::time::now().unix_timestamp_nanos() / 1_000_000;
    format!("session_{}_{}", millis, Uuid::new_v4().simple())
}

/// How a send attempt concluded. Every variant returns to an interactive
/// idle state; there are no fatal outcomes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing was sent (empty input, or an activation that only produced
    /// a notice).
    Idle,

    /// The assistant replied.
    Replied,

    /// The attempt failed and an error was rendered.
    Failed,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The endpoint the session talks to.
    pub endpoint: String,
    /// The user id sent with requests.
    pub user_id: String,
    /// The session identifier.
    pub session_id: String,
    /// The number of messages in the conversation history.
    pub message_count: usize,
    /// Completed turns (assistant replied).
    pub turns: u64,
    /// Failed turns (error rendered).
    pub failed_turns: u64,
    /// Suggested actions currently on offer.
    pub pending_actions: usize,
}

/// A chat session that manages conversation state and the send cycle.
///
/// `send` takes `&mut self`, so a second send cannot begin while one is in
/// flight; exclusivity is structural rather than guarded by a flag.
pub struct ChatSession {
    client: ChatClient,
    config: ChatConfig,
    context: SessionContext,
    tray: ActionTray,
    turns: u64,
    failed_turns: u64,
}

impl ChatSession {
    /// Creates a new chat session with the given client and configuration.
    pub fn new(client: ChatClient, config: ChatConfig) -> Self {
        let context = SessionContext::new(config.user_id.clone());
        Self {
            client,
            config,
            context,
            tray: ActionTray::new(),
            turns: 0,
            failed_turns: 0,
        }
    }

    /// The session context.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// The suggested actions currently on offer.
    pub fn actions(&self) -> &ActionTray {
        &self.tray
    }

    /// Clears the conversation history.
    pub fn clear_history(&mut self) {
        self.context.clear();
    }

    /// Probes the service health endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.client.health().await
    }

    /// Sends a user message through the full cycle.
    ///
    /// Before the network call: renders the user's message, discards the
    /// action tray, and appends the outgoing message to history. On
    /// success: renders the reply, presents the new actions, and replaces
    /// the history if the server provided one. On any failure: renders an
    /// assistant-attributed error and leaves the optimistic append in
    /// place.
    ///
    /// All failures are handled here; the caller always gets a
    /// [`TurnOutcome`] back, never an error.
    pub async fn send(&mut self, input: &str, renderer: &mut dyn Renderer) -> TurnOutcome {
        let text = input.trim();
        if text.is_empty() {
            return TurnOutcome::Idle;
        }

        CHAT_TURNS.click();
        renderer.message(MessageRole::User, text);
        self.tray.clear();

        let outgoing = ConversationMessage::user(text);
        let sent_at = outgoing.timestamp;
        self.context.append(outgoing);

        let request = self.compose_request(text, sent_at);
        match self.client.chat(&request).await {
            Ok(response) => {
                renderer.message(MessageRole::Assistant, &response.reply.text);
                let actions = response.suggested_actions.unwrap_or_default();
                self.tray.present(actions, renderer);
                if let Some(history) = response.updated_conversation_history {
                    HISTORY_REPLACEMENTS.click();
                    self.context.replace(history);
                }
                self.turns += 1;
                TurnOutcome::Replied
            }
            Err(err) => {
                CHAT_TURN_FAILURES.click();
                renderer.error(&failure_text(&err));
                self.failed_turns += 1;
                TurnOutcome::Failed
            }
        }
    }

    /// Activates the suggested action at a 1-based position.
    ///
    /// A quick reply is fed back through [`send`](ChatSession::send) as if
    /// the user had typed its payload; link-style actions surface a notice.
    pub async fn activate(&mut self, position: usize, renderer: &mut dyn Renderer) -> TurnOutcome {
        match self.tray.activate(position) {
            Some(ActionOutcome::Resend(payload)) => self.send(&payload, renderer).await,
            Some(ActionOutcome::Notice(text)) => {
                renderer.notice(&text);
                TurnOutcome::Idle
            }
            None => {
                if self.tray.is_empty() {
                    renderer.info("No suggested actions right now.");
                } else {
                    renderer.info(&format!(
                        "No suggestion at {position}; {} on offer.",
                        self.tray.actions().len()
                    ));
                }
                TurnOutcome::Idle
            }
        }
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            endpoint: self.client.base_url().to_string(),
            user_id: self.context.user_id().to_string(),
            session_id: self.context.session_id().to_string(),
            message_count: self.context.history().len(),
            turns: self.turns,
            failed_turns: self.failed_turns,
            pending_actions: self.tray.actions().len(),
        }
    }

    fn compose_request(&self, text: &str, sent_at: OffsetDateTime) -> ChatRequest {
        ChatRequest::new(
            self.context.user_id(),
            self.context.session_id(),
            MessageInput::new(text, sent_at),
            self.context.recent(self.config.history_window).to_vec(),
        )
        .with_user_profile(self.config.profile.clone())
    }
}

fn failure_text(err: &Error) -> String {
    if err.is_transport_failure() {
        CONNECT_FAILURE_TEXT.to_string()
    } else {
        format!("Error: {}", err.message())
    }
}

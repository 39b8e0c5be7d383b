use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Role type for a conversation message.
///
/// `System` never originates on the client; it appears when the server
/// injects notices into the conversation history it returns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User role.
    User,

    /// Assistant role.
    Assistant,

    /// System role.
    System,
}

/// A single entry in the conversation history.
///
/// Created locally when the user sends a message, or received verbatim from
/// the server. Immutable once created; the history sequence it belongs to is
/// replaced wholesale when the server supplies a new one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMessage {
    /// The role of the message.
    pub role: MessageRole,

    /// The message text.
    pub content: String,

    /// When the message was created, carried as RFC 3339 on the wire.
    #[serde(with = "crate::utils::time")]
    pub timestamp: OffsetDateTime,
}

impl ConversationMessage {
    /// Create a new message with an explicit timestamp.
    pub fn new(role: MessageRole, content: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// Create a user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content, crate::utils::time::now())
    }

    /// Create an assistant message stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content, crate::utils::time::now())
    }

    /// Create a system message stamped with the current time.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content, crate::utils::time::now())
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{ConversationMessage, UserProfile};

/// The message being sent, as distinct from history entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageInput {
    /// The message text.
    pub text: String,

    /// Client-side send time, RFC 3339 on the wire.
    #[serde(with = "crate::utils::time")]
    pub timestamp: OffsetDateTime,
}

impl MessageInput {
    /// Creates a message input with an explicit timestamp.
    pub fn new(text: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }
}

/// Hints about where in the hosting surface the request originated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientContext {
    /// The view the user is currently on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_view: Option<String>,
}

/// The request body for one chat exchange.
///
/// `conversation_history` carries at most the ten most recent entries,
/// including the message being sent; the session composes that window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// Identifier of the user on whose behalf the request is made.
    pub user_id: String,

    /// Identifier of this conversation session.
    pub session_id: String,

    /// The message being sent.
    pub message: MessageInput,

    /// Recent history for context, oldest first.
    pub conversation_history: Vec<ConversationMessage>,

    /// Personalization context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,

    /// Hosting-surface context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_context: Option<ClientContext>,
}

impl ChatRequest {
    /// Creates a request with the required fields; profile and client
    /// context default to absent.
    pub fn new(
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        message: MessageInput,
        conversation_history: Vec<ConversationMessage>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            message,
            conversation_history,
            user_profile: None,
            client_context: None,
        }
    }

    /// Attaches a user profile.
    pub fn with_user_profile(mut self, user_profile: UserProfile) -> Self {
        self.user_profile = Some(user_profile);
        self
    }

    /// Attaches client context.
    pub fn with_client_context(mut self, client_context: ClientContext) -> Self {
        self.client_context = Some(client_context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;
    use serde_json::{json, to_value};
    use time::macros::datetime;

    #[test]
    fn wire_shape() {
        let at = datetime!(2024-05-01 12:30:45 UTC);
        let request = ChatRequest::new(
            "1",
            "session_1714566645000_abc",
            MessageInput::new("hi", at),
            vec![ConversationMessage::new(MessageRole::User, "hi", at)],
        )
        .with_user_profile(UserProfile::new());

        assert_eq!(
            to_value(&request).unwrap(),
            json!({
                "user_id": "1",
                "session_id": "session_1714566645000_abc",
                "message": {
                    "text": "hi",
                    "timestamp": "2024-05-01T12:30:45Z"
                },
                "conversation_history": [
                    {
                        "role": "user",
                        "content": "hi",
                        "timestamp": "2024-05-01T12:30:45Z"
                    }
                ],
                "user_profile": {}
            })
        );
    }

    #[test]
    fn optional_fields_omitted() {
        let at = datetime!(2024-05-01 12:30:45 UTC);
        let request = ChatRequest::new("1", "s", MessageInput::new("hi", at), Vec::new());
        let json = to_value(&request).unwrap();
        assert!(json.get("user_profile").is_none());
        assert!(json.get("client_context").is_none());
    }

    #[test]
    fn client_context_shape() {
        let at = datetime!(2024-05-01 12:30:45 UTC);
        let request = ChatRequest::new("1", "s", MessageInput::new("hi", at), Vec::new())
            .with_client_context(ClientContext {
                current_view: Some("chat".to_string()),
            });
        assert_eq!(
            to_value(&request).unwrap()["client_context"],
            json!({ "current_view": "chat" })
        );
    }
}

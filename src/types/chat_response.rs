use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{ConversationMessage, SuggestedAction};

/// The assistant's reply within a chat response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    /// The reply text.
    pub text: String,

    /// Server-side reply time, if the server provides one.
    #[serde(
        default,
        with = "crate::utils::time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<OffsetDateTime>,
}

/// Diagnostic detail some servers attach to a response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DebugInfo {
    /// The intent the server detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_detected: Option<String>,

    /// A summary of retrieved context used for the reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieved_context_summary: Option<String>,

    /// Which data sources contributed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_sources_used: Option<Vec<String>>,

    /// The prompt the server sent to its language model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_prompt: Option<String>,
}

/// The response body for one chat exchange.
///
/// A missing `reply.text` fails deserialization, which the send cycle
/// surfaces as a server error rather than a crash. `suggested_actions` may
/// be a list, empty, `null`, or absent; the last three all mean "no
/// controls this turn".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// Echo of the session id, if the server provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// The assistant's reply.
    pub reply: Reply,

    /// Controls to offer for the next turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_actions: Option<Vec<SuggestedAction>>,

    /// When present, replaces the client's history in full.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_conversation_history: Option<Vec<ConversationMessage>>,

    /// Diagnostic detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
}

impl ChatResponse {
    /// The suggested actions for this turn, empty when the server sent
    /// none (absent, `null`, or `[]`).
    pub fn actions(&self) -> &[SuggestedAction] {
        self.suggested_actions.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;
    use serde_json::json;

    #[test]
    fn minimal_response_parses() {
        let json = json!({ "reply": { "text": "Hello!" } });
        let response: ChatResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.reply.text, "Hello!");
        assert!(response.reply.timestamp.is_none());
        assert!(response.actions().is_empty());
        assert!(response.updated_conversation_history.is_none());
    }

    #[test]
    fn null_actions_mean_none() {
        let json = json!({
            "reply": { "text": "Hello!" },
            "suggested_actions": null
        });
        let response: ChatResponse = serde_json::from_value(json).unwrap();
        assert!(response.actions().is_empty());
    }

    #[test]
    fn missing_reply_is_an_error() {
        let json = json!({ "suggested_actions": [] });
        assert!(serde_json::from_value::<ChatResponse>(json).is_err());
    }

    #[test]
    fn full_response_parses() {
        let json = json!({
            "session_id": "session_1_x",
            "reply": {
                "text": "Hello!",
                "timestamp": "2024-05-01T12:30:46Z"
            },
            "suggested_actions": [
                { "type": "quick_reply", "text_label": "Learn more", "payload": "more" }
            ],
            "updated_conversation_history": [
                { "role": "user", "content": "hi", "timestamp": "2024-05-01T12:30:45Z" },
                { "role": "assistant", "content": "Hello!", "timestamp": "2024-05-01T12:30:46Z" }
            ],
            "debug_info": { "intent_detected": "general_conversation" }
        });
        let response: ChatResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.session_id.as_deref(), Some("session_1_x"));
        assert_eq!(response.actions().len(), 1);
        let history = response.updated_conversation_history.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(
            response.debug_info.unwrap().intent_detected.as_deref(),
            Some("general_conversation")
        );
    }

    #[test]
    fn malformed_action_entry_is_an_error() {
        let json = json!({
            "reply": { "text": "Hello!" },
            "suggested_actions": [
                { "type": "teleport", "text_label": "Go", "payload": "x" }
            ]
        });
        assert!(serde_json::from_value::<ChatResponse>(json).is_err());
    }
}

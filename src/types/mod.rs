// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod conversation_message;
pub mod health_status;
pub mod suggested_action;
pub mod user_profile;

// Re-exports
pub use chat_request::{ChatRequest, ClientContext, MessageInput};
pub use chat_response::{ChatResponse, DebugInfo, Reply};
pub use conversation_message::{ConversationMessage, MessageRole};
pub use health_status::HealthStatus;
pub use suggested_action::SuggestedAction;
pub use user_profile::{SchoolInfo, UserProfile};

//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::types::{SchoolInfo, UserProfile};

/// Default API prefix of a locally running assistant service.
const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8008/api/v1/";

/// Fallback user id until the hosting surface has real authentication.
const DEFAULT_USER_ID: &str = "1";

/// How many history entries accompany each request.
const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for the banter-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// API prefix of the assistant service.
    #[arrrg(optional, "Service API prefix (default: http://127.0.0.1:8008/api/v1/)", "URL")]
    pub endpoint: Option<String>,

    /// User id to identify as.
    #[arrrg(optional, "User id to identify as (default: 1)", "ID")]
    pub user: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// School id for the user profile.
    #[arrrg(optional, "School id for the user profile", "ID")]
    pub school_id: Option<String>,

    /// School name for the user profile.
    #[arrrg(optional, "School name for the user profile", "NAME")]
    pub school_name: Option<String>,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// API prefix the client talks to.
    pub endpoint: String,

    /// User id sent with every request.
    pub user_id: String,

    /// How many of the most recent history entries each request carries.
    pub history_window: usize,

    /// Request timeout.
    pub timeout: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Personalization context sent with every request.
    pub profile: UserProfile,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Endpoint: http://127.0.0.1:8008/api/v1/
    /// - User id: "1"
    /// - History window: 10
    /// - Timeout: 60s
    /// - Color: enabled
    /// - Profile: empty
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            history_window: DEFAULT_HISTORY_WINDOW,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            use_color: true,
            profile: UserProfile::new(),
        }
    }

    /// Sets the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the user id.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the history window.
    pub fn with_history_window(mut self, history_window: usize) -> Self {
        self.history_window = history_window;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets the user profile.
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let mut profile = UserProfile::new();
        if args.school_id.is_some() || args.school_name.is_some() {
            profile.school_info = Some(SchoolInfo {
                school_id: args.school_id,
                school_name: args.school_name,
            });
        }

        ChatConfig {
            endpoint: args
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            user_id: args.user.unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            timeout: args
                .timeout
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            use_color: !args.no_color,
            profile,
            ..ChatConfig::new()
        }
    }
}

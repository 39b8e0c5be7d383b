use serde::{Deserialize, Serialize};

/// A server-suggested follow-up control for the current turn.
///
/// The set of action types is closed: a response carrying an unrecognized
/// `type` fails to parse rather than rendering a control with undefined
/// activation behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Activation sends the payload as if the user typed it.
    QuickReply {
        /// Label shown on the control.
        text_label: String,
        /// Message text to send on activation.
        payload: String,
    },

    /// A product reference. The client surfaces it without navigating.
    ProductLink {
        /// Label shown on the control.
        text_label: String,
        /// Opaque product reference.
        payload: String,
    },

    /// A referral link. The client surfaces it without navigating.
    ReferralLink {
        /// Label shown on the control.
        text_label: String,
        /// Opaque referral reference.
        payload: String,
    },

    /// An external URL. The client surfaces it without navigating.
    ExternalUrl {
        /// Label shown on the control.
        text_label: String,
        /// The URL itself.
        payload: String,
    },
}

impl SuggestedAction {
    /// Create a quick-reply action.
    pub fn quick_reply(text_label: impl Into<String>, payload: impl Into<String>) -> Self {
        SuggestedAction::QuickReply {
            text_label: text_label.into(),
            payload: payload.into(),
        }
    }

    /// The label shown on the control.
    pub fn text_label(&self) -> &str {
        match self {
            SuggestedAction::QuickReply { text_label, .. }
            | SuggestedAction::ProductLink { text_label, .. }
            | SuggestedAction::ReferralLink { text_label, .. }
            | SuggestedAction::ExternalUrl { text_label, .. } => text_label,
        }
    }

    /// The action payload.
    pub fn payload(&self) -> &str {
        match self {
            SuggestedAction::QuickReply { payload, .. }
            | SuggestedAction::ProductLink { payload, .. }
            | SuggestedAction::ReferralLink { payload, .. }
            | SuggestedAction::ExternalUrl { payload, .. } => payload,
        }
    }
}

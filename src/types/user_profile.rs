use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// School details attached to a user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchoolInfo {
    /// Opaque school identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,

    /// Display name of the school.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
}

impl SchoolInfo {
    /// Creates school info with both fields set.
    pub fn new(school_id: impl Into<String>, school_name: impl Into<String>) -> Self {
        Self {
            school_id: Some(school_id.into()),
            school_name: Some(school_name.into()),
        }
    }
}

/// Optional personalization context sent with every chat request.
///
/// Every field is optional; an empty profile serializes as `{}`. The hosting
/// surface fills in whatever it knows about the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Free-form preference tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<String>>,

    /// Short summaries of past purchases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_purchases_summary: Option<Vec<String>>,

    /// Location hints, e.g. {"city": "...", "region": "..."}.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_context: Option<HashMap<String, String>>,

    /// The school the user supports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_info: Option<SchoolInfo>,
}

impl UserProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the school info.
    pub fn with_school_info(mut self, school_info: SchoolInfo) -> Self {
        self.school_info = Some(school_info);
        self
    }
}

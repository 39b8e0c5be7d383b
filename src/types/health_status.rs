use serde::{Deserialize, Serialize};

/// Response body of the service health probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    /// Reported status, "ok" when healthy.
    pub status: String,
}

impl HealthStatus {
    /// Returns true if the service reports itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

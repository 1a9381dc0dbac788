use serde::{Deserialize, Serialize};

// Version of the data-handling terms. Bumping it orphans every earlier record.
pub const CONSENT_POLICY_VERSION: &str = "2024-06";

// Record written when the user accepts the data-handling terms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub accepted: bool,
    // Epoch milliseconds.
    pub timestamp: u64,
}

impl ConsentRecord {
    pub fn accepted_at(timestamp: u64) -> Self {
        Self {
            accepted: true,
            timestamp,
        }
    }
}

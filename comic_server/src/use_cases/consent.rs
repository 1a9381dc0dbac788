use std::sync::Arc;

use crate::domain::consent::{CONSENT_POLICY_VERSION, ConsentRecord};
use crate::domain::ports::Clock;
use crate::use_cases::session::{SessionContext, consent_key};

// Consent flag scoped to one policy version.
#[derive(Clone)]
pub struct ConsentStore {
    session: SessionContext,
    clock: Arc<dyn Clock>,
    key: String,
}

impl ConsentStore {
    pub fn new(session: SessionContext, clock: Arc<dyn Clock>) -> Self {
        Self::for_version(session, clock, CONSENT_POLICY_VERSION)
    }

    pub fn for_version(session: SessionContext, clock: Arc<dyn Clock>, version: &str) -> Self {
        Self {
            session,
            clock,
            key: consent_key(version),
        }
    }

    pub fn get(&self) -> Option<ConsentRecord> {
        self.session.read_json(&self.key)
    }

    pub fn set(&self) {
        let record = ConsentRecord::accepted_at(self.clock.now_epoch_millis());
        self.session.write_json(&self.key, &record);
    }

    pub fn clear(&self) {
        self.session.remove(&self.key);
    }

    // Absent and declined records both mean "not consented".
    pub fn is_granted(&self) -> bool {
        self.get().is_some_and(|record| record.accepted)
    }
}

//! ---
//! fcp_section: "01-activation-core"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Activation coordination and driver resolution."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::sync::Arc;

use tracing::{debug, warn};

use fcprov_api::ActivationStatus;
use fcprov_store::{StatusRecord, StatusStore};

/// Idempotency guard over the status store.
///
/// Holds no state of its own: every call re-reads or re-writes the
/// backing store, so concurrent processes sharing one store see the
/// same gating decisions. The tracker is the sole writer of status
/// records; the coordinator only asks it questions and reports
/// outcomes.
#[derive(Clone)]
pub struct ActivationStateTracker {
    store: Arc<dyn StatusStore>,
}

impl ActivationStateTracker {
    pub fn new(store: Arc<dyn StatusStore>) -> Self {
        Self { store }
    }

    /// Activation is legal only while no status record exists. A store
    /// read error refuses the operation; skipping an activation is
    /// recoverable, double-activating is not.
    pub fn can_activate(&self, id: &str) -> bool {
        match self.store.read(id) {
            Ok(record) => record.is_none(),
            Err(err) => {
                warn!(request = id, error = %err, "status read failed during activation gating");
                false
            }
        }
    }

    /// Deactivation is legal exactly when activation is not.
    pub fn can_deactivate(&self, id: &str) -> bool {
        !self.can_activate(id)
    }

    /// Record that the construct is realized on the network.
    pub fn mark_active(&self, id: &str) {
        self.write(id, ActivationStatus::Active);
    }

    /// Record that the last transaction execution failed.
    pub fn mark_failed(&self, id: &str) {
        self.write(id, ActivationStatus::Failed);
    }

    /// Delete the status record after a successful deactivation, making
    /// a later activation of the same id legal again.
    pub fn clear(&self, id: &str) {
        if let Err(err) = self.store.delete(id) {
            warn!(request = id, error = %err, "failed to delete status record");
        } else {
            debug!(request = id, "status record cleared");
        }
    }

    /// Current status; `Absent` when no record exists.
    pub fn status(&self, id: &str) -> fcprov_store::Result<ActivationStatus> {
        Ok(self
            .store
            .read(id)?
            .map(|record| record.status)
            .unwrap_or(ActivationStatus::Absent))
    }

    fn write(&self, id: &str, status: ActivationStatus) {
        if let Err(err) = self.store.merge(id, StatusRecord::now(status)) {
            warn!(request = id, ?status, error = %err, "failed to write status record");
        } else {
            debug!(request = id, ?status, "status record written");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcprov_store::{MemoryStatusStore, StoreError};

    #[test]
    fn gating_follows_record_existence() {
        let tracker = ActivationStateTracker::new(Arc::new(MemoryStatusStore::new()));
        assert!(tracker.can_activate("fc-1"));
        assert!(!tracker.can_deactivate("fc-1"));

        tracker.mark_active("fc-1");
        assert!(!tracker.can_activate("fc-1"));
        assert!(tracker.can_deactivate("fc-1"));
        assert_eq!(tracker.status("fc-1").unwrap(), ActivationStatus::Active);

        tracker.clear("fc-1");
        assert!(tracker.can_activate("fc-1"));
        assert_eq!(tracker.status("fc-1").unwrap(), ActivationStatus::Absent);
    }

    #[test]
    fn failed_records_still_gate_activation() {
        let tracker = ActivationStateTracker::new(Arc::new(MemoryStatusStore::new()));
        tracker.mark_failed("fc-1");
        assert!(!tracker.can_activate("fc-1"));
        assert_eq!(tracker.status("fc-1").unwrap(), ActivationStatus::Failed);
    }

    struct BrokenStore;

    impl StatusStore for BrokenStore {
        fn read(&self, _id: &str) -> fcprov_store::Result<Option<StatusRecord>> {
            Err(StoreError::Io(std::io::Error::other("backing store down")))
        }

        fn merge(&self, _id: &str, _record: StatusRecord) -> fcprov_store::Result<()> {
            Err(StoreError::Io(std::io::Error::other("backing store down")))
        }

        fn delete(&self, _id: &str) -> fcprov_store::Result<()> {
            Err(StoreError::Io(std::io::Error::other("backing store down")))
        }
    }

    #[test]
    fn read_errors_refuse_activation() {
        let tracker = ActivationStateTracker::new(Arc::new(BrokenStore));
        assert!(!tracker.can_activate("fc-1"));
        assert!(tracker.can_deactivate("fc-1"));
        assert!(tracker.status("fc-1").is_err());
    }
}

//! ---
//! fcp_section: "03-state-persistence"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Status persistence abstractions and storage bindings."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::collections::HashMap;

use parking_lot::RwLock;

use crate::{Result, StatusRecord, StatusStore};

/// In-process status store for tests and single-node embeddings.
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    records: RwLock<HashMap<String, StatusRecord>>,
}

impl MemoryStatusStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusStore for MemoryStatusStore {
    fn read(&self, id: &str) -> Result<Option<StatusRecord>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn merge(&self, id: &str, record: StatusRecord) -> Result<()> {
        self.records.write().insert(id.to_owned(), record);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.records.write().remove(id);
        Ok(())
    }
}

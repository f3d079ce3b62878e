//! ---
//! fcp_section: "03-state-persistence"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Status persistence abstractions and storage bindings."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Result, StatusRecord, StatusStore, StoreError};

/// File-backed status store: one JSON document per request id.
///
/// The record for id `fc-1` lives at `<root>/fc-1.json`. Ids must be
/// usable as file names; ids containing path separators are rejected so
/// a request can never address a record outside the root.
#[derive(Debug, Clone)]
pub struct FileStatusStore {
    root: PathBuf,
}

impl FileStatusStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory holding the record files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(StoreError::InvalidId(id.to_owned()));
        }
        Ok(self.root.join(format!("{id}.json")))
    }
}

impl StatusStore for FileStatusStore {
    fn read(&self, id: &str) -> Result<Option<StatusRecord>> {
        let path = self.record_path(id)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let record = serde_json::from_str(&contents)?;
        Ok(Some(record))
    }

    fn merge(&self, id: &str, record: StatusRecord) -> Result<()> {
        let path = self.record_path(id)?;
        let serialized = serde_json::to_string_pretty(&record)?;
        fs::write(&path, serialized)?;
        debug!(request = id, path = %path.display(), status = ?record.status, "status record merged");
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.record_path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(request = id, path = %path.display(), "status record deleted");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

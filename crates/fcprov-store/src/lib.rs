//! ---
//! fcp_section: "03-state-persistence"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Status persistence abstractions and storage bindings."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! One status record per request id with read-if-exists / merge / delete
//! semantics. Absence of a record means the request is `Absent`; the
//! state tracker in `fcprov-core` is the sole writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fcprov_api::ActivationStatus;

/// Result alias used throughout the store crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error type for the status store subsystem.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Wrapper for IO errors encountered while reading/writing records.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Wrapper for JSON serialization issues.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// Reported when a request id cannot be used as a record key.
    #[error("invalid request id {0:?}")]
    InvalidId(String),
}

/// Persisted per-request status record.
///
/// Only `Active` and `Failed` are ever written; `Absent` is represented
/// by the record not existing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Recorded activation outcome.
    pub status: ActivationStatus,
    /// When the record was last merged.
    pub updated_at: DateTime<Utc>,
}

impl StatusRecord {
    /// Record with the given status, stamped now.
    pub fn now(status: ActivationStatus) -> Self {
        Self {
            status,
            updated_at: Utc::now(),
        }
    }
}

/// Backing store for activation status records.
///
/// Implementations must provide read-your-writes consistency within a
/// process: a `merge` followed by a `read` of the same id observes the
/// merged record.
pub trait StatusStore: Send + Sync {
    /// Read the record for `id`, `None` when absent.
    fn read(&self, id: &str) -> Result<Option<StatusRecord>>;

    /// Create or replace the record for `id`.
    fn merge(&self, id: &str, record: StatusRecord) -> Result<()>;

    /// Delete the record for `id`. Deleting a missing record is not an
    /// error.
    fn delete(&self, id: &str) -> Result<()>;
}

pub mod file;
pub mod memory;

pub use file::FileStatusStore;
pub use memory::MemoryStatusStore;

//! ---
//! fcp_section: "02-driver-contract"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Driver contract and shared domain types."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

/// Aggregated outcome of one transaction execution.
///
/// Exactly one result is produced per `activate`/`deactivate` call;
/// results are never merged after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationResult {
    successful: bool,
    message: String,
}

impl ActivationResult {
    pub fn success() -> Self {
        Self {
            successful: true,
            message: "transaction successful".to_owned(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            successful: false,
            message: message.into(),
        }
    }

    pub fn is_successful(&self) -> bool {
        self.successful
    }

    /// Human-readable outcome: the first failure message encountered, or
    /// a generic success note.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Externally visible activation state of a request.
///
/// Created implicitly as `Absent`; a coordinator run moves it to
/// `Active` or `Failed`; successful deactivation deletes the record,
/// which reads back as `Absent` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivationStatus {
    /// No status record exists for the request.
    Absent,
    /// The construct is realized on the network.
    Active,
    /// The last transaction execution failed; device state may be partial.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_carries_message() {
        let result = ActivationResult::fail("link down");
        assert!(!result.is_successful());
        assert_eq!(result.message(), "link down");
        assert!(ActivationResult::success().is_successful());
    }

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ActivationStatus::Active).unwrap(),
            "\"active\""
        );
        let status: ActivationStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(status, ActivationStatus::Failed);
    }
}

//! ---
//! fcp_section: "01-activation-core"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Activation coordination and driver resolution."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
//! Activation coordinator for forwarding constructs.
//!
//! Given a connectivity request with two endpoints, the coordinator
//! resolves the driver(s) able to realize each endpoint, groups them
//! into one transaction, executes it, and records the externally
//! visible activation status so a request is never double-activated.

pub mod coordinator;
pub mod registry;
pub mod topology;
pub mod tracker;
pub mod transaction;

pub use coordinator::ActivationCoordinator;
pub use registry::DriverRegistry;
pub use tracker::ActivationStateTracker;
pub use transaction::ActivationTransaction;

//! ---
//! fcp_section: "02-driver-contract"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Driver contract and shared domain types."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
//! Contract crate for FC-PROV activation drivers.
//! A driver translates one endpoint of a forwarding construct into
//! device-specific configuration; everything a driver author needs
//! (domain types, the blackboard context, the deadline token, and the
//! error taxonomy) lives here so driver crates never depend on the
//! coordinator.

pub mod context;
pub mod deadline;
pub mod driver;
pub mod endpoint;
pub mod error;
pub mod result;

pub use context::ActivationContext;
pub use deadline::ActivationDeadline;
pub use driver::{ActivationDriver, DriverFactory, FnDriverFactory};
pub use endpoint::{ConnectivityRequest, EndpointRef};
pub use error::{ActivationError, ResolutionError};
pub use result::{ActivationResult, ActivationStatus};

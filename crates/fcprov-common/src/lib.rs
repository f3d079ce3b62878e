//! ---
//! fcp_section: "04-configuration-logging"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Shared configuration and logging primitives."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
//! Shared primitives for the FC-PROV workspace: configuration loading
//! and the tracing bootstrap consumed by embedders.

pub mod config;
pub mod logging;

pub use config::{ActivationConfig, ActivatorConfig, LoggingConfig, RollbackMode};
pub use logging::{init_tracing, LogFormat};

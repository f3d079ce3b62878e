//! ---
//! fcp_section: "05-reference-drivers"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Reference activation drivers."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
//! Reference drivers: the smallest useful implementations of the
//! activation driver contract, meant as starting points for vendor
//! driver crates and as fixtures for end-to-end suites.

pub mod dry_run;
pub mod noop;

pub use dry_run::{DryRunDriver, DryRunFactory, DryRunLedger};
pub use noop::NoopDriver;

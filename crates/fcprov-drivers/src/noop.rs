//! ---
//! fcp_section: "05-reference-drivers"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Reference activation drivers."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use fcprov_api::{ActivationContext, ActivationDeadline, ActivationDriver, EndpointRef};

/// Driver for constructs that need no device work at all, e.g. when the
/// element pre-provisions the service path. Minimum priority so it runs
/// before any real driver in the same transaction.
#[derive(Debug, Default)]
pub struct NoopDriver;

impl ActivationDriver for NoopDriver {
    fn initialize(
        &mut self,
        _local: &EndpointRef,
        _remote: &EndpointRef,
        _ctx: &ActivationContext,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn activate(&mut self, _deadline: &ActivationDeadline) -> anyhow::Result<()> {
        Ok(())
    }

    fn deactivate(&mut self, _deadline: &ActivationDeadline) -> anyhow::Result<()> {
        Ok(())
    }

    fn priority(&self) -> i32 {
        i32::MIN
    }
}

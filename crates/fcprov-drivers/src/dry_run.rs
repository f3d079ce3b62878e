//! ---
//! fcp_section: "05-reference-drivers"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Reference activation drivers."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::sync::Arc;

use anyhow::bail;
use parking_lot::Mutex;
use tracing::info;

use fcprov_api::{
    ActivationContext, ActivationDeadline, ActivationDriver, DriverFactory, EndpointRef,
};

/// Shared record of the device commands a dry-run fleet would have
/// pushed, in the order they would have been pushed.
pub type DryRunLedger = Arc<Mutex<Vec<String>>>;

/// Driver that renders the configuration it would push and records it
/// instead of touching a device. Useful for staging validation and for
/// exercising the full coordinator pipeline without network I/O.
pub struct DryRunDriver {
    factory_id: String,
    ledger: DryRunLedger,
    bound: Option<(EndpointRef, EndpointRef)>,
}

impl DryRunDriver {
    pub fn new(factory_id: impl Into<String>, ledger: DryRunLedger) -> Self {
        Self {
            factory_id: factory_id.into(),
            ledger,
            bound: None,
        }
    }

    fn bound(&self) -> anyhow::Result<&(EndpointRef, EndpointRef)> {
        match &self.bound {
            Some(pair) => Ok(pair),
            None => bail!("driver used before initialize"),
        }
    }
}

impl ActivationDriver for DryRunDriver {
    fn initialize(
        &mut self,
        local: &EndpointRef,
        remote: &EndpointRef,
        ctx: &ActivationContext,
    ) -> anyhow::Result<()> {
        let request = match ctx.request() {
            Some(request) => request.id.clone(),
            None => bail!("activation context carries no request"),
        };
        info!(driver = %self.factory_id, request = %request, local = %local, remote = %remote, "dry-run driver bound");
        self.bound = Some((local.clone(), remote.clone()));
        Ok(())
    }

    fn activate(&mut self, deadline: &ActivationDeadline) -> anyhow::Result<()> {
        deadline.check()?;
        let (local, remote) = self.bound()?.clone();
        self.ledger
            .lock()
            .push(format!("{}: connect {local} -> {remote}", self.factory_id));
        Ok(())
    }

    fn deactivate(&mut self, deadline: &ActivationDeadline) -> anyhow::Result<()> {
        deadline.check()?;
        let (local, remote) = self.bound()?.clone();
        self.ledger
            .lock()
            .push(format!("{}: disconnect {local} -> {remote}", self.factory_id));
        Ok(())
    }

    fn commit(&mut self) {
        info!(driver = %self.factory_id, "dry-run commit");
    }

    fn rollback(&mut self) {
        self.ledger
            .lock()
            .push(format!("{}: rollback", self.factory_id));
    }
}

/// Factory claiming every endpoint whose element id starts with a
/// prefix, e.g. `edge-` for a lab of dry-run edge elements.
pub struct DryRunFactory {
    id: String,
    element_prefix: String,
    ledger: DryRunLedger,
}

impl DryRunFactory {
    pub fn new(
        id: impl Into<String>,
        element_prefix: impl Into<String>,
        ledger: DryRunLedger,
    ) -> Self {
        Self {
            id: id.into(),
            element_prefix: element_prefix.into(),
            ledger,
        }
    }

    /// Fresh, empty command ledger.
    pub fn ledger() -> DryRunLedger {
        Arc::new(Mutex::new(Vec::new()))
    }
}

impl DriverFactory for DryRunFactory {
    fn id(&self) -> &str {
        &self.id
    }

    fn driver_for(
        &self,
        endpoint: &EndpointRef,
        _ctx: &ActivationContext,
    ) -> Option<Box<dyn ActivationDriver>> {
        if !endpoint.element_id.starts_with(&self.element_prefix) {
            return None;
        }
        Some(Box::new(DryRunDriver::new(
            self.id.clone(),
            self.ledger.clone(),
        )))
    }
}

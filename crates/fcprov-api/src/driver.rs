//! ---
//! fcp_section: "02-driver-contract"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Driver contract and shared domain types."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use crate::context::ActivationContext;
use crate::deadline::ActivationDeadline;
use crate::endpoint::EndpointRef;

/// A pluggable unit translating one endpoint of a forwarding construct
/// into device-specific configuration.
///
/// Lifecycle within one transaction attempt:
/// 1. the registry instantiates the driver via its factory,
/// 2. `initialize` binds it to the endpoint pair — on error the attempt
///    stops before any device work,
/// 3. `activate` or `deactivate` is called once,
/// 4. `commit` fires when every driver in the transaction succeeded;
///    `rollback` fires only in compensating mode after a failure.
///
/// A driver instance is scoped to a single attempt and discarded
/// afterwards; implementations own whatever device session they need and
/// must not pool it across requests.
pub trait ActivationDriver: Send {
    /// Bind the driver to its endpoint pair before any device work.
    /// `local` is the endpoint this driver realizes; `remote` is the far
    /// end (for same-element constructs, the other port of the pair).
    fn initialize(
        &mut self,
        local: &EndpointRef,
        remote: &EndpointRef,
        ctx: &ActivationContext,
    ) -> anyhow::Result<()>;

    /// Push the configuration realizing the construct. Blocking; may
    /// perform network I/O and should honour `deadline`.
    fn activate(&mut self, deadline: &ActivationDeadline) -> anyhow::Result<()>;

    /// Remove the configuration realizing the construct.
    fn deactivate(&mut self, deadline: &ActivationDeadline) -> anyhow::Result<()>;

    /// Called once every driver in the transaction succeeded.
    fn commit(&mut self) {}

    /// Called after a transaction failure, compensating mode only.
    fn rollback(&mut self) {}

    /// Execution order within a transaction; lower runs first.
    fn priority(&self) -> i32 {
        0
    }
}

/// Produces drivers for the endpoints a plugin can realize.
///
/// `driver_for` is the capability predicate and the instantiation in one
/// step: `None` means "not my endpoint", `Some` hands back a fresh,
/// uninitialized driver. The registry requires exactly one factory to
/// answer per endpoint.
pub trait DriverFactory: Send + Sync {
    /// Stable identifier used in logs to pinpoint duplicate installs.
    fn id(&self) -> &str;

    fn driver_for(
        &self,
        endpoint: &EndpointRef,
        ctx: &ActivationContext,
    ) -> Option<Box<dyn ActivationDriver>>;
}

/// Factory assembled from a predicate and a build closure, for plugins
/// whose capability test is a plain endpoint match.
pub struct FnDriverFactory<P, B> {
    id: String,
    predicate: P,
    build: B,
}

impl<P, B> FnDriverFactory<P, B>
where
    P: Fn(&EndpointRef) -> bool + Send + Sync,
    B: Fn() -> Box<dyn ActivationDriver> + Send + Sync,
{
    pub fn new(id: impl Into<String>, predicate: P, build: B) -> Self {
        Self {
            id: id.into(),
            predicate,
            build,
        }
    }
}

impl<P, B> DriverFactory for FnDriverFactory<P, B>
where
    P: Fn(&EndpointRef) -> bool + Send + Sync,
    B: Fn() -> Box<dyn ActivationDriver> + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn driver_for(
        &self,
        endpoint: &EndpointRef,
        _ctx: &ActivationContext,
    ) -> Option<Box<dyn ActivationDriver>> {
        if (self.predicate)(endpoint) {
            Some((self.build)())
        } else {
            None
        }
    }
}

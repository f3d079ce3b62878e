//! ---
//! fcp_section: "01-activation-core"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Activation coordination and driver resolution."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use fcprov_api::{
    ActivationContext, ActivationDriver, DriverFactory, EndpointRef, FnDriverFactory,
    ResolutionError,
};

/// Registry mapping endpoints to the factories able to realize them.
///
/// The factory set is shared state: every activation attempt reads it,
/// and plugin lifecycle events (a driver coming online or offline)
/// replace it. Reads take the shared lock so concurrent resolutions
/// proceed in parallel; rebinds take the exclusive lock, so they wait
/// for in-flight resolutions and block new ones until the swap is done.
/// Readers never observe a half-swapped set.
#[derive(Default)]
pub struct DriverRegistry {
    factories: RwLock<Vec<Arc<dyn DriverFactory>>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the single driver able to realize `endpoint`.
    ///
    /// Zero matching factories is a missing-plugin condition; more than
    /// one is a configuration defect (duplicate installs claiming the
    /// same endpoint). The returned driver is not initialized.
    pub fn resolve(
        &self,
        endpoint: &EndpointRef,
        ctx: &ActivationContext,
    ) -> Result<Box<dyn ActivationDriver>, ResolutionError> {
        let factories = self.factories.read();
        let mut matches: Vec<(&str, Box<dyn ActivationDriver>)> = Vec::new();
        for factory in factories.iter() {
            if let Some(driver) = factory.driver_for(endpoint, ctx) {
                matches.push((factory.id(), driver));
            }
        }

        if matches.is_empty() {
            warn!(endpoint = %endpoint, "no activation driver found");
            return Err(ResolutionError::NotFound {
                endpoint: endpoint.clone(),
            });
        }
        if matches.len() > 1 {
            let claimants: Vec<&str> = matches.iter().map(|(id, _)| *id).collect();
            warn!(
                endpoint = %endpoint,
                factories = claimants.join(", "),
                "multiple activation drivers found"
            );
            return Err(ResolutionError::Ambiguous {
                endpoint: endpoint.clone(),
                matches: matches.len(),
            });
        }

        let (factory_id, driver) = matches.swap_remove(0);
        debug!(endpoint = %endpoint, factory = factory_id, "activation driver resolved");
        Ok(driver)
    }

    /// Add a factory to the current set.
    pub fn register(&self, factory: Arc<dyn DriverFactory>) {
        let mut factories = self.factories.write();
        debug!(factory = factory.id(), "driver factory bound");
        factories.push(factory);
    }

    /// Register a predicate/build closure pair as a factory.
    pub fn register_fn<P, B>(&self, id: impl Into<String>, predicate: P, build: B)
    where
        P: Fn(&EndpointRef) -> bool + Send + Sync + 'static,
        B: Fn() -> Box<dyn ActivationDriver> + Send + Sync + 'static,
    {
        self.register(Arc::new(FnDriverFactory::new(id, predicate, build)));
    }

    /// Replace the whole factory set atomically (service rebinding).
    pub fn set_factories(&self, next: Vec<Arc<dyn DriverFactory>>) {
        let mut factories = self.factories.write();
        debug!(count = next.len(), "driver factory set replaced");
        *factories = next;
    }

    /// Drop every registered factory.
    pub fn unregister_all(&self) {
        let mut factories = self.factories.write();
        debug!(count = factories.len(), "driver factories unbound");
        factories.clear();
    }

    /// Number of registered factories.
    pub fn factory_count(&self) -> usize {
        self.factories.read().len()
    }
}

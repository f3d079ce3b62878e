//! ---
//! fcp_section: "01-activation-core"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Activation coordination and driver resolution."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{info, warn};

use fcprov_api::{
    ActivationContext, ActivationDeadline, ActivationError, ActivationResult, ActivationStatus,
    ConnectivityRequest,
};
use fcprov_common::{ActivationConfig, RollbackMode};
use fcprov_store::StatusStore;

use crate::registry::DriverRegistry;
use crate::topology;
use crate::tracker::ActivationStateTracker;
use crate::transaction::ActivationTransaction;

/// Coordinates activation and deactivation of forwarding constructs.
///
/// One coordinator serves the whole process; callers may invoke it from
/// any number of threads. Operations on different request ids run in
/// parallel; operations on the same id are serialized through a per-id
/// mutex so the gate check and the status write behave as one step.
pub struct ActivationCoordinator {
    registry: Arc<DriverRegistry>,
    tracker: ActivationStateTracker,
    request_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    rollback: RollbackMode,
    driver_timeout: Option<Duration>,
}

impl ActivationCoordinator {
    /// Coordinator with default tuning: no driver timeout, no
    /// compensation on partial failure.
    pub fn new(registry: Arc<DriverRegistry>, store: Arc<dyn StatusStore>) -> Self {
        Self {
            registry,
            tracker: ActivationStateTracker::new(store),
            request_locks: Mutex::new(HashMap::new()),
            rollback: RollbackMode::default(),
            driver_timeout: None,
        }
    }

    /// Coordinator tuned from configuration.
    pub fn with_config(
        registry: Arc<DriverRegistry>,
        store: Arc<dyn StatusStore>,
        config: &ActivationConfig,
    ) -> Self {
        Self {
            registry,
            tracker: ActivationStateTracker::new(store),
            request_locks: Mutex::new(HashMap::new()),
            rollback: config.rollback,
            driver_timeout: config.driver_timeout,
        }
    }

    /// Activate a forwarding construct under the configured deadline.
    pub fn activate(&self, request: &ConnectivityRequest) -> ActivationResult {
        self.activate_within(request, &self.default_deadline())
    }

    /// Activate a forwarding construct under an explicit deadline.
    pub fn activate_within(
        &self,
        request: &ConnectivityRequest,
        deadline: &ActivationDeadline,
    ) -> ActivationResult {
        let lock = self.request_lock(&request.id);
        let _serialized = lock.lock();

        if !self.tracker.can_activate(&request.id) {
            let err = ActivationError::IllegalState(format!(
                "request {} already has a status record; deactivate it first",
                request.id
            ));
            info!(request = %request.id, error = %err, "activation refused");
            return ActivationResult::fail(err.to_string());
        }

        let mut tx = match self.prepare_transaction(request) {
            Ok(tx) => tx,
            Err(err) => {
                warn!(request = %request.id, error = %err, "no transaction for activation request");
                return ActivationResult::fail(err.to_string());
            }
        };

        let result = tx.activate(deadline);
        if result.is_successful() {
            self.tracker.mark_active(&request.id);
            info!(request = %request.id, "forwarding construct activated");
        } else {
            self.tracker.mark_failed(&request.id);
            warn!(request = %request.id, reason = result.message(), "forwarding construct activation failed");
        }
        result
    }

    /// Deactivate a forwarding construct under the configured deadline.
    pub fn deactivate(&self, request: &ConnectivityRequest) -> ActivationResult {
        self.deactivate_within(request, &self.default_deadline())
    }

    /// Deactivate a forwarding construct under an explicit deadline.
    pub fn deactivate_within(
        &self,
        request: &ConnectivityRequest,
        deadline: &ActivationDeadline,
    ) -> ActivationResult {
        let lock = self.request_lock(&request.id);
        let _serialized = lock.lock();

        if !self.tracker.can_deactivate(&request.id) {
            let err = ActivationError::IllegalState(format!(
                "no status record for request {}; nothing to deactivate",
                request.id
            ));
            info!(request = %request.id, error = %err, "deactivation refused");
            return ActivationResult::fail(err.to_string());
        }

        let mut tx = match self.prepare_transaction(request) {
            Ok(tx) => tx,
            Err(err) => {
                warn!(request = %request.id, error = %err, "no transaction for deactivation request");
                return ActivationResult::fail(err.to_string());
            }
        };

        let result = tx.deactivate(deadline);
        if result.is_successful() {
            self.tracker.clear(&request.id);
            info!(request = %request.id, "forwarding construct deactivated");
        } else {
            self.tracker.mark_failed(&request.id);
            warn!(request = %request.id, reason = result.message(), "forwarding construct deactivation failed");
        }
        result
    }

    /// Replace a construct: deactivate `old`, then activate `new`.
    ///
    /// Not transactional across the pair; a failed deactivation leaves
    /// the old construct in place and the new one untouched.
    pub fn update(
        &self,
        old: &ConnectivityRequest,
        new: &ConnectivityRequest,
    ) -> ActivationResult {
        let result = self.deactivate(old);
        if !result.is_successful() {
            return result;
        }
        self.activate(new)
    }

    /// Status read API for dashboards and tests.
    pub fn status(&self, id: &str) -> fcprov_store::Result<ActivationStatus> {
        self.tracker.status(id)
    }

    fn default_deadline(&self) -> ActivationDeadline {
        match self.driver_timeout {
            Some(timeout) => ActivationDeadline::within(timeout),
            None => ActivationDeadline::none(),
        }
    }

    fn request_lock(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.request_locks.lock();
        locks.entry(id.to_owned()).or_default().clone()
    }

    /// Resolve and initialize the driver(s) for `request`.
    ///
    /// Same-element constructs need exactly one driver, resolved against
    /// the A end. Split constructs need a driver per end, each resolved
    /// independently with its own context and initialized with the far
    /// end as remote; unless both resolve, no transaction exists and
    /// nothing is attempted on-wire.
    fn prepare_transaction(
        &self,
        request: &ConnectivityRequest,
    ) -> Result<ActivationTransaction, ActivationError> {
        let shared = Arc::new(request.clone());
        let a = &request.endpoint_a;
        let z = &request.endpoint_z;
        let mut tx = ActivationTransaction::new(self.rollback);

        if topology::is_same_element(a, z) {
            let ctx = ActivationContext::for_request(shared);
            let mut driver = self.registry.resolve(a, &ctx)?;
            driver
                .initialize(a, z, &ctx)
                .map_err(|err| ActivationError::DriverInitialization(format!("{err:#}")))?;
            tx.add_driver(driver);
        } else {
            let ctx_a = ActivationContext::for_request(shared.clone());
            let ctx_z = ActivationContext::for_request(shared);
            let a_end = self.registry.resolve(a, &ctx_a);
            let z_end = self.registry.resolve(z, &ctx_z);

            let (mut driver_a, mut driver_z) = match (a_end, z_end) {
                (Ok(driver_a), Ok(driver_z)) => (driver_a, driver_z),
                _ => {
                    return Err(ActivationError::BothEndsRequired {
                        a: a.clone(),
                        z: z.clone(),
                    })
                }
            };
            driver_a
                .initialize(a, z, &ctx_a)
                .map_err(|err| ActivationError::DriverInitialization(format!("{err:#}")))?;
            driver_z
                .initialize(z, a, &ctx_z)
                .map_err(|err| ActivationError::DriverInitialization(format!("{err:#}")))?;
            tx.add_driver(driver_a);
            tx.add_driver(driver_z);
        }

        Ok(tx)
    }
}

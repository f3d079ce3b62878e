//! ---
//! fcp_section: "01-activation-core"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Activation coordination and driver resolution."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use tracing::{info, warn};

use fcprov_api::{ActivationDeadline, ActivationDriver, ActivationResult};
use fcprov_common::RollbackMode;

enum Op {
    Activate,
    Deactivate,
}

impl Op {
    fn label(&self) -> &'static str {
        match self {
            Op::Activate => "activate",
            Op::Deactivate => "deactivate",
        }
    }
}

/// Ordered group of initialized drivers executed together for one
/// request.
///
/// The coordinator only constructs a transaction once every required
/// driver has resolved and initialized; a partially built transaction is
/// never exposed. Drivers run in `priority()` order; insertion order
/// breaks ties.
pub struct ActivationTransaction {
    drivers: Vec<Box<dyn ActivationDriver>>,
    rollback: RollbackMode,
}

impl ActivationTransaction {
    pub fn new(rollback: RollbackMode) -> Self {
        Self {
            drivers: Vec::new(),
            rollback,
        }
    }

    pub fn add_driver(&mut self, driver: Box<dyn ActivationDriver>) {
        self.drivers.push(driver);
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// Run every driver's `activate`; aggregate into one result.
    pub fn activate(&mut self, deadline: &ActivationDeadline) -> ActivationResult {
        self.run(Op::Activate, deadline)
    }

    /// Run every driver's `deactivate`; aggregate into one result.
    pub fn deactivate(&mut self, deadline: &ActivationDeadline) -> ActivationResult {
        self.run(Op::Deactivate, deadline)
    }

    fn run(&mut self, op: Op, deadline: &ActivationDeadline) -> ActivationResult {
        if self.drivers.is_empty() {
            return ActivationResult::fail("at least one driver required");
        }
        // stable: insertion order is preserved for equal priorities
        self.drivers.sort_by_key(|driver| driver.priority());

        let mut failure: Option<String> = None;
        let mut executed = 0usize;
        for driver in self.drivers.iter_mut() {
            let outcome = match op {
                Op::Activate => driver.activate(deadline),
                Op::Deactivate => driver.deactivate(deadline),
            };
            executed += 1;
            if let Err(err) = outcome {
                let mut message = format!("{err:#}");
                if message.is_empty() {
                    message = format!("{} transaction failed", op.label());
                }
                failure = Some(message);
                break;
            }
        }

        match failure {
            None => {
                for driver in self.drivers.iter_mut() {
                    driver.commit();
                }
                info!(op = op.label(), drivers = self.drivers.len(), "transaction successful");
                ActivationResult::success()
            }
            Some(message) => {
                warn!(op = op.label(), executed, reason = %message, "transaction failed");
                if self.rollback == RollbackMode::Compensate {
                    for driver in self.drivers.iter_mut().take(executed) {
                        driver.rollback();
                    }
                }
                ActivationResult::fail(message)
            }
        }
    }
}

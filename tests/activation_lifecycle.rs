//! ---
//! fcp_section: "06-testing-qa"
//! fcp_subsection: "integration-tests"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "End-to-end activation lifecycle suites over the file-backed store."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::Duration;

use fcprov_api::{
    ActivationContext, ActivationDeadline, ActivationDriver, ActivationStatus,
    ConnectivityRequest, EndpointRef,
};
use fcprov_common::{ActivationConfig, RollbackMode};
use fcprov_core::{ActivationCoordinator, DriverRegistry};
use fcprov_drivers::{DryRunFactory, NoopDriver};
use fcprov_store::{FileStatusStore, StatusStore};

fn edge_request(id: &str) -> ConnectivityRequest {
    ConnectivityRequest::new(
        id,
        EndpointRef::new("edge-1", "eth0"),
        EndpointRef::new("edge-2", "eth4"),
    )
}

#[test]
fn split_construct_lifecycle_renders_commands_and_persists_state() {
    let state = tempfile::tempdir().expect("tempdir");
    let store: Arc<dyn StatusStore> =
        Arc::new(FileStatusStore::open(state.path()).expect("store"));

    let ledger = DryRunFactory::ledger();
    let registry = Arc::new(DriverRegistry::new());
    registry.register(Arc::new(DryRunFactory::new(
        "dry-run",
        "edge-",
        ledger.clone(),
    )));

    let coordinator = ActivationCoordinator::new(registry, store);
    let request = edge_request("fc-100");

    let activated = coordinator.activate(&request);
    assert!(activated.is_successful(), "{}", activated.message());
    assert_eq!(coordinator.status("fc-100").unwrap(), ActivationStatus::Active);
    assert_eq!(
        *ledger.lock(),
        vec![
            "dry-run: connect edge-1/eth0 -> edge-2/eth4",
            "dry-run: connect edge-2/eth4 -> edge-1/eth0",
        ]
    );

    let deactivated = coordinator.deactivate(&request);
    assert!(deactivated.is_successful(), "{}", deactivated.message());
    assert_eq!(coordinator.status("fc-100").unwrap(), ActivationStatus::Absent);
    assert_eq!(ledger.lock().len(), 4);
}

#[test]
fn persisted_state_survives_a_coordinator_restart() {
    let state = tempfile::tempdir().expect("tempdir");
    let request = edge_request("fc-200");

    {
        let store: Arc<dyn StatusStore> =
            Arc::new(FileStatusStore::open(state.path()).expect("store"));
        let registry = Arc::new(DriverRegistry::new());
        registry.register(Arc::new(DryRunFactory::new(
            "dry-run",
            "edge-",
            DryRunFactory::ledger(),
        )));
        let coordinator = ActivationCoordinator::new(registry, store);
        assert!(coordinator.activate(&request).is_successful());
    }

    // A fresh process over the same state directory sees the construct
    // as active and refuses to activate it twice.
    let store: Arc<dyn StatusStore> =
        Arc::new(FileStatusStore::open(state.path()).expect("store"));
    let registry = Arc::new(DriverRegistry::new());
    let ledger = DryRunFactory::ledger();
    registry.register(Arc::new(DryRunFactory::new(
        "dry-run",
        "edge-",
        ledger.clone(),
    )));
    let coordinator = ActivationCoordinator::new(registry, store);

    assert_eq!(coordinator.status("fc-200").unwrap(), ActivationStatus::Active);
    let refused = coordinator.activate(&request);
    assert!(!refused.is_successful());
    assert!(ledger.lock().is_empty(), "refusal must not reach drivers");

    assert!(coordinator.deactivate(&request).is_successful());
    assert_eq!(coordinator.status("fc-200").unwrap(), ActivationStatus::Absent);
}

#[test]
fn same_element_construct_uses_one_driver() {
    let state = tempfile::tempdir().expect("tempdir");
    let store: Arc<dyn StatusStore> =
        Arc::new(FileStatusStore::open(state.path()).expect("store"));

    let ledger = DryRunFactory::ledger();
    let registry = Arc::new(DriverRegistry::new());
    registry.register(Arc::new(DryRunFactory::new(
        "dry-run",
        "edge-",
        ledger.clone(),
    )));

    let coordinator = ActivationCoordinator::new(registry, store);
    let request = ConnectivityRequest::new(
        "fc-local",
        EndpointRef::new("edge-1", "eth0"),
        EndpointRef::new("edge-1", "eth1"),
    );

    assert!(coordinator.activate(&request).is_successful());
    assert_eq!(
        *ledger.lock(),
        vec!["dry-run: connect edge-1/eth0 -> edge-1/eth1"]
    );
}

#[test]
fn unmatched_end_fails_without_touching_devices_or_state() {
    let state = tempfile::tempdir().expect("tempdir");
    let store: Arc<dyn StatusStore> =
        Arc::new(FileStatusStore::open(state.path()).expect("store"));

    let ledger = DryRunFactory::ledger();
    let registry = Arc::new(DriverRegistry::new());
    registry.register(Arc::new(DryRunFactory::new(
        "dry-run",
        "edge-",
        ledger.clone(),
    )));

    let coordinator = ActivationCoordinator::new(registry, store);
    let request = ConnectivityRequest::new(
        "fc-half",
        EndpointRef::new("edge-1", "eth0"),
        EndpointRef::new("foreign-9", "eth0"),
    );

    let result = coordinator.activate(&request);
    assert!(!result.is_successful());
    assert!(result.message().contains("both ends"));
    assert!(ledger.lock().is_empty());
    assert_eq!(coordinator.status("fc-half").unwrap(), ActivationStatus::Absent);
}

/// Activation driver that fails on-wire work after the rest of the
/// transaction succeeded, to exercise compensation.
struct FaultyDriver;

impl ActivationDriver for FaultyDriver {
    fn initialize(
        &mut self,
        _local: &EndpointRef,
        _remote: &EndpointRef,
        _ctx: &ActivationContext,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn activate(&mut self, _deadline: &ActivationDeadline) -> anyhow::Result<()> {
        anyhow::bail!("element rejected cross-connect")
    }

    fn deactivate(&mut self, _deadline: &ActivationDeadline) -> anyhow::Result<()> {
        Ok(())
    }

    fn priority(&self) -> i32 {
        // runs after the dry-run end
        10
    }
}

#[test]
fn compensation_rolls_back_the_executed_end() {
    let state = tempfile::tempdir().expect("tempdir");
    let store: Arc<dyn StatusStore> =
        Arc::new(FileStatusStore::open(state.path()).expect("store"));

    let ledger = DryRunFactory::ledger();
    let registry = Arc::new(DriverRegistry::new());
    registry.register(Arc::new(DryRunFactory::new(
        "dry-run",
        "edge-",
        ledger.clone(),
    )));
    registry.register_fn(
        "faulty",
        |endpoint: &EndpointRef| endpoint.element_id.starts_with("flaky-"),
        || Box::new(FaultyDriver) as Box<dyn ActivationDriver>,
    );

    let config = ActivationConfig {
        rollback: RollbackMode::Compensate,
        driver_timeout: Some(Duration::from_secs(30)),
        state_dir: state.path().to_path_buf(),
    };
    let coordinator = ActivationCoordinator::with_config(registry, store, &config);

    let request = ConnectivityRequest::new(
        "fc-flaky",
        EndpointRef::new("edge-1", "eth0"),
        EndpointRef::new("flaky-1", "eth0"),
    );

    let result = coordinator.activate(&request);
    assert!(!result.is_successful());
    assert!(result.message().contains("rejected"));
    assert_eq!(coordinator.status("fc-flaky").unwrap(), ActivationStatus::Failed);
    assert_eq!(
        *ledger.lock(),
        vec![
            "dry-run: connect edge-1/eth0 -> flaky-1/eth0",
            "dry-run: rollback",
        ]
    );
}

#[test]
fn minimum_priority_driver_runs_before_the_rest() {
    let state = tempfile::tempdir().expect("tempdir");
    let store: Arc<dyn StatusStore> =
        Arc::new(FileStatusStore::open(state.path()).expect("store"));

    let ledger = DryRunFactory::ledger();
    let registry = Arc::new(DriverRegistry::new());
    registry.register(Arc::new(DryRunFactory::new(
        "dry-run",
        "edge-",
        ledger.clone(),
    )));
    registry.register_fn(
        "noop",
        |endpoint: &EndpointRef| endpoint.element_id.starts_with("core-"),
        || Box::new(NoopDriver) as Box<dyn ActivationDriver>,
    );

    let coordinator = ActivationCoordinator::new(registry, store);
    let request = ConnectivityRequest::new(
        "fc-mixed",
        EndpointRef::new("edge-1", "eth0"),
        EndpointRef::new("core-1", "lag3"),
    );

    // The noop end contributes no commands but the transaction still
    // succeeds as a whole and records state once.
    assert!(coordinator.activate(&request).is_successful());
    assert_eq!(coordinator.status("fc-mixed").unwrap(), ActivationStatus::Active);
    assert_eq!(
        *ledger.lock(),
        vec!["dry-run: connect edge-1/eth0 -> core-1/lag3"]
    );
}

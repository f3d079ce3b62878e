//! ---
//! fcp_section: "02-driver-contract"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Driver contract and shared domain types."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::bail;

/// Deadline and cancellation token threaded through every driver call.
///
/// Drivers performing device I/O should call [`check`](Self::check) at
/// natural boundaries (before opening a session, between config pushes).
/// The default is `none()`: drivers run to completion, which matches the
/// historical behavior of the activation pipeline.
#[derive(Debug, Clone)]
pub struct ActivationDeadline {
    expires_at: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl ActivationDeadline {
    /// No timeout; cancellation still available.
    pub fn none() -> Self {
        Self {
            expires_at: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Expire `timeout` from now.
    pub fn within(timeout: Duration) -> Self {
        Self {
            expires_at: Some(Instant::now() + timeout),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation. Observed by every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|at| Instant::now() >= at)
            .unwrap_or(false)
    }

    /// Remaining budget, `None` when no timeout was set.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Fail fast when the operation should no longer proceed.
    pub fn check(&self) -> anyhow::Result<()> {
        if self.is_cancelled() {
            bail!("operation cancelled");
        }
        if self.is_expired() {
            bail!("operation deadline exceeded");
        }
        Ok(())
    }
}

impl Default for ActivationDeadline {
    fn default() -> Self {
        Self::none()
    }
}

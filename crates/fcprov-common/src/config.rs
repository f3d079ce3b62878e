//! ---
//! fcp_section: "04-configuration-logging"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Shared configuration and logging primitives."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::debug;

use crate::logging::LogFormat;

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::StructuredJson
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("target/activation-state")
}

/// Primary configuration object for an FC-PROV embedding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivatorConfig {
    /// Activation pipeline tuning.
    #[serde(default)]
    pub activation: ActivationConfig,
    /// Logging sink configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ActivatorConfig {
    pub const ENV_CONFIG_PATH: &'static str = "FCPROV_CONFIG";

    /// Load configuration from disk, respecting the `FCPROV_CONFIG`
    /// override, falling back to the first existing candidate path.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                return Self::from_path(PathBuf::from(env_path));
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                return Self::from_path(candidate.as_ref().to_path_buf());
            }
        }

        Err(anyhow!(
            "no configuration files found. inspected: {}",
            candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    fn from_path(path: PathBuf) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<ActivatorConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.activation.driver_timeout {
            if timeout.is_zero() {
                return Err(anyhow!("activation.driver_timeout must be greater than zero"));
            }
        }
        if self.activation.state_dir.as_os_str().is_empty() {
            return Err(anyhow!("activation.state_dir must not be empty"));
        }
        Ok(())
    }
}

/// Tuning for the activation pipeline.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// Behavior on partial transaction failure.
    #[serde(default)]
    pub rollback: RollbackMode,
    /// Per-operation driver deadline in seconds; absent means no timeout.
    #[serde_as(as = "Option<DurationSeconds<u64>>")]
    #[serde(default)]
    pub driver_timeout: Option<Duration>,
    /// Directory for the file-backed status store.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            rollback: RollbackMode::default(),
            driver_timeout: None,
            state_dir: default_state_dir(),
        }
    }
}

/// What a transaction does with already-activated drivers when a later
/// driver in the same execution fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RollbackMode {
    /// Report the aggregated failure and leave device state as-is. This
    /// matches the long-standing pipeline behavior.
    #[default]
    ReportOnly,
    /// Invoke `rollback` on every driver that ran in the failed
    /// execution, the failing driver included.
    Compensate,
}

/// Logging sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory receiving the rolling log files.
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    /// Log file name prefix; defaults to the service name.
    #[serde(default)]
    pub file_prefix: Option<String>,
    /// Stdout log format.
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            file_prefix: None,
            format: default_log_format(),
        }
    }
}

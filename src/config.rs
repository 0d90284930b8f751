//! Configuration for the fetch bridge
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! `REMINDKIT_*` environment variables.

use crate::error::{ReminderError, ReminderResult};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_FETCH_TIMEOUT: &str = "REMINDKIT_FETCH_TIMEOUT";
pub const ENV_ACCESS_TIMEOUT: &str = "REMINDKIT_ACCESS_TIMEOUT";
pub const ENV_TIMEOUT_POLICY: &str = "REMINDKIT_TIMEOUT_POLICY";

/// What a fetch does when the store does not answer in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutPolicy {
    /// Log and yield no results.
    #[default]
    Lenient,
    /// Fail with [`ReminderError::Timeout`].
    Strict,
}

impl std::str::FromStr for TimeoutPolicy {
    type Err = ReminderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(TimeoutPolicy::Lenient),
            "strict" => Ok(TimeoutPolicy::Strict),
            other => Err(ReminderError::config(format!(
                "Unknown timeout policy '{}', expected 'lenient' or 'strict'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemindKitConfig {
    pub fetch_timeout_secs: u64,
    pub access_timeout_secs: u64,
    pub timeout_policy: TimeoutPolicy,
}

impl Default for RemindKitConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 60,
            access_timeout_secs: 60,
            timeout_policy: TimeoutPolicy::Lenient,
        }
    }
}

impl RemindKitConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn access_timeout(&self) -> Duration {
        Duration::from_secs(self.access_timeout_secs)
    }

    /// `<config dir>/remindkit/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("remindkit").join("config.json"))
    }

    /// Defaults, then the default config file if it exists, then the
    /// environment.
    pub fn load() -> ReminderResult<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ReminderResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ReminderError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            ReminderError::config(format!("Invalid config in {}: {}", path.display(), e))
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Overrides fields from `REMINDKIT_*` variables that are set.
    pub fn apply_env(&mut self) -> ReminderResult<()> {
        if let Some(secs) = env_secs(ENV_FETCH_TIMEOUT)? {
            self.fetch_timeout_secs = secs;
        }
        if let Some(secs) = env_secs(ENV_ACCESS_TIMEOUT)? {
            self.access_timeout_secs = secs;
        }
        if let Ok(policy) = env::var(ENV_TIMEOUT_POLICY) {
            self.timeout_policy = policy.parse()?;
        }
        Ok(())
    }
}

fn env_secs(name: &str) -> ReminderResult<Option<u64>> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| {
                ReminderError::config(format!("{} must be whole seconds, got '{}'", name, value))
            }),
        Err(_) => Ok(None),
    }
}

/// Rejects settings the bridge cannot work with.
pub fn validate_config(config: &RemindKitConfig) -> ReminderResult<()> {
    if config.fetch_timeout_secs == 0 {
        return Err(ReminderError::config("fetch timeout must be at least one second"));
    }
    if config.access_timeout_secs == 0 {
        return Err(ReminderError::config("access timeout must be at least one second"));
    }
    if config.timeout_policy == TimeoutPolicy::Lenient {
        warn!("Fetch timeouts will return empty results (lenient policy)");
    }
    Ok(())
}

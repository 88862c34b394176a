//! Configuration handling.
//!
//! Configuration is stored as YAML, by default in the platform config
//! directory (`ticketdesk/config.yaml`), or at the path named by the
//! `TICKETDESK_CONFIG` environment variable. A missing file yields defaults
//! that reproduce the reference dashboard timings.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TicketDeskError};
use crate::query::DEFAULT_PAGE_SIZE;
use crate::workflow::backend::RetryPolicy;

pub const CONFIG_ENV_VAR: &str = "TICKETDESK_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Rows per page in the results table
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Simulated backend timings and retry policy
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            backend: BackendConfig::default(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Timings for the simulated status backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub batch_delay_ms: u64,
    pub single_delay_ms: u64,
    pub create_delay_ms: u64,
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub base_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            batch_delay_ms: 750,
            single_delay_ms: 500,
            create_delay_ms: 1500,
            timeout_ms: 5_000,
            max_attempts: 3,
            base_backoff_ms: 200,
            max_backoff_ms: 2_000,
        }
    }
}

impl BackendConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_millis(self.base_backoff_ms),
            max_delay: Duration::from_millis(self.max_backoff_ms),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        ProjectDirs::from("", "", "ticketdesk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .ok_or_else(|| {
                TicketDeskError::Config("could not determine a home directory".to_string())
            })
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(TicketDeskError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.backend.timeout_ms == 0 {
            return Err(TicketDeskError::Config(
                "backend.timeout_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        original: Option<std::ffi::OsString>,
    }

    impl EnvGuard {
        fn set(value: &std::path::Path) -> Self {
            let original = env::var_os(CONFIG_ENV_VAR);
            // SAFETY: tests touching the environment are marked #[serial]
            unsafe { env::set_var(CONFIG_ENV_VAR, value) };
            Self { original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: tests touching the environment are marked #[serial]
            unsafe {
                match &self.original {
                    Some(value) => env::set_var(CONFIG_ENV_VAR, value),
                    None => env::remove_var(CONFIG_ENV_VAR),
                }
            }
        }
    }

    #[test]
    fn test_defaults_match_reference_timings() {
        let config = Config::default();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.backend.batch_delay_ms, 750);
        assert_eq!(config.backend.single_delay_ms, 500);
        assert_eq!(config.backend.create_delay_ms, 1500);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml_ng::from_str("page_size: 10\n").unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.backend, BackendConfig::default());

        let config: Config =
            serde_yaml_ng::from_str("backend:\n  batch_delay_ms: 0\n").unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.backend.batch_delay_ms, 0);
        assert_eq!(config.backend.single_delay_ms, 500);
    }

    #[test]
    fn test_retry_policy_never_zero_attempts() {
        let backend = BackendConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(backend.retry_policy().max_attempts, 1);
    }

    #[test]
    #[serial]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let _guard = EnvGuard::set(&dir.path().join("absent.yaml"));
        assert_eq!(Config::load().unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let _guard = EnvGuard::set(&dir.path().join("nested").join("config.yaml"));

        let config = Config {
            page_size: 8,
            ..Default::default()
        };
        config.save().unwrap();

        assert_eq!(Config::load().unwrap(), config);
    }

    #[test]
    #[serial]
    fn test_load_rejects_zero_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "page_size: 0\n").unwrap();
        let _guard = EnvGuard::set(&path);

        let err = Config::load().unwrap_err();
        assert!(matches!(err, TicketDeskError::Config(_)));
    }
}

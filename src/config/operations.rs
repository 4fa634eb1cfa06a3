//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{LockError, Result};
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(LockError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| LockError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LockError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `instance_name` must be non-blank
    /// - `instance_id` must be non-blank
    pub fn validate(&self) -> Result<()> {
        if self.instance_name.trim().is_empty() {
            return Err(LockError::Config(
                "instance_name must be non-empty".to_string(),
            ));
        }

        if self.instance_id.trim().is_empty() {
            return Err(LockError::Config("instance_id must be non-empty".to_string()));
        }

        Ok(())
    }

    /// The slow-wait warning threshold, or `None` when disabled.
    pub fn contention_warning(&self) -> Option<Duration> {
        match self.contention_warn_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

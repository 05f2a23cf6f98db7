//! Engine configuration
//!
//! Supports:
//! - TOML configuration files (`./semview.toml`)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! - `SEMVIEW_MAX_STEPS` - Propagation work item budget
//! - `SEMVIEW_STRICT_INFERENCE_WRITES` - Reject direct writes to inference
//!   graphs (true/false)
//!
//! # Example Configuration
//!
//! ```toml
//! # semview.toml
//!
//! [limits]
//! max_steps = 1000000
//!
//! [access]
//! strict_inference_writes = true
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SemError, SemResult};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Resource limits
    pub limits: LimitsConfig,
    /// Graph access policy
    pub access: AccessConfig,
}

/// Resource limit options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of work items one propagation round may process
    /// before it is aborted
    pub max_steps: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            max_steps: 1_000_000,
        }
    }
}

/// Graph access policy options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Reject direct public writes to graphs owned by a view as their
    /// inference graph
    pub strict_inference_writes: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        AccessConfig {
            strict_inference_writes: true,
        }
    }
}

impl EngineConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `./semview.toml` if present, then apply
    /// environment variable overrides
    pub fn load() -> SemResult<Self> {
        let path = Path::new("./semview.toml");
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> SemResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SemError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::load_from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn load_from_str(content: &str) -> SemResult<Self> {
        toml::from_str(content).map_err(SemError::from)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("SEMVIEW_MAX_STEPS") {
            if let Ok(steps) = val.parse::<usize>() {
                self.limits.max_steps = steps;
            }
        }

        if let Ok(val) = env::var("SEMVIEW_STRICT_INFERENCE_WRITES") {
            match val.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => self.access.strict_inference_writes = true,
                "false" | "0" | "no" => self.access.strict_inference_writes = false,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.limits.max_steps, 1_000_000);
        assert!(config.access.strict_inference_writes);
    }

    #[test]
    fn test_load_from_str() {
        let toml = r#"
            [limits]
            max_steps = 500

            [access]
            strict_inference_writes = false
        "#;
        let config = EngineConfig::load_from_str(toml).unwrap();
        assert_eq!(config.limits.max_steps, 500);
        assert!(!config.access.strict_inference_writes);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let toml = r#"
            [limits]
            max_steps = 42
        "#;
        let config = EngineConfig::load_from_str(toml).unwrap();
        assert_eq!(config.limits.max_steps, 42);
        assert!(config.access.strict_inference_writes);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(EngineConfig::load_from_str("limits = ").is_err());
    }
}

//! Strategy configuration
//!
//! Tunables are resolved once per strategy instance. On disk they are stored
//! as human-readable JSON using the parameter names operators already know:
//!
//! ```json
//! { "PREFIX_COMPONENT": 1, "RTX_DETECTION": 1, "ADMISSION": "unlimited" }
//! ```

use crate::error::{ConfigError, Result, StorageError};
use crate::strategy::{AdmissionPolicy, AlwaysAdmit, SelectorAdmission};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for `PREFIX_COMPONENT`
pub const MAX_PREFIX_COMPONENT: usize = 32;

/// How sends chosen by the forward loop are admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionMode {
    /// Every send is admitted; outgoing limits are off
    #[default]
    Unlimited,
    /// The link selector's own verdict decides
    Selector,
}

impl AdmissionMode {
    /// Build the matching admission policy
    pub fn policy(&self) -> Box<dyn AdmissionPolicy> {
        match self {
            Self::Unlimited => Box::new(AlwaysAdmit),
            Self::Selector => Box::new(SelectorAdmission),
        }
    }
}

/// Tunables for one strategy instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Name components the link selector aggregates statistics on
    #[serde(rename = "PREFIX_COMPONENT", default = "default_prefix_component")]
    pub prefix_component: usize,

    /// Retransmission detection threshold; zero disables detection
    #[serde(rename = "RTX_DETECTION", default = "default_rtx_detection")]
    pub rtx_detection: u32,

    /// Admission policy for outgoing Interests
    #[serde(rename = "ADMISSION", default)]
    pub admission: AdmissionMode,
}

fn default_prefix_component() -> usize {
    1
}

fn default_rtx_detection() -> u32 {
    1
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            prefix_component: default_prefix_component(),
            rtx_detection: default_rtx_detection(),
            admission: AdmissionMode::default(),
        }
    }
}

impl StrategyConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `PREFIX_COMPONENT`
    pub fn with_prefix_component(mut self, prefix_component: usize) -> Self {
        self.prefix_component = prefix_component;
        self
    }

    /// Set `RTX_DETECTION`
    pub fn with_rtx_detection(mut self, rtx_detection: u32) -> Self {
        self.rtx_detection = rtx_detection;
        self
    }

    /// Set the admission mode
    pub fn with_admission(mut self, admission: AdmissionMode) -> Self {
        self.admission = admission;
        self
    }

    /// Whether retransmission detection is on
    pub fn rtx_detection_enabled(&self) -> bool {
        self.rtx_detection > 0
    }

    /// Look up a numeric tunable by its on-disk name
    pub fn parameter(&self, name: &str) -> Option<f64> {
        match name {
            "PREFIX_COMPONENT" => Some(self.prefix_component as f64),
            "RTX_DETECTION" => Some(self.rtx_detection as f64),
            _ => None,
        }
    }

    /// Set a numeric tunable by its on-disk name
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
            return Err(invalid(name, value).into());
        }

        let mut updated = self.clone();
        match name {
            "PREFIX_COMPONENT" => updated.prefix_component = value as usize,
            "RTX_DETECTION" => {
                if value > u32::MAX as f64 {
                    return Err(invalid(name, value).into());
                }
                updated.rtx_detection = value as u32;
            },
            _ => {
                return Err(ConfigError::InvalidParameter {
                    parameter: name.to_string(),
                    value: "unknown parameter".to_string(),
                }
                .into())
            },
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check that all values are in range
    pub fn validate(&self) -> Result<()> {
        if self.prefix_component > MAX_PREFIX_COMPONENT {
            return Err(ConfigError::InvalidParameter {
                parameter: "PREFIX_COMPONENT".to_string(),
                value: self.prefix_component.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn invalid(name: &str, value: f64) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: name.to_string(),
        value: value.to_string(),
    }
}

/// Save configuration to a JSON file, creating parent directories
pub fn save_config(path: &Path, config: &StrategyConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(StorageError::from)?;
    }

    let json =
        serde_json::to_string_pretty(config).map_err(|e| StorageError::SerializationFailed {
            reason: format!("Failed to serialize config: {}", e),
        })?;

    std::fs::write(path, json).map_err(StorageError::from)?;

    Ok(())
}

/// Load and validate configuration from a JSON file
///
/// Missing keys fall back to their defaults.
pub fn load_config(path: &Path) -> Result<StrategyConfig> {
    if !path.exists() {
        return Err(StorageError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let json = std::fs::read_to_string(path).map_err(StorageError::from)?;

    let config: StrategyConfig =
        serde_json::from_str(&json).map_err(|e| StorageError::SerializationFailed {
            reason: format!("Failed to deserialize config: {}", e),
        })?;

    config.validate()?;

    Ok(config)
}

/// Check if a configuration file exists
pub fn config_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

//! TOML configuration for the control unit.
//!
//! Every field has a serde default, so an empty document yields the
//! factory configuration: 200 ms scan period, 45 °C setpoint, alarm limits
//! at 10 °C and 80 °C. Validation failures are fatal at startup.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tank_common::config::{ConfigError, ConfigLoader, SharedConfig};
use tank_common::consts::{
    CYCLE_TIME_MS_MAX, CYCLE_TIME_MS_MIN, DEFAULT_CONFIG_PATH, DEFAULT_CYCLE_TIME_MS,
    DEFAULT_MAX_TEMPERATURE, DEFAULT_MIN_TEMPERATURE, DEFAULT_SETPOINT,
};
use tracing::debug;

use crate::safety::alarms::AlarmLimits;

// ─── Config Types ───────────────────────────────────────────────────

/// Top-level control unit configuration.
///
/// # TOML Example
///
/// ```toml
/// cycle_time_ms = 200
///
/// [shared]
/// log_level = "info"
/// service_name = "tank-plc"
///
/// [process]
/// setpoint = 45.0
/// max_temperature = 80.0
/// min_temperature = 10.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlUnitConfig {
    #[serde(default)]
    pub shared: SharedConfig,

    /// Scan cycle period [ms].
    #[serde(default = "default_cycle_time_ms")]
    pub cycle_time_ms: u64,

    #[serde(default)]
    pub process: ProcessConfig,
}

/// Process parameters: heating setpoint and temperature alarm limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Heating stops once the temperature reaches this value [°C].
    #[serde(default = "default_setpoint")]
    pub setpoint: f64,

    /// Temperature-high alarm above this value [°C].
    #[serde(default = "default_max_temperature")]
    pub max_temperature: f64,

    /// Temperature-low alarm below this value [°C].
    #[serde(default = "default_min_temperature")]
    pub min_temperature: f64,
}

fn default_cycle_time_ms() -> u64 {
    DEFAULT_CYCLE_TIME_MS
}
fn default_setpoint() -> f64 {
    DEFAULT_SETPOINT
}
fn default_max_temperature() -> f64 {
    DEFAULT_MAX_TEMPERATURE
}
fn default_min_temperature() -> f64 {
    DEFAULT_MIN_TEMPERATURE
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            setpoint: DEFAULT_SETPOINT,
            max_temperature: DEFAULT_MAX_TEMPERATURE,
            min_temperature: DEFAULT_MIN_TEMPERATURE,
        }
    }
}

impl Default for ControlUnitConfig {
    fn default() -> Self {
        Self {
            shared: SharedConfig::default(),
            cycle_time_ms: DEFAULT_CYCLE_TIME_MS,
            process: ProcessConfig::default(),
        }
    }
}

impl ProcessConfig {
    /// Temperature limits consumed by alarm evaluation.
    pub const fn alarm_limits(&self) -> AlarmLimits {
        AlarmLimits {
            max_temperature: self.max_temperature,
            min_temperature: self.min_temperature,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("setpoint", self.setpoint),
            ("max_temperature", self.max_temperature),
            ("min_temperature", self.min_temperature),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.min_temperature >= self.max_temperature {
            return Err(ConfigError::ValidationError(format!(
                "min_temperature {} must be below max_temperature {}",
                self.min_temperature, self.max_temperature
            )));
        }
        // Setpoint strictly inside the alarm band.
        if self.setpoint <= self.min_temperature || self.setpoint >= self.max_temperature {
            return Err(ConfigError::ValidationError(format!(
                "setpoint {} out of range ({}, {})",
                self.setpoint, self.min_temperature, self.max_temperature
            )));
        }
        Ok(())
    }
}

impl ControlUnitConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        if !(CYCLE_TIME_MS_MIN..=CYCLE_TIME_MS_MAX).contains(&self.cycle_time_ms) {
            return Err(ConfigError::ValidationError(format!(
                "cycle_time_ms {} out of range [{}, {}]",
                self.cycle_time_ms, CYCLE_TIME_MS_MIN, CYCLE_TIME_MS_MAX
            )));
        }
        self.process.validate()
    }

    #[inline]
    pub const fn cycle_time(&self) -> Duration {
        Duration::from_millis(self.cycle_time_ms)
    }
}

// ─── Loading Functions ──────────────────────────────────────────────

/// Load and validate the control unit configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ControlUnitConfig, ConfigError> {
    let config = ControlUnitConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Resolve the startup configuration.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
/// loaded if present, else the built-in defaults apply.
pub fn load_config_or_default(path: Option<&Path>) -> Result<ControlUnitConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.is_file() {
        return load_config(default_path);
    }
    debug!(path = DEFAULT_CONFIG_PATH, "no configuration file, using defaults");
    Ok(ControlUnitConfig::default())
}

/// Load and validate configuration from a TOML string (for testing).
pub fn load_config_from_str(toml: &str) -> Result<ControlUnitConfig, ConfigError> {
    let config = ControlUnitConfig::from_toml_str(toml)?;
    config.validate()?;
    Ok(config)
}

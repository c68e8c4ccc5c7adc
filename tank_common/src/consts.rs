//! System-wide constants for the tank PLC workspace.
//!
//! Single source of truth for identifier counts, process defaults and
//! default paths. Imported by all crates.

/// Number of digital inputs (`DI0`..`DI9`).
pub const DIGITAL_INPUT_COUNT: usize = 10;

/// Number of analog inputs (`AI0`).
pub const ANALOG_INPUT_COUNT: usize = 1;

/// Number of digital outputs (`DQ0`..`DQ3`).
pub const DIGITAL_OUTPUT_COUNT: usize = 4;

/// Number of supervised alarms (`A0`..`A5`).
pub const ALARM_COUNT: usize = 6;

/// Default scan cycle period in milliseconds.
pub const DEFAULT_CYCLE_TIME_MS: u64 = 200;

/// Shortest accepted scan cycle period in milliseconds.
pub const CYCLE_TIME_MS_MIN: u64 = 1;

/// Longest accepted scan cycle period in milliseconds.
pub const CYCLE_TIME_MS_MAX: u64 = 60_000;

/// Default heating setpoint [°C].
pub const DEFAULT_SETPOINT: f64 = 45.0;

/// Default upper temperature alarm limit [°C].
pub const DEFAULT_MAX_TEMPERATURE: f64 = 80.0;

/// Default lower temperature alarm limit [°C].
pub const DEFAULT_MIN_TEMPERATURE: f64 = 10.0;

/// Fluid temperature assumed by the stop-state input image [°C].
pub const STOP_STATE_TEMPERATURE: f64 = 20.0;

/// Name of the process object every tag lives under.
pub const PROCESS_OBJECT: &str = "myPLC";

/// Default control unit configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/control_unit.toml";

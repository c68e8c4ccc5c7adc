//! Prelude module for common re-exports.
//!
//! ```rust
//! use tank_common::prelude::*;
//! ```

use std::time::Duration;

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{ALARM_COUNT, DEFAULT_CYCLE_TIME_MS};

// ─── I/O ────────────────────────────────────────────────────────────
pub use crate::io::{AnalogInput, DigitalInput, DigitalOutput, InputSnapshot, OutputSnapshot};

// ─── Alarms / State ─────────────────────────────────────────────────
pub use crate::alarm::{
    ALARM_PRIORITY, AlarmAttribute, AlarmId, AlarmMask, AlarmState, AlarmTable,
};
pub use crate::state::Step;

// ─── Tags / Transport ───────────────────────────────────────────────
pub use crate::tags::{TagAddress, TagKind, TagValue};
pub use crate::transport::TransportError;

/// Default scan cycle period as Duration.
pub const DEFAULT_CYCLE_TIME: Duration = Duration::from_millis(DEFAULT_CYCLE_TIME_MS);

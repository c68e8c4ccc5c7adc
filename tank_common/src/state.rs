//! Process step enumeration for the tank sequence.
//!
//! Normal-operation steps follow the fill → heat → discharge chart. Each
//! alarm has a dedicated error step; the error step held in the current
//! step is what the error branch reacts to.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::alarm::AlarmId;

/// Current step of the process chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Step {
    /// Idle, waiting for start. Initial step.
    #[default]
    Stop,
    /// Filling up to the low level mark.
    Prefilling,
    /// Primed, waiting for run.
    Initialised,
    /// Filling up to the high level mark.
    Filling,
    /// Heating up to the setpoint.
    Heating,
    /// Draining through the discharging valve.
    DischargingValve,
    /// Error reaction for the given alarm.
    Error(AlarmId),
}

impl Step {
    /// Normal-operation steps, in chart order.
    pub const NORMAL: [Self; 6] = [
        Self::Stop,
        Self::Prefilling,
        Self::Initialised,
        Self::Filling,
        Self::Heating,
        Self::DischargingValve,
    ];

    #[inline]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Alarm this step reacts to, if it is an error step.
    #[inline]
    pub const fn alarm(&self) -> Option<AlarmId> {
        match self {
            Self::Error(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => f.write_str("Stop"),
            Self::Prefilling => f.write_str("Prefilling"),
            Self::Initialised => f.write_str("Initialised"),
            Self::Filling => f.write_str("Filling"),
            Self::Heating => f.write_str("Heating"),
            Self::DischargingValve => f.write_str("DischargingValve"),
            Self::Error(id) => write!(f, "Error({id})"),
        }
    }
}

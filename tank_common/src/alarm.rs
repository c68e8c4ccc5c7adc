//! Alarm identifiers, priority order and per-alarm state.
//!
//! Each alarm carries three attributes:
//! - `Active`: the alarm condition holds this cycle.
//! - `UnAck`: raised when the alarm activates, cleared only by a reset
//!   while the condition no longer holds.
//! - `Status`: always `Active || UnAck`; never written on its own.
//!
//! [`AlarmState`] keeps its fields private so the `Status` derivation
//! cannot be bypassed.

use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

use crate::config::ConfigError;
use crate::consts::ALARM_COUNT;

// ─── AlarmId ────────────────────────────────────────────────────────

/// Supervised alarm conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AlarmId {
    /// Tank level too high (high-high sensor).
    TankTooHigh = 0,
    /// Tank level too low (falling edge of the low-low sensor).
    TankTooLow = 1,
    /// Fluid temperature above the configured maximum.
    TempTooHigh = 2,
    /// Fluid temperature below the configured minimum.
    TempTooLow = 3,
    /// Discharge gate not closed.
    DoorOpen = 4,
    /// Emergency-stop button pressed.
    EmergencyStop = 5,
}

impl AlarmId {
    /// Every alarm, in address order.
    pub const ALL: [Self; ALARM_COUNT] = [
        Self::TankTooHigh,
        Self::TankTooLow,
        Self::TempTooHigh,
        Self::TempTooLow,
        Self::DoorOpen,
        Self::EmergencyStop,
    ];

    /// Symbolic alarm object address.
    pub const fn address(self) -> &'static str {
        match self {
            Self::TankTooHigh => "A0",
            Self::TankTooLow => "A1",
            Self::TempTooHigh => "A2",
            Self::TempTooLow => "A3",
            Self::DoorOpen => "A4",
            Self::EmergencyStop => "A5",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask for this alarm.
    #[inline]
    pub const fn mask(self) -> AlarmMask {
        AlarmMask::from_bits_truncate(1 << self as u8)
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.address())
    }
}

impl FromStr for AlarmId {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.address() == s)
            .ok_or_else(|| ConfigError::UnknownTag(s.to_string()))
    }
}

// ─── Priority Order ─────────────────────────────────────────────────

/// Fixed alarm priority, most urgent first.
///
/// Arbitration scans this list and takes the first alarm whose `Status`
/// is set. The order is a domain constant, not something computed.
pub const ALARM_PRIORITY: [AlarmId; ALARM_COUNT] = [
    AlarmId::EmergencyStop,
    AlarmId::TankTooHigh,
    AlarmId::TempTooHigh,
    AlarmId::TankTooLow,
    AlarmId::TempTooLow,
    AlarmId::DoorOpen,
];

/// Every alarm appears in the priority order exactly once.
const fn priority_is_total() -> bool {
    let mut seen = 0u8;
    let mut i = 0;
    while i < ALARM_PRIORITY.len() {
        let bit = 1u8 << ALARM_PRIORITY[i] as u8;
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
        i += 1;
    }
    seen == AlarmMask::all().bits()
}

const_assert!(priority_is_total());

// ─── AlarmAttribute ─────────────────────────────────────────────────

/// Addressable attribute of an alarm object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlarmAttribute {
    Active,
    UnAck,
    Status,
}

impl AlarmAttribute {
    pub const ALL: [Self; 3] = [Self::Active, Self::UnAck, Self::Status];

    /// Attribute name as published under the alarm object.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::UnAck => "UnAck",
            Self::Status => "Status",
        }
    }
}

impl fmt::Display for AlarmAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlarmAttribute {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| ConfigError::UnknownTag(s.to_string()))
    }
}

// ─── AlarmMask ──────────────────────────────────────────────────────

bitflags! {
    /// Compact summary of a set of alarms, one bit per [`AlarmId`].
    ///
    /// Diagnostic view only. Arbitration walks [`ALARM_PRIORITY`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AlarmMask: u8 {
        const TANK_TOO_HIGH  = 1 << 0;
        const TANK_TOO_LOW   = 1 << 1;
        const TEMP_TOO_HIGH  = 1 << 2;
        const TEMP_TOO_LOW   = 1 << 3;
        const DOOR_OPEN      = 1 << 4;
        const EMERGENCY_STOP = 1 << 5;
    }
}

// ─── AlarmState ─────────────────────────────────────────────────────

/// `{Active, UnAck, Status}` triple for one alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlarmState {
    active: bool,
    unack: bool,
    status: bool,
}

impl AlarmState {
    /// Build a state from its two independent attributes.
    pub const fn new(active: bool, unack: bool) -> Self {
        Self {
            active,
            unack,
            status: active || unack,
        }
    }

    #[inline]
    pub const fn active(&self) -> bool {
        self.active
    }

    #[inline]
    pub const fn unack(&self) -> bool {
        self.unack
    }

    #[inline]
    pub const fn status(&self) -> bool {
        self.status
    }

    /// Read one attribute by name.
    pub const fn attribute(&self, attr: AlarmAttribute) -> bool {
        match attr {
            AlarmAttribute::Active => self.active,
            AlarmAttribute::UnAck => self.unack,
            AlarmAttribute::Status => self.status,
        }
    }

    /// Store the freshly evaluated condition. `UnAck` and `Status` are
    /// brought up to date by [`latch`](Self::latch).
    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Operator reset: drop the unacknowledged flag.
    pub fn acknowledge(&mut self) {
        self.unack = false;
        self.refresh();
    }

    /// Latch an active condition as unacknowledged and rederive `Status`.
    pub fn latch(&mut self) {
        if self.active {
            self.unack = true;
        }
        self.refresh();
    }

    #[inline]
    fn refresh(&mut self) {
        self.status = self.active || self.unack;
    }
}

// ─── AlarmTable ─────────────────────────────────────────────────────

/// The complete alarm set, one [`AlarmState`] per [`AlarmId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlarmTable {
    states: [AlarmState; ALARM_COUNT],
}

impl AlarmTable {
    #[inline]
    pub const fn get(&self, id: AlarmId) -> &AlarmState {
        &self.states[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: AlarmId) -> &mut AlarmState {
        &mut self.states[id.index()]
    }

    /// Iterate `(id, state)` pairs in address order.
    pub fn iter(&self) -> impl Iterator<Item = (AlarmId, &AlarmState)> + '_ {
        AlarmId::ALL.into_iter().zip(self.states.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AlarmId, &mut AlarmState)> + '_ {
        AlarmId::ALL.into_iter().zip(self.states.iter_mut())
    }

    /// Alarms whose `Status` is set.
    pub fn status_mask(&self) -> AlarmMask {
        self.iter()
            .filter(|(_, state)| state.status())
            .fold(AlarmMask::empty(), |mask, (id, _)| mask | id.mask())
    }

    /// Alarms whose condition currently holds.
    pub fn active_mask(&self) -> AlarmMask {
        self.iter()
            .filter(|(_, state)| state.active())
            .fold(AlarmMask::empty(), |mask, (id, _)| mask | id.mask())
    }

    /// Alarms with `Status` set, most urgent first.
    pub fn raised(&self) -> heapless::Vec<AlarmId, ALARM_COUNT> {
        let mut raised = heapless::Vec::new();
        for id in ALARM_PRIORITY {
            if self.get(id).status() {
                // Capacity equals ALARM_COUNT, push cannot fail.
                let _ = raised.push(id);
            }
        }
        raised
    }
}

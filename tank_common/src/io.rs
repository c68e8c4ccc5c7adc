//! Closed I/O identifier sets and per-cycle snapshots.
//!
//! Each identifier maps to a fixed symbolic PLC address (`DI0`, `AI0`,
//! `DQ0`, ...). Snapshots are plain value types indexed by identifier:
//! the input snapshot is acquired once per cycle and is read-only for the
//! rest of that cycle, the output snapshot is computed once per cycle and
//! committed once.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::{DIGITAL_INPUT_COUNT, DIGITAL_OUTPUT_COUNT, STOP_STATE_TEMPERATURE};

// ─── DigitalInput ───────────────────────────────────────────────────

/// Digital inputs wired to the PLC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DigitalInput {
    /// Start button.
    StartButton = 0,
    /// Run button.
    RunButton = 1,
    /// Stop button.
    StopButton = 2,
    /// Emergency-stop button.
    EmergencyButton = 3,
    /// Alarm reset (acknowledge) button.
    ResetButton = 4,
    /// Low-low level sensor.
    LowLowLevel = 5,
    /// Low level sensor.
    LowLevel = 6,
    /// High level sensor.
    HighLevel = 7,
    /// High-high level sensor.
    HighHighLevel = 8,
    /// Discharge gate closed feedback.
    DischargeGateClosed = 9,
}

impl DigitalInput {
    /// Every digital input, in address order.
    pub const ALL: [Self; DIGITAL_INPUT_COUNT] = [
        Self::StartButton,
        Self::RunButton,
        Self::StopButton,
        Self::EmergencyButton,
        Self::ResetButton,
        Self::LowLowLevel,
        Self::LowLevel,
        Self::HighLevel,
        Self::HighHighLevel,
        Self::DischargeGateClosed,
    ];

    /// Symbolic PLC address.
    pub const fn address(self) -> &'static str {
        match self {
            Self::StartButton => "DI0",
            Self::RunButton => "DI1",
            Self::StopButton => "DI2",
            Self::EmergencyButton => "DI3",
            Self::ResetButton => "DI4",
            Self::LowLowLevel => "DI5",
            Self::LowLevel => "DI6",
            Self::HighLevel => "DI7",
            Self::HighHighLevel => "DI8",
            Self::DischargeGateClosed => "DI9",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DigitalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.address())
    }
}

impl FromStr for DigitalInput {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|di| di.address() == s)
            .ok_or_else(|| ConfigError::UnknownTag(s.to_string()))
    }
}

// ─── AnalogInput ────────────────────────────────────────────────────

/// Analog inputs wired to the PLC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AnalogInput {
    /// Fluid temperature sensor [°C].
    Temperature = 0,
}

impl AnalogInput {
    pub const ALL: [Self; 1] = [Self::Temperature];

    /// Symbolic PLC address.
    pub const fn address(self) -> &'static str {
        match self {
            Self::Temperature => "AI0",
        }
    }
}

impl fmt::Display for AnalogInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.address())
    }
}

impl FromStr for AnalogInput {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ai| ai.address() == s)
            .ok_or_else(|| ConfigError::UnknownTag(s.to_string()))
    }
}

// ─── DigitalOutput ──────────────────────────────────────────────────

/// Digital outputs driven by the PLC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DigitalOutput {
    /// Filling valve open command.
    FillingValveOpen = 0,
    /// Discharging valve open command.
    DischargingValveOpen = 1,
    /// Heating element on command.
    HeatingOn = 2,
    /// Discharge gate open command.
    DischargingGateOpen = 3,
}

impl DigitalOutput {
    /// Every digital output, in address order.
    pub const ALL: [Self; DIGITAL_OUTPUT_COUNT] = [
        Self::FillingValveOpen,
        Self::DischargingValveOpen,
        Self::HeatingOn,
        Self::DischargingGateOpen,
    ];

    /// Symbolic PLC address.
    pub const fn address(self) -> &'static str {
        match self {
            Self::FillingValveOpen => "DQ0",
            Self::DischargingValveOpen => "DQ1",
            Self::HeatingOn => "DQ2",
            Self::DischargingGateOpen => "DQ3",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DigitalOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.address())
    }
}

impl FromStr for DigitalOutput {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dq| dq.address() == s)
            .ok_or_else(|| ConfigError::UnknownTag(s.to_string()))
    }
}

// ─── Snapshots ──────────────────────────────────────────────────────

/// Input image for one scan cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    digital: [bool; DIGITAL_INPUT_COUNT],
    temperature: f64,
}

impl InputSnapshot {
    /// Input image of an idle, empty tank: gate closed, fluid at
    /// [`STOP_STATE_TEMPERATURE`], every button released.
    pub fn stop_state() -> Self {
        Self::default()
            .with_digital(DigitalInput::DischargeGateClosed, true)
            .with_analog(AnalogInput::Temperature, STOP_STATE_TEMPERATURE)
    }

    #[inline]
    pub const fn digital(&self, input: DigitalInput) -> bool {
        self.digital[input.index()]
    }

    #[inline]
    pub const fn analog(&self, input: AnalogInput) -> f64 {
        match input {
            AnalogInput::Temperature => self.temperature,
        }
    }

    pub fn set_digital(&mut self, input: DigitalInput, value: bool) {
        self.digital[input.index()] = value;
    }

    pub fn set_analog(&mut self, input: AnalogInput, value: f64) {
        match input {
            AnalogInput::Temperature => self.temperature = value,
        }
    }

    /// Builder-style [`set_digital`](Self::set_digital).
    pub fn with_digital(mut self, input: DigitalInput, value: bool) -> Self {
        self.set_digital(input, value);
        self
    }

    /// Builder-style [`set_analog`](Self::set_analog).
    pub fn with_analog(mut self, input: AnalogInput, value: f64) -> Self {
        self.set_analog(input, value);
        self
    }
}

/// Output image computed by one scan cycle. All outputs default to off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputSnapshot {
    digital: [bool; DIGITAL_OUTPUT_COUNT],
}

impl OutputSnapshot {
    #[inline]
    pub const fn get(&self, output: DigitalOutput) -> bool {
        self.digital[output.index()]
    }

    #[inline]
    pub fn set(&mut self, output: DigitalOutput, value: bool) {
        self.digital[output.index()] = value;
    }

    /// Iterate `(output, value)` pairs in address order.
    pub fn iter(&self) -> impl Iterator<Item = (DigitalOutput, bool)> + '_ {
        DigitalOutput::ALL.into_iter().map(|dq| (dq, self.get(dq)))
    }
}

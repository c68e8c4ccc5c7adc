//! Common actuator operations shared by the process chart and the error
//! reactions.
//!
//! Each operation touches only the outputs it names. The discharge gate is
//! never closed here: it is opened by error reactions and otherwise left
//! as it is.

use tank_common::io::{DigitalOutput, OutputSnapshot};

/// Filling valve, heating and discharging valve off. Gate untouched.
pub fn stop_system(outputs: &mut OutputSnapshot) {
    outputs.set(DigitalOutput::FillingValveOpen, false);
    outputs.set(DigitalOutput::HeatingOn, false);
    outputs.set(DigitalOutput::DischargingValveOpen, false);
}

/// Heating off, discharge gate open.
pub fn stop_heating_open_gate(outputs: &mut OutputSnapshot) {
    outputs.set(DigitalOutput::HeatingOn, false);
    outputs.set(DigitalOutput::DischargingGateOpen, true);
}

/// Filling valve off, discharge gate open.
pub fn stop_flow_open_gate(outputs: &mut OutputSnapshot) {
    outputs.set(DigitalOutput::FillingValveOpen, false);
    outputs.set(DigitalOutput::DischargingGateOpen, true);
}

#[inline]
pub fn open_gate(outputs: &mut OutputSnapshot) {
    outputs.set(DigitalOutput::DischargingGateOpen, true);
}

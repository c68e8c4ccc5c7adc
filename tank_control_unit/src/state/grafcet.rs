//! Normal-operation process chart: Stop → Prefilling → Initialised →
//! Filling → Heating → DischargingValve → Filling ...
//!
//! One transition is evaluated per cycle. The stop button pre-empts every
//! transition. An error step reaching this branch means the trip has just
//! cleared; the chart re-enters at `Stop`.
//!
//! | Step             | Guard                    | Next             | Outputs               |
//! |------------------|--------------------------|------------------|-----------------------|
//! | Stop             | start ∧ gate closed      | Prefilling       | none                  |
//! | Prefilling       | low level                | Initialised      | filling valve closed  |
//! | Prefilling       | else                     | Prefilling       | filling valve open    |
//! | Initialised      | run                      | Filling          | none                  |
//! | Filling          | high level               | Heating          | filling valve closed  |
//! | Filling          | else                     | Filling          | filling valve open    |
//! | Heating          | temperature ≥ setpoint   | DischargingValve | heating off           |
//! | Heating          | else                     | Heating          | heating on            |
//! | DischargingValve | ¬low level               | Filling          | discharging closed    |
//! | DischargingValve | else                     | DischargingValve | discharging open      |

use tank_common::io::{AnalogInput, DigitalInput, DigitalOutput, InputSnapshot, OutputSnapshot};
use tank_common::state::Step;

use super::actuators::stop_system;

// ─── Transition Guards ──────────────────────────────────────────────

#[inline]
fn start_requested(inputs: &InputSnapshot) -> bool {
    inputs.digital(DigitalInput::StartButton) && inputs.digital(DigitalInput::DischargeGateClosed)
}

#[inline]
fn stop_requested(inputs: &InputSnapshot) -> bool {
    inputs.digital(DigitalInput::StopButton)
}

#[inline]
fn run_requested(inputs: &InputSnapshot) -> bool {
    inputs.digital(DigitalInput::RunButton)
}

#[inline]
fn at_low_level(inputs: &InputSnapshot) -> bool {
    inputs.digital(DigitalInput::LowLevel)
}

#[inline]
fn at_high_level(inputs: &InputSnapshot) -> bool {
    inputs.digital(DigitalInput::HighLevel)
}

#[inline]
fn setpoint_reached(inputs: &InputSnapshot, setpoint: f64) -> bool {
    inputs.analog(AnalogInput::Temperature) >= setpoint
}

// ─── Chart ──────────────────────────────────────────────────────────

/// Evaluate one cycle of the chart. Returns the next step.
pub fn step_normal(
    step: Step,
    inputs: &InputSnapshot,
    outputs: &mut OutputSnapshot,
    setpoint: f64,
) -> Step {
    if stop_requested(inputs) {
        stop_system(outputs);
        return Step::Stop;
    }

    match step {
        Step::Stop => {
            if start_requested(inputs) {
                Step::Prefilling
            } else {
                Step::Stop
            }
        }
        Step::Prefilling => {
            if at_low_level(inputs) {
                outputs.set(DigitalOutput::FillingValveOpen, false);
                Step::Initialised
            } else {
                outputs.set(DigitalOutput::FillingValveOpen, true);
                Step::Prefilling
            }
        }
        Step::Initialised => {
            if run_requested(inputs) {
                Step::Filling
            } else {
                Step::Initialised
            }
        }
        Step::Filling => {
            if at_high_level(inputs) {
                outputs.set(DigitalOutput::FillingValveOpen, false);
                Step::Heating
            } else {
                outputs.set(DigitalOutput::FillingValveOpen, true);
                Step::Filling
            }
        }
        Step::Heating => {
            if setpoint_reached(inputs, setpoint) {
                outputs.set(DigitalOutput::HeatingOn, false);
                Step::DischargingValve
            } else {
                outputs.set(DigitalOutput::HeatingOn, true);
                Step::Heating
            }
        }
        Step::DischargingValve => {
            if !at_low_level(inputs) {
                outputs.set(DigitalOutput::DischargingValveOpen, false);
                Step::Filling
            } else {
                outputs.set(DigitalOutput::DischargingValveOpen, true);
                Step::DischargingValve
            }
        }
        Step::Error(_) => {
            stop_system(outputs);
            Step::Stop
        }
    }
}

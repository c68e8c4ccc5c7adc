//! Error-branch reactions, one per alarm.
//!
//! | Alarm         | Reaction                              |
//! |---------------|---------------------------------------|
//! | TankTooHigh   | stop all actuators, gate open         |
//! | TankTooLow    | stop all actuators, gate untouched    |
//! | TempTooHigh   | heating off, gate open                |
//! | TempTooLow    | filling valve off, gate open          |
//! | DoorOpen      | stop all actuators                    |
//! | EmergencyStop | stop all actuators, gate open         |

use tank_common::alarm::AlarmId;
use tank_common::io::OutputSnapshot;

use super::actuators::{open_gate, stop_flow_open_gate, stop_heating_open_gate, stop_system};

/// Drive the outputs for the error step of `alarm`.
pub fn react(alarm: AlarmId, outputs: &mut OutputSnapshot) {
    match alarm {
        AlarmId::TankTooHigh | AlarmId::EmergencyStop => {
            stop_system(outputs);
            open_gate(outputs);
        }
        // Gate keeps its last commanded position.
        AlarmId::TankTooLow => stop_system(outputs),
        AlarmId::TempTooHigh => stop_heating_open_gate(outputs),
        AlarmId::TempTooLow => stop_flow_open_gate(outputs),
        AlarmId::DoorOpen => stop_system(outputs),
    }
}

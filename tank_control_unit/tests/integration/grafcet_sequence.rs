//! Integration test: normal-operation sequence.
//!
//! Walks the tank through a full batch over the tag server:
//! Stop → Prefilling → Initialised → Filling → Heating → DischargingValve
//! → Filling. Outputs of a new step are driven from the cycle after the
//! transition.

use tank_common::io::{DigitalInput, DigitalOutput};
use tank_common::state::Step;

use super::Plant;

fn all_outputs_off(plant: &Plant) -> bool {
    DigitalOutput::ALL.into_iter().all(|dq| !plant.output(dq))
}

#[test]
fn power_on_idles_in_stop() {
    let mut plant = Plant::new();
    plant.scan_n(5);
    assert_eq!(plant.step(), Step::Stop);
    assert!(!plant.trip());
    assert!(all_outputs_off(&plant));
}

#[test]
fn full_batch() {
    let mut plant = Plant::new();

    // Start pulse with the gate closed.
    plant.set(DigitalInput::StartButton, true);
    plant.scan();
    assert_eq!(plant.step(), Step::Prefilling);
    plant.set(DigitalInput::StartButton, false);
    plant.scan();
    assert_eq!(plant.step(), Step::Prefilling);
    assert!(plant.output(DigitalOutput::FillingValveOpen));

    // Low level reached.
    plant.set(DigitalInput::LowLevel, true);
    plant.scan();
    assert_eq!(plant.step(), Step::Initialised);
    assert!(!plant.output(DigitalOutput::FillingValveOpen));

    // Waits for run.
    plant.scan_n(3);
    assert_eq!(plant.step(), Step::Initialised);
    plant.set(DigitalInput::RunButton, true);
    plant.scan();
    plant.set(DigitalInput::RunButton, false);
    assert_eq!(plant.step(), Step::Filling);
    plant.scan();
    assert!(plant.output(DigitalOutput::FillingValveOpen));

    // High level reached.
    plant.set(DigitalInput::HighLevel, true);
    plant.scan();
    assert_eq!(plant.step(), Step::Heating);
    assert!(!plant.output(DigitalOutput::FillingValveOpen));
    plant.scan();
    assert!(plant.output(DigitalOutput::HeatingOn));

    // Setpoint reached.
    plant.set_temperature(44.0);
    plant.scan();
    assert_eq!(plant.step(), Step::Heating);
    plant.set_temperature(45.0);
    plant.scan();
    assert_eq!(plant.step(), Step::DischargingValve);
    assert!(!plant.output(DigitalOutput::HeatingOn));
    plant.scan();
    assert!(plant.output(DigitalOutput::DischargingValveOpen));

    // Drained below low level: back to filling.
    plant.set(DigitalInput::HighLevel, false);
    plant.scan();
    assert_eq!(plant.step(), Step::DischargingValve);
    plant.set(DigitalInput::LowLevel, false);
    plant.scan();
    assert_eq!(plant.step(), Step::Filling);
    assert!(!plant.output(DigitalOutput::DischargingValveOpen));
    plant.scan();
    assert!(plant.output(DigitalOutput::FillingValveOpen));

    assert!(!plant.trip());
    assert!(plant.runner.state().alarms.status_mask().is_empty());
}

#[test]
fn stop_button_halts_heating() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::StartButton, true);
    plant.scan();
    plant.set(DigitalInput::StartButton, false);
    plant.set(DigitalInput::LowLevel, true);
    plant.scan();
    plant.set(DigitalInput::RunButton, true);
    plant.scan();
    plant.set(DigitalInput::RunButton, false);
    plant.set(DigitalInput::HighLevel, true);
    plant.scan_n(2);
    assert_eq!(plant.step(), Step::Heating);
    assert!(plant.output(DigitalOutput::HeatingOn));

    plant.set(DigitalInput::StopButton, true);
    plant.scan();
    plant.set(DigitalInput::StopButton, false);
    assert_eq!(plant.step(), Step::Stop);
    assert!(all_outputs_off(&plant));

    // Stays stopped without a new start.
    plant.scan_n(3);
    assert_eq!(plant.step(), Step::Stop);
}

#[test]
fn stop_and_start_together_stops() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::StartButton, true);
    plant.set(DigitalInput::StopButton, true);
    plant.scan_n(2);
    assert_eq!(plant.step(), Step::Stop);
}

#[test]
fn custom_setpoint_from_config() {
    let config = tank_control_unit::config::load_config_from_str(
        "cycle_time_ms = 1\n[process]\nsetpoint = 30.0",
    )
    .unwrap();
    let mut plant = Plant::with_config(&config);
    plant.set(DigitalInput::StartButton, true);
    plant.set(DigitalInput::LowLevel, true);
    plant.scan_n(2);
    plant.set(DigitalInput::StartButton, false);
    plant.set(DigitalInput::RunButton, true);
    plant.set(DigitalInput::HighLevel, true);
    plant.scan_n(2);
    assert_eq!(plant.step(), Step::Heating);

    plant.set_temperature(30.0);
    plant.scan();
    assert_eq!(plant.step(), Step::DischargingValve);
}

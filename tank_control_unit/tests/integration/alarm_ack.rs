//! Integration test: alarm acknowledgement and recovery.
//!
//! Validates the reset semantics seen through the tag server:
//! 1. Reset while the condition holds changes nothing.
//! 2. Reset after the condition clears drops `UnAck` and `Status`.
//! 3. Recovery re-enters the process chart at `Stop`.

use tank_common::alarm::{AlarmAttribute, AlarmId, AlarmState};
use tank_common::io::{DigitalInput, DigitalOutput};
use tank_common::state::Step;
use tank_common::tags::TagAddress;

use super::Plant;

#[test]
fn reset_while_condition_holds_is_ignored() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::EmergencyButton, true);
    plant.scan();
    assert_eq!(plant.alarm(AlarmId::EmergencyStop), AlarmState::new(true, true));

    plant.reset();
    assert_eq!(plant.alarm(AlarmId::EmergencyStop), AlarmState::new(true, true));
    assert_eq!(plant.step(), Step::Error(AlarmId::EmergencyStop));
}

#[test]
fn reset_after_condition_clears() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::HighHighLevel, true);
    plant.scan();
    plant.set(DigitalInput::HighHighLevel, false);
    plant.scan_n(3);
    assert_eq!(plant.alarm(AlarmId::TankTooHigh), AlarmState::new(false, true));
    assert!(plant.trip());

    plant.reset();
    assert_eq!(plant.alarm(AlarmId::TankTooHigh), AlarmState::default());
    let status = TagAddress::Alarm(AlarmId::TankTooHigh, AlarmAttribute::Status);
    assert!(!plant.client.bool_value(status).unwrap());
    assert!(!plant.trip());
}

#[test]
fn tank_low_active_only_on_falling_edge() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::LowLowLevel, true);
    plant.scan_n(2);
    assert!(!plant.alarm(AlarmId::TankTooLow).status());

    plant.set(DigitalInput::LowLowLevel, false);
    plant.scan();
    assert_eq!(plant.alarm(AlarmId::TankTooLow), AlarmState::new(true, true));

    plant.scan();
    assert_eq!(plant.alarm(AlarmId::TankTooLow), AlarmState::new(false, true));
    assert_eq!(plant.step(), Step::Error(AlarmId::TankTooLow));

    // Sensor still uncovered: no new edge, a reset clears for good.
    plant.reset();
    assert!(!plant.alarm(AlarmId::TankTooLow).status());
    plant.scan_n(3);
    assert!(!plant.alarm(AlarmId::TankTooLow).status());
}

#[test]
fn unchanged_inputs_are_idempotent() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::DischargeGateClosed, false);
    plant.set_temperature(85.0);
    plant.scan();

    let state = *plant.runner.state();
    let outputs = plant.client.outputs().unwrap();
    for _ in 0..10 {
        plant.scan();
        assert_eq!(*plant.runner.state(), state);
        assert_eq!(plant.client.outputs().unwrap(), outputs);
    }
}

#[test]
fn recovery_allows_restart() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::DischargeGateClosed, false);
    plant.scan();
    assert_eq!(plant.step(), Step::Error(AlarmId::DoorOpen));

    // Start is ignored while tripped.
    plant.set(DigitalInput::StartButton, true);
    plant.scan();
    assert_eq!(plant.step(), Step::Error(AlarmId::DoorOpen));
    plant.set(DigitalInput::StartButton, false);

    plant.set(DigitalInput::DischargeGateClosed, true);
    plant.reset();
    assert_eq!(plant.step(), Step::Stop);
    assert!(!plant.output(DigitalOutput::FillingValveOpen));

    plant.set(DigitalInput::StartButton, true);
    plant.scan_n(2);
    assert_eq!(plant.step(), Step::Prefilling);
    assert!(plant.output(DigitalOutput::FillingValveOpen));
}

#[test]
fn gate_stays_open_after_recovery() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::HighHighLevel, true);
    plant.scan();
    assert!(plant.output(DigitalOutput::DischargingGateOpen));

    plant.set(DigitalInput::HighHighLevel, false);
    plant.reset();
    assert_eq!(plant.step(), Step::Stop);
    assert!(plant.output(DigitalOutput::DischargingGateOpen));
}

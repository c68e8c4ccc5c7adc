//! Integration test: alarm priority arbitration.
//!
//! Raises all six alarms at once, then clears and acknowledges them one by
//! one. Each time the error step must move to the most urgent alarm still
//! holding `Status`, and the outputs must follow that alarm's reaction.

use tank_common::alarm::{ALARM_PRIORITY, AlarmId};
use tank_common::io::{DigitalInput, DigitalOutput};
use tank_common::state::Step;

use super::Plant;

// ── Helpers ─────────────────────────────────────────────────────────

/// Two cycles that leave every alarm with `Status` set.
fn raise_all(plant: &mut Plant) {
    // Cycle 1: temperature low, low-low sensor covered.
    plant.set_temperature(5.0);
    plant.set(DigitalInput::LowLowLevel, true);
    plant.scan();

    // Cycle 2: temperature high (low alarm stays unacknowledged), low-low
    // uncovered (falling edge), overfill, gate open, emergency stop.
    plant.set_temperature(95.0);
    plant.set(DigitalInput::LowLowLevel, false);
    plant.set(DigitalInput::HighHighLevel, true);
    plant.set(DigitalInput::DischargeGateClosed, false);
    plant.set(DigitalInput::EmergencyButton, true);
    plant.scan();
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn all_alarms_raised_selects_emergency_stop() {
    let mut plant = Plant::new();
    raise_all(&mut plant);

    for id in AlarmId::ALL {
        assert!(plant.alarm(id).status(), "{id}");
    }
    assert!(plant.trip());
    assert_eq!(plant.step(), Step::Error(AlarmId::EmergencyStop));

    // Reaction applied in the tripping cycle.
    assert!(!plant.output(DigitalOutput::FillingValveOpen));
    assert!(!plant.output(DigitalOutput::HeatingOn));
    assert!(!plant.output(DigitalOutput::DischargingValveOpen));
    assert!(plant.output(DigitalOutput::DischargingGateOpen));
}

#[test]
fn clearing_promotes_next_most_urgent() {
    let mut plant = Plant::new();
    raise_all(&mut plant);

    // Release the emergency stop and acknowledge. Tank-low and temp-low
    // have no active condition any more and clear too.
    plant.set(DigitalInput::EmergencyButton, false);
    plant.reset();
    assert!(!plant.alarm(AlarmId::EmergencyStop).status());
    assert!(!plant.alarm(AlarmId::TankTooLow).status());
    assert!(!plant.alarm(AlarmId::TempTooLow).status());
    assert_eq!(plant.step(), Step::Error(AlarmId::TankTooHigh));

    plant.set(DigitalInput::HighHighLevel, false);
    plant.reset();
    assert_eq!(plant.step(), Step::Error(AlarmId::TempTooHigh));

    plant.set_temperature(40.0);
    plant.reset();
    assert_eq!(plant.step(), Step::Error(AlarmId::DoorOpen));
    assert!(plant.trip());

    // Last alarm gone: trip drops and the normal branch re-enters at Stop
    // in the same cycle.
    plant.set(DigitalInput::DischargeGateClosed, true);
    plant.reset();
    assert!(!plant.trip());
    assert_eq!(plant.step(), Step::Stop);
    assert!(plant.runner.state().alarms.status_mask().is_empty());
}

#[test]
fn unacknowledged_alarm_keeps_priority() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::HighHighLevel, true);
    plant.scan();
    assert_eq!(plant.step(), Step::Error(AlarmId::TankTooHigh));

    // Condition gone but not acknowledged; a lower alarm appears.
    plant.set(DigitalInput::HighHighLevel, false);
    plant.set(DigitalInput::DischargeGateClosed, false);
    plant.scan();
    assert!(!plant.alarm(AlarmId::TankTooHigh).active());
    assert!(plant.alarm(AlarmId::TankTooHigh).unack());
    assert_eq!(plant.step(), Step::Error(AlarmId::TankTooHigh));

    plant.reset();
    assert_eq!(plant.step(), Step::Error(AlarmId::DoorOpen));
}

#[test]
fn each_alarm_alone_gets_its_error_step() {
    for id in ALARM_PRIORITY {
        let mut plant = Plant::new();
        match id {
            AlarmId::EmergencyStop => plant.set(DigitalInput::EmergencyButton, true),
            AlarmId::TankTooHigh => plant.set(DigitalInput::HighHighLevel, true),
            AlarmId::TempTooHigh => plant.set_temperature(80.1),
            AlarmId::TankTooLow => {
                plant.set(DigitalInput::LowLowLevel, true);
                plant.scan();
                plant.set(DigitalInput::LowLowLevel, false);
            }
            AlarmId::TempTooLow => plant.set_temperature(9.9),
            AlarmId::DoorOpen => plant.set(DigitalInput::DischargeGateClosed, false),
        }
        plant.scan();
        assert_eq!(plant.step(), Step::Error(id), "{id}");
        assert_eq!(plant.runner.state().alarms.status_mask(), id.mask(), "{id}");
    }
}

#[test]
fn temperature_reactions_are_partial() {
    let mut plant = Plant::new();
    plant.set_temperature(85.0);
    plant.scan();
    assert_eq!(plant.step(), Step::Error(AlarmId::TempTooHigh));
    assert!(!plant.output(DigitalOutput::HeatingOn));
    assert!(plant.output(DigitalOutput::DischargingGateOpen));

    let mut plant = Plant::new();
    plant.set_temperature(2.0);
    plant.scan();
    assert_eq!(plant.step(), Step::Error(AlarmId::TempTooLow));
    assert!(!plant.output(DigitalOutput::FillingValveOpen));
    assert!(plant.output(DigitalOutput::DischargingGateOpen));
}

#[test]
fn tank_too_low_leaves_gate_closed() {
    let mut plant = Plant::new();
    plant.set(DigitalInput::LowLowLevel, true);
    plant.scan();
    plant.set(DigitalInput::LowLowLevel, false);
    plant.scan_n(3);
    assert_eq!(plant.step(), Step::Error(AlarmId::TankTooLow));
    assert!(!plant.output(DigitalOutput::DischargingGateOpen));
    assert!(!plant.output(DigitalOutput::FillingValveOpen));
}

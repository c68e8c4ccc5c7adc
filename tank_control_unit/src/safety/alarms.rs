//! Alarm evaluation: reset intake, condition recomputation, latching.
//!
//! Runs once per cycle in a fixed order:
//! 1. Reset intake: a pressed reset button acknowledges every alarm.
//! 2. Recompute `Active` for every alarm from the input snapshot, then
//!    store the low-low level reading in the edge memory.
//! 3. Latch: `Active` forces `UnAck`; `Status` is rederived for all alarms.
//!
//! Because reset runs before recomputation, a reset while the condition
//! still holds is undone by step 3 within the same cycle.

use tank_common::alarm::{AlarmId, AlarmMask, AlarmTable};
use tank_common::io::{AnalogInput, DigitalInput, InputSnapshot};
use tracing::{info, warn};

/// Temperature alarm limits [°C].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmLimits {
    /// `TempTooHigh` is active strictly above this value.
    pub max_temperature: f64,
    /// `TempTooLow` is active strictly below this value.
    pub min_temperature: f64,
}

/// Falling-edge detector (IEC 61131-3 `F_TRIG`).
///
/// Holds the previous cycle's signal; the only cross-cycle memory the
/// alarm subsystem keeps besides the alarm table itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FallingEdge {
    previous: bool,
}

impl FallingEdge {
    pub const fn new() -> Self {
        Self { previous: false }
    }

    /// Feed the current sample. Returns `true` on a true → false transition.
    #[inline]
    pub fn call(&mut self, current: bool) -> bool {
        let edge = self.previous && !current;
        self.previous = current;
        edge
    }

    /// Sample stored by the last [`call`](Self::call).
    #[inline]
    pub const fn previous(&self) -> bool {
        self.previous
    }
}

/// Condition for a single alarm against the current inputs.
///
/// `low_low_fell` is the falling-edge result for the low-low level sensor
/// in this cycle.
pub fn alarm_condition(
    id: AlarmId,
    inputs: &InputSnapshot,
    limits: &AlarmLimits,
    low_low_fell: bool,
) -> bool {
    let temperature = inputs.analog(AnalogInput::Temperature);
    match id {
        AlarmId::TankTooHigh => inputs.digital(DigitalInput::HighHighLevel),
        AlarmId::TankTooLow => low_low_fell,
        AlarmId::TempTooHigh => temperature > limits.max_temperature,
        AlarmId::TempTooLow => temperature < limits.min_temperature,
        AlarmId::DoorOpen => !inputs.digital(DigitalInput::DischargeGateClosed),
        AlarmId::EmergencyStop => inputs.digital(DigitalInput::EmergencyButton),
    }
}

/// Run steps 1–3 on the alarm table.
///
/// Returns the alarms whose condition rose this cycle.
pub fn evaluate_alarms(
    alarms: &mut AlarmTable,
    low_low_edge: &mut FallingEdge,
    inputs: &InputSnapshot,
    limits: &AlarmLimits,
) -> AlarmMask {
    let before = *alarms;

    // 1. Reset intake.
    if inputs.digital(DigitalInput::ResetButton) {
        for (_, state) in alarms.iter_mut() {
            state.acknowledge();
        }
    }

    // 2. Active recomputation.
    let low_low_fell = low_low_edge.call(inputs.digital(DigitalInput::LowLowLevel));
    for (id, state) in alarms.iter_mut() {
        state.set_active(alarm_condition(id, inputs, limits, low_low_fell));
    }

    // 3. UnAck / Status.
    for (_, state) in alarms.iter_mut() {
        state.latch();
    }

    let risen = alarms.active_mask() - before.active_mask();
    let cleared = before.status_mask() - alarms.status_mask();
    for id in AlarmId::ALL {
        if risen.contains(id.mask()) {
            warn!(alarm = %id, kind = ?id, "alarm raised");
        }
        if cleared.contains(id.mask()) {
            info!(alarm = %id, kind = ?id, "alarm acknowledged and cleared");
        }
    }
    risen
}

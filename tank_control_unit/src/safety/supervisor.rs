//! Alarm phase of the scan cycle.
//!
//! Evaluates the alarm table, arbitrates, and takes the trip decision on
//! the scan state. Pure computation: nothing here can fail.

use tank_common::alarm::AlarmId;
use tracing::debug;

use super::alarms::{AlarmLimits, evaluate_alarms};
use super::arbitration::{arbitrate, decide_trip};
use crate::cycle::ScanState;

/// Run the alarm phase. Returns the arbitration winner, if any.
pub fn run_alarm_phase(state: &mut ScanState, limits: &AlarmLimits) -> Option<AlarmId> {
    evaluate_alarms(
        &mut state.alarms,
        &mut state.low_low_edge,
        &state.inputs,
        limits,
    );

    let previous = state.step.alarm();
    let verdict = arbitrate(&state.alarms);
    state.trip = decide_trip(verdict, &mut state.step);

    if verdict != previous {
        match verdict {
            Some(id) => debug!(alarm = %id, raised = ?state.alarms.raised(), "most urgent alarm"),
            None => debug!("all alarms clear"),
        }
    }
    verdict
}

//! Alarm priority arbitration and trip decision.
//!
//! Arbitration walks [`ALARM_PRIORITY`] and returns the first alarm whose
//! `Status` is set. The order is total, so the winner is unique whenever
//! any alarm is raised.

use tank_common::alarm::{ALARM_PRIORITY, AlarmId, AlarmTable};
use tank_common::state::Step;

/// Most urgent alarm with `Status` set, or `None` when all are clear.
pub fn arbitrate(alarms: &AlarmTable) -> Option<AlarmId> {
    ALARM_PRIORITY
        .into_iter()
        .find(|id| alarms.get(*id).status())
}

/// Apply the arbitration verdict.
///
/// A winner trips the process and overwrites `step` with its error step.
/// Without a winner the step is left for the normal sequence. Returns the
/// new trip flag.
pub fn decide_trip(verdict: Option<AlarmId>, step: &mut Step) -> bool {
    match verdict {
        Some(id) => {
            *step = Step::Error(id);
            true
        }
        None => false,
    }
}

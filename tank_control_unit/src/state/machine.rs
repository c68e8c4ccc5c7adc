//! Process phase: branch selection and step advance.
//!
//! The trip flag set by the alarm phase selects exactly one branch:
//! - `trip` → error branch, reacting to the alarm held in the error step.
//! - otherwise → normal branch, one transition of the process chart.
//!
//! The error branch never changes the step. Leaving an error step happens
//! only through the normal branch once the trip has cleared.

use tank_common::alarm::AlarmId;
use tank_common::state::Step;
use tracing::info;

use super::grafcet::step_normal;
use super::reaction::react;
use crate::cycle::ScanState;

/// Branch taken by the process phase in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Alarm reaction for the tripped alarm.
    ErrorHandling(AlarmId),
    /// Process chart.
    Normal,
}

impl Branch {
    /// Pick the branch for the given step and trip flag.
    ///
    /// A trip always comes with an error step; the alarm phase guarantees it.
    #[inline]
    pub fn select(step: Step, trip: bool) -> Self {
        debug_assert!(!trip || step.is_error(), "trip without error step: {step}");
        match step {
            Step::Error(id) if trip => Self::ErrorHandling(id),
            _ => Self::Normal,
        }
    }
}

/// Run the process phase on the scan state. Returns the branch taken.
pub fn run_process_phase(state: &mut ScanState, setpoint: f64) -> Branch {
    let branch = Branch::select(state.step, state.trip);
    match branch {
        Branch::ErrorHandling(alarm) => react(alarm, &mut state.outputs),
        Branch::Normal => {
            let from = state.step;
            let to = step_normal(from, &state.inputs, &mut state.outputs, setpoint);
            if to != from {
                info!(%from, %to, "step change");
            }
            state.step = to;
        }
    }
    branch
}

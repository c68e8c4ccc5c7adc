//! Safety module root.
//!
//! Alarm evaluation, priority arbitration and the per-cycle alarm phase
//! that drives the trip flag.

pub mod alarms;
pub mod arbitration;
pub mod supervisor;

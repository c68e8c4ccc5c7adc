//! State machine module root.
//!
//! The process chart (normal operation), the per-alarm error reactions,
//! and the branch dispatcher that picks exactly one of them per cycle.

pub mod actuators;
pub mod grafcet;
pub mod machine;
pub mod reaction;

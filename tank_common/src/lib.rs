//! Tank PLC Common Library
//!
//! Shared identifiers, per-cycle snapshots and configuration loading for
//! the tank PLC workspace crates.
//!
//! # Module Structure
//!
//! - [`io`] - Closed digital/analog I/O identifier sets and snapshots
//! - [`alarm`] - Alarm identifiers, priority order and per-alarm state
//! - [`state`] - Process step enumeration
//! - [`tags`] - Tag address space exposed by the transport
//! - [`transport`] - Transport error type
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Workspace-wide constants
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use tank_common::prelude::*;
//!
//! let inputs = InputSnapshot::stop_state();
//! assert!(inputs.digital(DigitalInput::DischargeGateClosed));
//! ```

pub mod alarm;
pub mod config;
pub mod consts;
pub mod io;
pub mod prelude;
pub mod state;
pub mod tags;
pub mod transport;

//! # Tank Control Unit Library
//!
//! Cyclic scan engine for a heated process tank. Every cycle reads one
//! input image, runs the alarm subsystem, advances the process chart (or
//! the error reaction of the most urgent alarm) and commits one output
//! image together with the alarm triples.
//!
//! ## Phases
//!
//! 1. **Read**: input image from the [`transport::Transport`]
//! 2. **Alarms**: [`safety`] evaluation, priority arbitration, trip flag
//! 3. **Process**: [`state`], error branch or normal branch, never both
//! 4. **Write**: outputs and alarms in one commit
//!
//! All computation between read and write is synchronous and infallible.

pub mod config;
pub mod cycle;
pub mod safety;
pub mod state;
pub mod transport;

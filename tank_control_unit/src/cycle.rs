//! Fixed-period scan cycle: read → alarms → process → write → sleep.
//!
//! ## Cycle Body
//! 1. Read the input image from the transport.
//! 2. Alarm phase: evaluate, arbitrate, set the trip flag.
//! 3. Process phase: error reaction or one step of the process chart.
//! 4. Commit outputs and alarm triples in one write.
//!
//! The body works on a copy of the scan state. A transport failure in step
//! 1 or 4 drops the copy, so the stored state and the published tags stay
//! at the last completed cycle.
//!
//! ## Loop
//! Sleep-based pacing. Overruns are counted and logged, never fatal.
//! Transport failures are counted and logged; the next tick retries.
//! The shutdown flag is checked only at the cycle boundary.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tank_common::alarm::AlarmTable;
use tank_common::config::ConfigError;
use tank_common::io::{InputSnapshot, OutputSnapshot};
use tank_common::state::Step;
use tank_common::transport::TransportError;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::ControlUnitConfig;
use crate::safety::alarms::{AlarmLimits, FallingEdge};
use crate::safety::supervisor::run_alarm_phase;
use crate::state::machine::{Branch, run_process_phase};
use crate::transport::Transport;

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-cycle timing statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    /// Cycles executed, including abandoned ones.
    pub cycle_count: u64,
    /// Last cycle body duration [ns].
    pub last_cycle_ns: u64,
    /// Minimum cycle body duration [ns].
    pub min_cycle_ns: u64,
    /// Maximum cycle body duration [ns].
    pub max_cycle_ns: u64,
    /// Running sum for average computation.
    pub sum_cycle_ns: u128,
    /// Cycles whose body outlasted the period.
    pub overruns: u64,
    /// Cycles abandoned on a transport error.
    pub transport_faults: u64,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: u64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
            transport_faults: 0,
        }
    }

    /// Record a cycle body duration.
    #[inline]
    pub fn record(&mut self, duration: Duration) {
        let ns = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.cycle_count += 1;
        self.last_cycle_ns = ns;
        self.min_cycle_ns = self.min_cycle_ns.min(ns);
        self.max_cycle_ns = self.max_cycle_ns.max(ns);
        self.sum_cycle_ns += u128::from(ns);
    }

    /// Average cycle body duration [ns] (0 if no cycles).
    #[inline]
    pub fn avg_cycle_ns(&self) -> u64 {
        if self.cycle_count == 0 {
            0
        } else {
            (self.sum_cycle_ns / u128::from(self.cycle_count)) as u64
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Scan State ─────────────────────────────────────────────────────

/// Everything the scan engine carries from one cycle to the next.
///
/// Owned by the [`CycleRunner`] and handed to each phase by `&mut`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScanState {
    /// Input image of the current cycle.
    pub inputs: InputSnapshot,
    /// Output image, persisted across cycles.
    pub outputs: OutputSnapshot,
    pub alarms: AlarmTable,
    pub step: Step,
    /// Set by the alarm phase when an alarm has `Status`.
    pub trip: bool,
    /// Low-low level sensor memory for the tank-low alarm.
    pub low_low_edge: FallingEdge,
}

impl ScanState {
    /// Power-on state: step `Stop`, outputs off, alarms clear.
    pub fn new() -> Self {
        Self::default()
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// Errors surfaced by the cycle runner.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Invalid configuration at construction.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport failure outside the cycle body (e.g. on close).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// The scan loop. Owns the scan state and the transport.
pub struct CycleRunner<T: Transport> {
    transport: T,
    state: ScanState,
    stats: CycleStats,
    cycle_time: Duration,
    setpoint: f64,
    limits: AlarmLimits,
    running: Arc<AtomicBool>,
    max_cycles: Option<u64>,
}

impl<T: Transport> CycleRunner<T> {
    /// Validate the configuration and build a runner in the power-on state.
    pub fn new(config: &ControlUnitConfig, transport: T) -> Result<Self, CycleError> {
        config.validate()?;
        Ok(Self {
            transport,
            state: ScanState::new(),
            stats: CycleStats::new(),
            cycle_time: config.cycle_time(),
            setpoint: config.process.setpoint,
            limits: config.process.alarm_limits(),
            running: Arc::new(AtomicBool::new(true)),
            max_cycles: None,
        })
    }

    /// Use an externally owned running flag. Clearing it stops the loop
    /// at the next cycle boundary.
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = running;
        self
    }

    /// Stop after `limit` cycles.
    pub fn with_cycle_limit(mut self, limit: Option<u64>) -> Self {
        self.max_cycles = limit;
        self
    }

    #[inline]
    pub const fn state(&self) -> &ScanState {
        &self.state
    }

    #[inline]
    pub const fn stats(&self) -> &CycleStats {
        &self.stats
    }

    #[inline]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    #[inline]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    #[inline]
    pub const fn cycle_time(&self) -> Duration {
        self.cycle_time
    }

    /// Run one cycle body without pacing or statistics.
    ///
    /// On error nothing is committed and the stored state is unchanged.
    pub fn scan_once(&mut self) -> Result<Branch, TransportError> {
        let mut next = self.state;
        next.inputs = self.transport.read_inputs()?;

        run_alarm_phase(&mut next, &self.limits);
        let branch = run_process_phase(&mut next, self.setpoint);

        self.transport.write_outputs(&next.outputs, &next.alarms)?;
        self.state = next;
        Ok(branch)
    }

    /// Enter the scan loop until the running flag clears or the cycle
    /// limit is reached, then close the transport.
    pub fn run(&mut self) -> Result<(), CycleError> {
        info!(
            cycle_time_ms = self.cycle_time.as_millis() as u64,
            setpoint = self.setpoint,
            max_cycles = ?self.max_cycles,
            "scan loop started"
        );

        while self.running.load(Ordering::Acquire) {
            if self
                .max_cycles
                .is_some_and(|limit| self.stats.cycle_count >= limit)
            {
                debug!(cycles = self.stats.cycle_count, "cycle limit reached");
                break;
            }

            let cycle_start = Instant::now();

            // ── Cycle body ──
            if let Err(e) = self.scan_once() {
                self.stats.transport_faults += 1;
                error!(error = %e, cycle = self.stats.cycle_count, "cycle abandoned");
            }

            let elapsed = cycle_start.elapsed();
            self.stats.record(elapsed);

            match self.cycle_time.checked_sub(elapsed) {
                Some(remaining) => thread::sleep(remaining),
                None => {
                    self.stats.overruns += 1;
                    warn!(
                        elapsed_us = elapsed.as_micros() as u64,
                        budget_us = self.cycle_time.as_micros() as u64,
                        "cycle overrun"
                    );
                }
            }
        }

        self.transport.close()?;
        info!(
            cycles = self.stats.cycle_count,
            overruns = self.stats.overruns,
            transport_faults = self.stats.transport_faults,
            avg_cycle_ns = self.stats.avg_cycle_ns(),
            step = %self.state.step,
            "scan loop stopped"
        );
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

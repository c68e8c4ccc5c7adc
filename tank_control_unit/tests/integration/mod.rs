//! Shared harness for the scenario tests.

mod alarm_ack;
mod alarm_priority;
mod grafcet_sequence;

use tank_common::alarm::{AlarmId, AlarmState};
use tank_common::io::{AnalogInput, DigitalInput, DigitalOutput};
use tank_common::state::Step;
use tank_control_unit::config::ControlUnitConfig;
use tank_control_unit::cycle::CycleRunner;
use tank_control_unit::transport::{InMemoryTagServer, TagClient};

/// Scan engine wired to an in-process tag server, plus a client on it.
pub struct Plant {
    pub runner: CycleRunner<InMemoryTagServer>,
    pub client: TagClient,
}

impl Plant {
    pub fn new() -> Self {
        Self::with_config(&ControlUnitConfig {
            cycle_time_ms: 1,
            ..ControlUnitConfig::default()
        })
    }

    pub fn with_config(config: &ControlUnitConfig) -> Self {
        let server = InMemoryTagServer::new();
        let client = server.client();
        let runner = CycleRunner::new(config, server).unwrap();
        Self { runner, client }
    }

    /// One cycle; panics on transport failure.
    pub fn scan(&mut self) {
        self.runner.scan_once().unwrap();
        self.assert_status_invariant();
    }

    pub fn scan_n(&mut self, n: usize) {
        for _ in 0..n {
            self.scan();
        }
    }

    pub fn set(&self, input: DigitalInput, value: bool) {
        self.client.set_digital(input, value).unwrap();
    }

    pub fn set_temperature(&self, value: f64) {
        self.client
            .set_analog(AnalogInput::Temperature, value)
            .unwrap();
    }

    /// Press reset for exactly one cycle.
    pub fn reset(&mut self) {
        self.set(DigitalInput::ResetButton, true);
        self.scan();
        self.set(DigitalInput::ResetButton, false);
    }

    pub fn step(&self) -> Step {
        self.runner.state().step
    }

    pub fn trip(&self) -> bool {
        self.runner.state().trip
    }

    /// Output as last committed to the tag server.
    pub fn output(&self, output: DigitalOutput) -> bool {
        self.client.outputs().unwrap().get(output)
    }

    /// Alarm triple as last committed to the tag server.
    pub fn alarm(&self, id: AlarmId) -> AlarmState {
        self.client.alarm(id).unwrap()
    }

    pub fn assert_status_invariant(&self) {
        for id in AlarmId::ALL {
            let state = self.alarm(id);
            assert_eq!(state.status(), state.active() || state.unack(), "{id}");
        }
    }
}

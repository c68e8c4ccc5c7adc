//! In-process tag server.
//!
//! [`TagStore`] holds one typed value per tag behind a shared mutex.
//! [`InMemoryTagServer`] is the scan engine's side of it and implements
//! [`Transport`]; [`TagClient`] is the harness side, a writer of input tags
//! and a reader of everything.
//!
//! A write phase sets every output and alarm tag under one lock acquisition,
//! so a client never observes a half-written cycle.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use tank_common::alarm::{AlarmId, AlarmState, AlarmTable};
use tank_common::io::{AnalogInput, DigitalInput, InputSnapshot, OutputSnapshot};
use tank_common::tags::{TagAddress, TagKind, TagValue};
use tank_common::transport::TransportError;
use tracing::{debug, info};

use super::Transport;

// ─── Store ──────────────────────────────────────────────────────────

/// Tag values plus connection status.
#[derive(Debug, Clone)]
pub struct TagStore {
    inputs: InputSnapshot,
    outputs: OutputSnapshot,
    alarms: AlarmTable,
    online: bool,
    closed: bool,
    commits: u64,
}

impl TagStore {
    /// Fresh store: stop-state inputs, outputs off, alarms clear, online.
    pub fn new() -> Self {
        Self {
            inputs: InputSnapshot::stop_state(),
            outputs: OutputSnapshot::default(),
            alarms: AlarmTable::default(),
            online: true,
            closed: false,
            commits: 0,
        }
    }

    /// Current value of any tag.
    pub fn value(&self, tag: TagAddress) -> TagValue {
        match tag {
            TagAddress::DigitalInput(di) => self.inputs.digital(di).into(),
            TagAddress::AnalogInput(ai) => self.inputs.analog(ai).into(),
            TagAddress::DigitalOutput(dq) => self.outputs.get(dq).into(),
            TagAddress::Alarm(id, attr) => self.alarms.get(id).attribute(attr).into(),
        }
    }

    /// Write an input tag. Output and alarm tags are owned by the scan
    /// engine and rejected here.
    pub fn set_input(&mut self, tag: TagAddress, value: TagValue) -> Result<(), TransportError> {
        let mismatch = || TransportError::TypeMismatch {
            tag,
            expected: tag.kind(),
        };
        match tag {
            TagAddress::DigitalInput(di) => {
                let value = value.as_bool().ok_or_else(mismatch)?;
                self.inputs.set_digital(di, value);
                Ok(())
            }
            TagAddress::AnalogInput(ai) => {
                let value = value.as_real().ok_or_else(mismatch)?;
                self.inputs.set_analog(ai, value);
                Ok(())
            }
            TagAddress::DigitalOutput(_) | TagAddress::Alarm(..) => {
                Err(TransportError::ReadOnly(tag))
            }
        }
    }

    #[inline]
    pub const fn inputs(&self) -> &InputSnapshot {
        &self.inputs
    }

    #[inline]
    pub const fn outputs(&self) -> &OutputSnapshot {
        &self.outputs
    }

    #[inline]
    pub const fn alarms(&self) -> &AlarmTable {
        &self.alarms
    }

    /// Number of successful commits.
    #[inline]
    pub const fn commits(&self) -> u64 {
        self.commits
    }

    #[inline]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_reachable(&self) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        if !self.online {
            return Err(TransportError::Unavailable("tag server offline".to_string()));
        }
        Ok(())
    }
}

impl Default for TagStore {
    fn default() -> Self {
        Self::new()
    }
}

type SharedStore = Arc<Mutex<TagStore>>;

fn lock(store: &SharedStore) -> Result<MutexGuard<'_, TagStore>, TransportError> {
    store
        .lock()
        .map_err(|_| TransportError::Unavailable("tag store lock poisoned".to_string()))
}

// ─── Server ─────────────────────────────────────────────────────────

/// Scan engine side of the in-process tag server.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTagServer {
    store: SharedStore,
}

impl InMemoryTagServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// New client handle on the same store.
    pub fn client(&self) -> TagClient {
        TagClient {
            store: Arc::clone(&self.store),
        }
    }
}

impl Transport for InMemoryTagServer {
    fn read_inputs(&mut self) -> Result<InputSnapshot, TransportError> {
        let store = lock(&self.store)?;
        store.check_reachable()?;
        Ok(store.inputs)
    }

    fn write_outputs(
        &mut self,
        outputs: &OutputSnapshot,
        alarms: &AlarmTable,
    ) -> Result<(), TransportError> {
        let mut store = lock(&self.store)?;
        store.check_reachable()?;
        store.outputs = *outputs;
        store.alarms = *alarms;
        store.commits += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        let mut store = lock(&self.store)?;
        if !store.closed {
            store.closed = true;
            info!(commits = store.commits, "tag server closed");
        }
        Ok(())
    }
}

// ─── Client ─────────────────────────────────────────────────────────

/// Harness handle on the tag store.
///
/// Client calls work regardless of the server's online state; the offline
/// switch only affects the scan engine side.
#[derive(Debug, Clone)]
pub struct TagClient {
    store: SharedStore,
}

impl TagClient {
    /// Write an input tag.
    pub fn set_value(
        &self,
        tag: TagAddress,
        value: impl Into<TagValue>,
    ) -> Result<(), TransportError> {
        let value = value.into();
        lock(&self.store)?.set_input(tag, value)?;
        debug!(%tag, ?value, "tag written");
        Ok(())
    }

    pub fn set_digital(&self, input: DigitalInput, value: bool) -> Result<(), TransportError> {
        self.set_value(TagAddress::DigitalInput(input), value)
    }

    pub fn set_analog(&self, input: AnalogInput, value: f64) -> Result<(), TransportError> {
        self.set_value(TagAddress::AnalogInput(input), value)
    }

    /// Read any tag.
    pub fn value(&self, tag: TagAddress) -> Result<TagValue, TransportError> {
        Ok(lock(&self.store)?.value(tag))
    }

    /// Read a boolean tag.
    pub fn bool_value(&self, tag: TagAddress) -> Result<bool, TransportError> {
        self.value(tag)?
            .as_bool()
            .ok_or(TransportError::TypeMismatch {
                tag,
                expected: TagKind::Bool,
            })
    }

    /// Full attribute triple of one alarm as last committed.
    pub fn alarm(&self, id: AlarmId) -> Result<AlarmState, TransportError> {
        Ok(*lock(&self.store)?.alarms().get(id))
    }

    /// `Status` of one alarm as last committed.
    pub fn alarm_status(&self, id: AlarmId) -> Result<bool, TransportError> {
        Ok(self.alarm(id)?.status())
    }

    /// Output image as last committed.
    pub fn outputs(&self) -> Result<OutputSnapshot, TransportError> {
        Ok(*lock(&self.store)?.outputs())
    }

    /// Input image the next cycle will read.
    pub fn inputs(&self) -> Result<InputSnapshot, TransportError> {
        Ok(*lock(&self.store)?.inputs())
    }

    /// Press a button for `hold`, then release it.
    pub fn pulse(&self, input: DigitalInput, hold: Duration) -> Result<(), TransportError> {
        self.set_digital(input, true)?;
        thread::sleep(hold);
        self.set_digital(input, false)
    }

    /// Restore the idle input image.
    pub fn set_default_inputs(&self) -> Result<(), TransportError> {
        lock(&self.store)?.inputs = InputSnapshot::stop_state();
        Ok(())
    }

    /// Take the server offline (`false`) or bring it back (`true`).
    pub fn set_online(&self, online: bool) -> Result<(), TransportError> {
        lock(&self.store)?.online = online;
        Ok(())
    }

    pub fn commits(&self) -> Result<u64, TransportError> {
        Ok(lock(&self.store)?.commits())
    }

    pub fn is_closed(&self) -> Result<bool, TransportError> {
        Ok(lock(&self.store)?.is_closed())
    }
}

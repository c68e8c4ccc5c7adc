//! Transport seam between the scan engine and the tag server.
//!
//! The scan engine reads one input image per cycle and writes one output
//! image plus the alarm table per cycle. Any implementation failing a call
//! returns a [`TransportError`]; the engine abandons that cycle.

pub mod memory;

use tank_common::alarm::AlarmTable;
use tank_common::io::{InputSnapshot, OutputSnapshot};
use tank_common::transport::TransportError;

pub use memory::{InMemoryTagServer, TagClient, TagStore};

/// Tag server connection used by the scan loop.
pub trait Transport {
    /// Acquire a consistent input image.
    fn read_inputs(&mut self) -> Result<InputSnapshot, TransportError>;

    /// Write phase of one cycle: the digital outputs and the
    /// `{Active, UnAck, Status}` triple of every alarm.
    ///
    /// All or nothing. On `Err` no tag of this cycle may be visible.
    fn write_outputs(
        &mut self,
        outputs: &OutputSnapshot,
        alarms: &AlarmTable,
    ) -> Result<(), TransportError>;

    /// Release the connection. Further calls fail with
    /// [`TransportError::Closed`].
    fn close(&mut self) -> Result<(), TransportError>;
}

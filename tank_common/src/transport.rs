//! Transport error type.
//!
//! The transport collaborator moves snapshots between the scan engine and
//! the tag server. Any failure is reported as a [`TransportError`]; the
//! scan loop abandons the cycle and retries on the next tick.

use thiserror::Error;

use crate::tags::{TagAddress, TagKind};

/// Input read or output write failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// Tag server unreachable or refusing requests.
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    /// Value of the wrong type written to or read from a tag.
    #[error("type mismatch on {tag}: expected {expected}")]
    TypeMismatch {
        /// Offending tag.
        tag: TagAddress,
        /// Type the tag is declared with.
        expected: TagKind,
    },

    /// Output or alarm tag written from outside the scan engine.
    #[error("tag {0} is read-only")]
    ReadOnly(TagAddress),

    /// Transport has been closed.
    #[error("transport closed")]
    Closed,
}

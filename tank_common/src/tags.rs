//! Tag address space exposed by the transport.
//!
//! Every input, output and alarm attribute is one addressable tag under a
//! single process object ([`PROCESS_OBJECT`]). Alarms are child objects
//! with one tag per attribute:
//!
//! ```text
//! myPLC/DI0 .. myPLC/DI9      bool   digital inputs
//! myPLC/AI0                   real   temperature
//! myPLC/DQ0 .. myPLC/DQ3      bool   digital outputs
//! myPLC/A0/Active             bool   alarm attributes (A0..A5)
//! myPLC/A0/UnAck
//! myPLC/A0/Status
//! ```
//!
//! The mapping is a closed enumeration; parsing anything outside it yields
//! [`ConfigError::UnknownTag`].

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::alarm::{AlarmAttribute, AlarmId};
use crate::config::ConfigError;
use crate::consts::PROCESS_OBJECT;
use crate::io::{AnalogInput, DigitalInput, DigitalOutput};

// ─── TagKind / TagValue ─────────────────────────────────────────────

/// Declared value type of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Bool,
    Real,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Real => f.write_str("real"),
        }
    }
}

/// Value held by a tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Bool(bool),
    Real(f64),
}

impl TagValue {
    #[inline]
    pub const fn kind(&self) -> TagKind {
        match self {
            Self::Bool(_) => TagKind::Bool,
            Self::Real(_) => TagKind::Real,
        }
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            Self::Real(_) => None,
        }
    }

    #[inline]
    pub const fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v),
            Self::Bool(_) => None,
        }
    }
}

impl From<bool> for TagValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for TagValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

// ─── TagAddress ─────────────────────────────────────────────────────

/// One addressable tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagAddress {
    DigitalInput(DigitalInput),
    AnalogInput(AnalogInput),
    DigitalOutput(DigitalOutput),
    Alarm(AlarmId, AlarmAttribute),
}

impl TagAddress {
    /// Declared value type.
    pub const fn kind(&self) -> TagKind {
        match self {
            Self::AnalogInput(_) => TagKind::Real,
            Self::DigitalInput(_) | Self::DigitalOutput(_) | Self::Alarm(..) => TagKind::Bool,
        }
    }

    /// Whether remote clients drive this tag (inputs) or the scan engine
    /// does (outputs and alarm attributes).
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::DigitalInput(_) | Self::AnalogInput(_))
    }

    /// Enumerate the complete address space.
    pub fn all() -> impl Iterator<Item = TagAddress> {
        let di = DigitalInput::ALL.into_iter().map(Self::DigitalInput);
        let ai = AnalogInput::ALL.into_iter().map(Self::AnalogInput);
        let dq = DigitalOutput::ALL.into_iter().map(Self::DigitalOutput);
        let alarms = AlarmId::ALL.into_iter().flat_map(|id| {
            AlarmAttribute::ALL
                .into_iter()
                .map(move |attr| Self::Alarm(id, attr))
        });
        di.chain(ai).chain(dq).chain(alarms)
    }
}

impl fmt::Display for TagAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DigitalInput(di) => write!(f, "{PROCESS_OBJECT}/{di}"),
            Self::AnalogInput(ai) => write!(f, "{PROCESS_OBJECT}/{ai}"),
            Self::DigitalOutput(dq) => write!(f, "{PROCESS_OBJECT}/{dq}"),
            Self::Alarm(id, attr) => write!(f, "{PROCESS_OBJECT}/{id}/{attr}"),
        }
    }
}

impl FromStr for TagAddress {
    type Err = ConfigError;

    /// Accepts full paths (`myPLC/A0/Status`) and paths relative to the
    /// process object (`A0/Status`, `DI4`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ConfigError::UnknownTag(s.to_string());
        let relative = s
            .strip_prefix(PROCESS_OBJECT)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(s);

        let mut parts = relative.split('/');
        let head = parts.next().ok_or_else(unknown)?;
        let tail = parts.next();
        if parts.next().is_some() {
            return Err(unknown());
        }

        match tail {
            Some(attr) => {
                let id = head.parse::<AlarmId>().map_err(|_| unknown())?;
                let attr = attr.parse::<AlarmAttribute>().map_err(|_| unknown())?;
                Ok(Self::Alarm(id, attr))
            }
            None => {
                if let Ok(di) = head.parse::<DigitalInput>() {
                    Ok(Self::DigitalInput(di))
                } else if let Ok(ai) = head.parse::<AnalogInput>() {
                    Ok(Self::AnalogInput(ai))
                } else if let Ok(dq) = head.parse::<DigitalOutput>() {
                    Ok(Self::DigitalOutput(dq))
                } else {
                    Err(unknown())
                }
            }
        }
    }
}

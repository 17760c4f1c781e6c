//! Port state definitions for fabric switch ports.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative/operational state of a switch port, as reported in the
/// `===PORT_STATUS_START===` section of a device dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortState {
    /// Port is up and passing traffic.
    Up,
    /// Port is administratively or operationally down.
    Down,
    /// State could not be determined by the collector.
    Unknown,
}

impl PortState {
    /// Returns true if the port is down.
    ///
    /// A down port overrides any protocol-level signal during validation:
    /// an interface with an active neighbor advertisement but a DOWN
    /// physical state is still a failure.
    pub const fn is_down(&self) -> bool {
        matches!(self, PortState::Down)
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortState::Up => "UP",
            PortState::Down => "DOWN",
            PortState::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PortState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UP" => Ok(PortState::Up),
            "DOWN" => Ok(PortState::Down),
            "UNKNOWN" => Ok(PortState::Unknown),
            other => Err(ParseError::InvalidPortState(other.to_string())),
        }
    }
}

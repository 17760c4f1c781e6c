//! Stage 1 validation result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-interface verdict from the Stage 1 validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortVerdict {
    /// Observed neighbor exactly matches the declared one.
    Pass,
    /// Port down, wrong neighbor, wrong remote port, or undeclared
    /// activity.
    Fail,
    /// The declared interface reported no active neighbor at all.
    #[serde(rename = "No-Info")]
    NoInfo,
}

impl fmt::Display for PortVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortVerdict::Pass => "Pass",
            PortVerdict::Fail => "Fail",
            PortVerdict::NoInfo => "No-Info",
        };
        write!(f, "{}", s)
    }
}

/// One row of a device's validation table: what was expected on a port,
/// what was actually seen, and the verdict.
///
/// Rows for declared edges come first in declaration order, followed by
/// synthetic rows for active neighbors that were never declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRow {
    /// Local interface name.
    pub port: String,
    /// Verdict for this interface.
    pub verdict: PortVerdict,
    /// Declared remote device, or `"None"`.
    pub expected_neighbor: String,
    /// Declared remote port, or `"None"`.
    pub expected_neighbor_port: String,
    /// Observed remote device, or `"None"`.
    pub actual_neighbor: String,
    /// Observed remote port, or `"None"`.
    pub actual_neighbor_port: String,
    /// Local port state from the dump's status table, or `"N/A"`.
    pub port_oper_state: String,
}

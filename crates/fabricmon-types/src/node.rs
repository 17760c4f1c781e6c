//! Graph node definitions for the reconciled topology.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Icon class used by the browser-side visualization to pick a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeIcon {
    /// Fabric switch (leaf/spine/border).
    Switch,
    /// Firewall appliance.
    Firewall,
    /// Server with an in-band fabric connection.
    Server,
    /// Endpoint host admitted via `devices.yaml`.
    Host,
    /// Device that should have reported but did not, or could not be
    /// categorized.
    Unknown,
}

impl NodeIcon {
    /// Returns true for icons that represent compute endpoints rather
    /// than fabric infrastructure. Endpoints are never re-marked as
    /// unreachable by the reconciler.
    pub const fn is_endpoint(&self) -> bool {
        matches!(self, NodeIcon::Server | NodeIcon::Host | NodeIcon::Firewall)
    }
}

impl fmt::Display for NodeIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeIcon::Switch => "switch",
            NodeIcon::Firewall => "firewall",
            NodeIcon::Server => "server",
            NodeIcon::Host => "host",
            NodeIcon::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for NodeIcon {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "switch" => Ok(NodeIcon::Switch),
            "firewall" => Ok(NodeIcon::Firewall),
            "server" => Ok(NodeIcon::Server),
            "host" => Ok(NodeIcon::Host),
            "unknown" => Ok(NodeIcon::Unknown),
            other => Err(ParseError::InvalidNodeIcon(other.to_string())),
        }
    }
}

/// One node in the reconciled topology graph.
///
/// Created once per known device name: from the asset inventory, from a
/// pattern-matched endpoint host, or implicitly as an edge endpoint.
///
/// `id` is only stable within one reconciliation run. It is reassigned on
/// every run by sorting the final node list by name, so it carries no
/// meaning across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceNode {
    /// Dense run-local identifier, `0..N-1` after renumbering.
    pub id: usize,
    /// Device or host name, unique within the graph.
    pub name: String,
    /// Visualization layer assigned by the categorizer.
    pub layer: u32,
    /// Visualization icon assigned by the categorizer.
    pub icon: NodeIcon,
    /// Management IP from the asset inventory, or `"N/A"`.
    #[serde(rename = "primaryIP")]
    pub primary_ip: String,
    /// Hardware model from the asset inventory, or `"N/A"`.
    pub model: String,
    /// Serial number from the asset inventory, or `"N/A"`.
    pub serial_number: String,
    /// Software version from the asset inventory, or `"N/A"`.
    pub software_version: String,
}

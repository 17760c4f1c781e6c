//! Reconciled topology link definitions.

use serde::{Deserialize, Serialize};

/// Declared-vs-observed classification of a link, serialized as the
/// `isMissing` field consumed by the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkPresence {
    /// Observed and declared: the fabric matches the documentation.
    #[serde(rename = "no")]
    Observed,
    /// Observed but declared nowhere: it works but is undocumented.
    #[serde(rename = "fail")]
    Undeclared,
    /// Declared but never observed from either side.
    #[serde(rename = "yes")]
    Missing,
}

/// One undirected adjacency in the reconciled graph.
///
/// `source`/`target` are indices into the final node list. No two links
/// in the final output represent the same undirected device/port pair:
/// the reconciler deduplicates on the canonical 4-tuple and its reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Dense run-local link identifier.
    pub id: usize,
    /// Node id of the source device.
    pub source: usize,
    /// Source device name.
    pub source_device: String,
    /// Source-side interface name.
    pub source_if_name: String,
    /// Source-side port state (`"UP"`, `"DOWN"`, `"UNKNOWN"`, or `"N/A"`).
    pub source_port_status: String,
    /// Source-side port speed in megabits, 0 when unknown.
    pub source_port_speed: u64,
    /// Node id of the target device.
    pub target: usize,
    /// Target device name.
    pub target_device: String,
    /// Target-side interface name.
    pub target_if_name: String,
    /// Target-side port state.
    pub target_port_status: String,
    /// Target-side port speed in megabits, 0 when unknown.
    pub target_port_speed: u64,
    /// Declared-vs-observed classification.
    pub is_missing: LinkPresence,
}

impl Link {
    /// The canonical identity tuple `(sourceDevice, sourceIf, targetDevice,
    /// targetIf)` used together with its reverse for deduplication.
    pub fn tuple(&self) -> (&str, &str, &str, &str) {
        (
            &self.source_device,
            &self.source_if_name,
            &self.target_device,
            &self.target_if_name,
        )
    }
}

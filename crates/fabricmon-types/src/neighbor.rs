//! Neighbor advertisement records extracted from device dumps.

use serde::{Deserialize, Serialize};

/// One LLDP advertisement seen on a local interface.
///
/// Ephemeral: produced by one parse pass over a device dump and consumed
/// by the validator and the reconciler within the same run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRecord {
    /// Local interface the advertisement was received on.
    pub local_interface: String,
    /// Remote system name, FQDN suffix already stripped.
    pub remote_sys_name: String,
    /// Remote port identifier, normalized (known device-name prefix
    /// stripped). Empty if the advertisement carried no usable port field.
    pub remote_port_id: String,
}

impl NeighborRecord {
    /// Creates a new neighbor record.
    pub fn new(
        local_interface: impl Into<String>,
        remote_sys_name: impl Into<String>,
        remote_port_id: impl Into<String>,
    ) -> Self {
        Self {
            local_interface: local_interface.into(),
            remote_sys_name: remote_sys_name.into(),
            remote_port_id: remote_port_id.into(),
        }
    }
}

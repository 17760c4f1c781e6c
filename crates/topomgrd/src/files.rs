//! File name and format constants for topomgrd

/// Asset inventory, one row per managed device
pub const ASSETS_FILE: &str = "assets.ini";

/// Operator-declared adjacency description
pub const TOPOLOGY_DOT_FILE: &str = "topology.dot";

/// Endpoint host names and glob patterns
pub const DEVICES_FILE: &str = "devices.yaml";

/// Categorizer rule configuration
pub const CATEGORY_CONFIG_FILE: &str = "topology_config.yaml";

/// Stage 1 output: per-device validation report
pub const REPORT_FILE: &str = "lldp_results.ini";

/// Stage 2 output: reconciled graph for the visualization
pub const GRAPH_FILE: &str = "topology.js";

/// Per-device dump files are named `<device>_lldp_result.ini`
pub const DUMP_SUFFIX: &str = "_lldp_result.ini";

/// Section delimiters inside a device dump
pub mod markers {
    pub const PORT_STATUS_START: &str = "===PORT_STATUS_START===";
    pub const PORT_STATUS_END: &str = "===PORT_STATUS_END===";
    pub const PORT_SPEED_START: &str = "===PORT_SPEED_START===";
    pub const PORT_SPEED_END: &str = "===PORT_SPEED_END===";
}

/// Special values
pub mod constants {
    /// Management interface, never part of the fabric
    pub const MGMT_INTERFACE: &str = "eth0";

    /// Sentinel device/port name meaning "nothing declared/observed"
    pub const NONE_SENTINEL: &str = "None";

    /// Placeholder for values absent from a dump or the inventory
    pub const NA_VALUE: &str = "N/A";

    /// FQDN suffixes stripped from advertised remote system names
    pub const DOMAIN_SUFFIXES: &[&str] = &[".local", ".lan", ".localdomain"];
}

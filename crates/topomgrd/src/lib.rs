//! # topomgrd - LLDP Topology Validation and Reconciliation
//!
//! This crate implements the FabricMon topology pipeline. It discovers
//! the switch fabric's physical adjacency from per-device LLDP dumps,
//! reconciles it against the operator-declared topology, and emits a
//! per-device pass/fail port report plus a deduplicated, ID-stable
//! graph for the browser-side visualization.
//!
//! ## Responsibilities
//! - Parse per-device neighbor dumps (advertisements, port state, port
//!   speed)
//! - Parse the declared topology (`topology.dot`) into an undirected
//!   edge set
//! - Stage 1: classify every declared interface Pass / Fail / No-Info
//!   per device, plus synthetic rows for undeclared active neighbors
//! - Stage 2: build the observed link set, flag undeclared links,
//!   synthesize missing declared links, deduplicate, prune and
//!   renumber the graph
//! - Categorize devices into visualization layers and icons
//!
//! ## Inputs
//! - `<device>_lldp_result.ini`: one dump per device
//! - `assets.ini`: device inventory
//! - `topology.dot`: declared adjacency
//! - `devices.yaml`: endpoint host names and patterns
//! - `topology_config.yaml`: categorization rules
//!
//! ## Outputs
//! - `lldp_results.ini`: fixed-width validation report
//! - `topology.js`: reconciled graph as a JavaScript variable
//!
//! All inputs are optional; a missing file degrades to an empty
//! structure and the run continues with reduced information.

pub mod categorizer;
pub mod declared;
pub mod dump;
pub mod files;
pub mod inventory;
pub mod pipeline;
pub mod reconciler;
pub mod report;
pub mod validator;

pub use categorizer::{Categorizer, CategoryConfig};
pub use declared::parse_declared;
pub use dump::{normalize_port_name, parse_dump, DumpParse};
pub use inventory::{parse_assets, AssetRecord, EndpointHosts};
pub use pipeline::{run, RunSummary};
pub use reconciler::{reconcile, Reconciled};
pub use validator::validate;

//! Pipeline driver: runs one full collection-to-output cycle.
//!
//! Discovers `<device>_lldp_result.ini` dumps under the root directory,
//! loads the three optional inputs (inventory, declared topology,
//! endpoint config), runs Stage 1 validation per device, Stage 2
//! reconciliation across devices, and writes the two outputs.
//!
//! Device names are sorted before processing so the outputs are
//! reproducible regardless of directory listing order.

use crate::categorizer::Categorizer;
use crate::declared::parse_declared;
use crate::dump::{parse_dump, DumpParse};
use crate::files;
use crate::inventory::{parse_assets, AssetRecord, EndpointHosts};
use crate::reconciler::{reconcile, Reconciled};
use crate::report::{render_graph, render_report};
use crate::validator::validate;
use chrono::Local;
use fabricmon_common::{read_optional, write_buffered, FabricError, FabricResult};
use fabricmon_types::{DeclaredTopology, ValidationRow};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Counters reported after a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Devices with a dump file present.
    pub devices: usize,
    /// Final node count in the reconciled graph.
    pub nodes: usize,
    /// Final link count in the reconciled graph.
    pub links: usize,
    /// Declared edges skipped for referencing unknown devices.
    pub skipped_declared: usize,
}

/// Runs the full pipeline rooted at `root`. Returns counters for the
/// operator log; only a directory scan failure or an output write
/// failure is fatal.
pub fn run(root: &Path) -> FabricResult<RunSummary> {
    let dump_paths = discover_dumps(root)?;
    info!("Found {} device dumps under {}", dump_paths.len(), root.display());

    let inventory: Vec<AssetRecord> = read_optional(&root.join(files::ASSETS_FILE))
        .map(|text| parse_assets(&text))
        .unwrap_or_default();
    let declared: DeclaredTopology = read_optional(&root.join(files::TOPOLOGY_DOT_FILE))
        .map(|text| parse_declared(&text))
        .unwrap_or_default();
    let endpoints = read_optional(&root.join(files::DEVICES_FILE))
        .map(|text| EndpointHosts::from_yaml(&text))
        .unwrap_or_default();
    let categorizer = read_optional(&root.join(files::CATEGORY_CONFIG_FILE))
        .map(|text| Categorizer::from_yaml(&text))
        .unwrap_or_default();

    // Known device names drive remote-port prefix stripping and
    // extra-neighbor detection: inventory plus every reporting device.
    let known_devices: HashSet<String> = inventory
        .iter()
        .map(|a| a.name.clone())
        .chain(dump_paths.keys().cloned())
        .collect();

    let mut dumps: BTreeMap<String, DumpParse> = BTreeMap::new();
    for (device, path) in &dump_paths {
        let parse = match read_optional(path) {
            Some(text) => parse_dump(&text, &known_devices),
            None => {
                warn!("Dump for {} disappeared, validating with no data", device);
                DumpParse::default()
            }
        };
        dumps.insert(device.clone(), parse);
    }

    // Stage 1: per-device validation. Each device is independent.
    let mut results: BTreeMap<String, Vec<ValidationRow>> = BTreeMap::new();
    for (device, parse) in &dumps {
        results.insert(
            device.clone(),
            validate(device, parse, &declared, &known_devices),
        );
    }

    let now = Local::now();
    write_buffered(&root.join(files::REPORT_FILE), &render_report(&results, now))?;

    // Stage 2: cross-device reconciliation needs the full neighbor set.
    let reconciled: Reconciled = reconcile(&inventory, &endpoints, &dumps, &declared, &categorizer);
    write_buffered(&root.join(files::GRAPH_FILE), &render_graph(&reconciled, now)?)?;

    Ok(RunSummary {
        devices: dumps.len(),
        nodes: reconciled.nodes.len(),
        links: reconciled.links.len(),
        skipped_declared: reconciled.skipped_declared,
    })
}

/// Finds every `<device>_lldp_result.ini` under `root`, keyed by device
/// name. The map is ordered, which fixes the processing order.
fn discover_dumps(root: &Path) -> FabricResult<BTreeMap<String, PathBuf>> {
    let entries = fs::read_dir(root).map_err(|e| FabricError::scan_dir(root, e))?;

    let mut dumps = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| FabricError::scan_dir(root, e))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(device) = name.strip_suffix(files::DUMP_SUFFIX) {
            if !device.is_empty() {
                dumps.insert(device.to_string(), entry.path());
            }
        }
    }
    Ok(dumps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_dumps_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "sw2_lldp_result.ini",
            "sw1_lldp_result.ini",
            "assets.ini",
            "_lldp_result.ini",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let dumps = discover_dumps(dir.path()).unwrap();
        let devices: Vec<_> = dumps.keys().cloned().collect();
        assert_eq!(devices, vec!["sw1", "sw2"]);
    }

    #[test]
    fn test_discover_dumps_missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(discover_dumps(&missing).is_err());
    }

    #[test]
    fn test_run_with_empty_directory_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run(dir.path()).unwrap();
        assert_eq!(summary.devices, 0);
        assert_eq!(summary.nodes, 0);
        assert_eq!(summary.links, 0);
        assert!(dir.path().join(files::REPORT_FILE).exists());
        assert!(dir.path().join(files::GRAPH_FILE).exists());
    }
}

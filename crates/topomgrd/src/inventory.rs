//! Asset inventory and endpoint-host configuration parsing.
//!
//! Two inputs feed node seeding in the reconciler:
//!
//! - `assets.ini`: whitespace-delimited inventory, one header line then
//!   rows `NAME IP MAC SERIAL MODEL VERSION`. Short rows are skipped.
//! - `devices.yaml`: an `endpoint_hosts` list of exact hostnames or
//!   glob patterns containing `*`. Patterns are converted to anchored
//!   case-insensitive regexes for matching against advertised system
//!   names.

use regex::Regex;
use serde::Deserialize;
use tracing::warn;

/// One inventory row from `assets.ini`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub name: String,
    pub ip: String,
    pub mac: String,
    pub serial: String,
    pub model: String,
    pub version: String,
}

/// Parses the asset inventory. The first line is a header; rows with
/// fewer than six columns are skipped with a warning.
pub fn parse_assets(text: &str) -> Vec<AssetRecord> {
    let mut records = Vec::new();

    for line in text.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 6 {
            warn!(
                "Skipping inventory row with {} columns (need 6): {}",
                cols.len(),
                line
            );
            continue;
        }
        records.push(AssetRecord {
            name: cols[0].to_string(),
            ip: cols[1].to_string(),
            mac: cols[2].to_string(),
            serial: cols[3].to_string(),
            model: cols[4].to_string(),
            version: cols[5].to_string(),
        });
    }

    records
}

#[derive(Debug, Default, Deserialize)]
struct DevicesFile {
    #[serde(default)]
    endpoint_hosts: Vec<String>,
}

/// Endpoint hosts from `devices.yaml`, split into exact names and glob
/// patterns (anything containing `*`).
#[derive(Debug, Clone, Default)]
pub struct EndpointHosts {
    /// Exact hostnames, admitted as nodes unconditionally.
    pub exact: Vec<String>,
    /// Glob patterns, matched against observed remote system names.
    pub patterns: Vec<String>,
}

impl EndpointHosts {
    /// Parses `devices.yaml` text, degrading to empty on a YAML error.
    pub fn from_yaml(text: &str) -> Self {
        let file = match serde_yaml::from_str::<DevicesFile>(text) {
            Ok(f) => f,
            Err(e) => {
                warn!("Failed to parse endpoint host config: {}, ignoring it", e);
                DevicesFile::default()
            }
        };

        let mut hosts = Self::default();
        for entry in file.endpoint_hosts {
            if entry.contains('*') {
                hosts.patterns.push(entry);
            } else {
                hosts.exact.push(entry);
            }
        }
        hosts
    }

    /// Compiles the glob patterns to anchored case-insensitive regexes.
    /// A pattern that still fails to compile after escaping is dropped
    /// with a warning.
    pub fn compiled_patterns(&self) -> Vec<Regex> {
        self.patterns
            .iter()
            .filter_map(|glob| {
                let pattern = format!("(?i)^{}$", regex::escape(glob).replace("\\*", ".*"));
                match Regex::new(&pattern) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!("Dropping endpoint pattern '{}': {}", glob, e);
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_assets_skips_header_and_short_rows() {
        let text = "NAME IP MAC SERIAL MODEL VERSION\n\
                    sw1 10.0.0.1 44:38:39:00:00:01 MT001 MSN2700 3.7.2\n\
                    badrow 10.0.0.2\n\
                    \n\
                    sw2 10.0.0.2 44:38:39:00:00:02 MT002 MSN2700 3.7.2\n";
        let records = parse_assets(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "sw1");
        assert_eq!(records[0].model, "MSN2700");
        assert_eq!(records[1].ip, "10.0.0.2");
    }

    #[test]
    fn test_parse_assets_empty_input() {
        assert!(parse_assets("").is_empty());
        assert!(parse_assets("NAME IP MAC SERIAL MODEL VERSION\n").is_empty());
    }

    #[test]
    fn test_endpoint_hosts_split() {
        let hosts = EndpointHosts::from_yaml("endpoint_hosts:\n  - node-7\n  - compute-*\n");
        assert_eq!(hosts.exact, vec!["node-7"]);
        assert_eq!(hosts.patterns, vec!["compute-*"]);
    }

    #[test]
    fn test_endpoint_patterns_anchored_case_insensitive() {
        let hosts = EndpointHosts::from_yaml("endpoint_hosts:\n  - compute-*\n");
        let patterns = hosts.compiled_patterns();
        assert_eq!(patterns.len(), 1);
        assert!(patterns[0].is_match("compute-01"));
        assert!(patterns[0].is_match("COMPUTE-01"));
        // Anchored: the glob must cover the whole name.
        assert!(!patterns[0].is_match("my-compute-01"));
        assert!(!patterns[0].is_match("compute"));
    }

    #[test]
    fn test_endpoint_glob_metacharacters_escaped() {
        let hosts = EndpointHosts::from_yaml("endpoint_hosts:\n  - \"gpu[1].*\"\n");
        let patterns = hosts.compiled_patterns();
        assert_eq!(patterns.len(), 1);
        assert!(patterns[0].is_match("gpu[1].node"));
        assert!(!patterns[0].is_match("gpu1xnode"));
    }

    #[test]
    fn test_bad_yaml_degrades_to_empty() {
        let hosts = EndpointHosts::from_yaml("endpoint_hosts: {not a list");
        assert!(hosts.exact.is_empty());
        assert!(hosts.patterns.is_empty());
    }
}

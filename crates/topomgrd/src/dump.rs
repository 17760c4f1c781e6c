//! Neighbor-dump parser.
//!
//! Parses one raw per-device dump (`<device>_lldp_result.ini`) into:
//!
//! - one [`NeighborRecord`] per interface advertisement block,
//! - the port administrative/operational state table,
//! - the port speed table (megabits).
//!
//! Dump text is segmented into per-interface blocks by dashed separator
//! lines. The remote port identifier comes from one of two alternative
//! advertisement fields, whichever is populated: the direct `PortID`
//! field (`ifname <token>` form), or the free-text `PortDescr` field,
//! which may carry the identifier as a bare token or inside an
//! `as <token>` phrase. Comma-separated capability lists that sometimes
//! leak into `PortDescr` are never mistaken for a port name.
//!
//! Anything named `eth0` on either side is the management interface and
//! is dropped from the fabric view.

use crate::files::constants::{DOMAIN_SUFFIXES, MGMT_INTERFACE};
use crate::files::markers;
use fabricmon_types::{NeighborRecord, PortState};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Everything extracted from one device dump.
#[derive(Debug, Clone, Default)]
pub struct DumpParse {
    /// One record per usable advertisement block, in dump order.
    pub neighbors: Vec<NeighborRecord>,
    /// Port name to administrative/operational state.
    pub port_status: HashMap<String, PortState>,
    /// Port name to speed in megabits.
    pub port_speed: HashMap<String, u64>,
}

/// Parses a full device dump.
///
/// `known_devices` is used to strip device-name prefixes from advertised
/// remote port tokens (longest match, since device names may themselves
/// contain hyphens).
pub fn parse_dump(text: &str, known_devices: &HashSet<String>) -> DumpParse {
    let mut parse = DumpParse {
        neighbors: parse_neighbor_blocks(text, known_devices),
        ..Default::default()
    };
    parse_tables(text, &mut parse);
    parse
}

/// Strips the longest known device-name prefix `D-` from a raw remote
/// port token. Longest match is required: with devices `sw1` and
/// `sw1-leaf` both known, `sw1-leaf-swp5` must become `swp5`, not
/// `leaf-swp5`.
pub fn normalize_port_name(token: &str, known_devices: &HashSet<String>) -> String {
    let mut best: Option<&str> = None;
    for device in known_devices {
        if token.len() > device.len() + 1
            && token.starts_with(device.as_str())
            && token.as_bytes()[device.len()] == b'-'
            && best.map_or(true, |b| device.len() > b.len())
        {
            best = Some(device);
        }
    }
    match best {
        Some(device) => token[device.len() + 1..].to_string(),
        None => token.to_string(),
    }
}

fn is_separator(line: &str) -> bool {
    line.len() >= 10 && line.bytes().all(|b| b == b'-')
}

/// Returns the value of a `Key: value` line, if the trimmed line starts
/// with the given key.
fn field_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.trim_start()
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(str::trim)
}

fn parse_neighbor_blocks(text: &str, known_devices: &HashSet<String>) -> Vec<NeighborRecord> {
    let mut records = Vec::new();

    let mut block: Vec<&str> = Vec::new();
    for line in text.lines().chain(std::iter::once("----------")) {
        if is_separator(line.trim()) {
            if let Some(record) = parse_block(&block, known_devices) {
                records.push(record);
            }
            block.clear();
        } else {
            block.push(line);
        }
    }

    records
}

fn parse_block(lines: &[&str], known_devices: &HashSet<String>) -> Option<NeighborRecord> {
    let mut interface: Option<String> = None;
    let mut sys_name: Option<String> = None;
    let mut port_id: Option<String> = None;
    let mut port_descr: Option<String> = None;

    for line in lines {
        if let Some(v) = field_value(line, "Interface") {
            // "swp1, via: LLDP, RID: 1, ..." - the name ends at the comma.
            let name = v.split(',').next().unwrap_or("").trim();
            if !name.is_empty() {
                interface = Some(name.to_string());
            }
        } else if let Some(v) = field_value(line, "SysName") {
            if !v.is_empty() {
                sys_name = Some(strip_domain_suffix(v).to_string());
            }
        } else if let Some(v) = field_value(line, "PortID") {
            port_id = port_id_token(v).map(str::to_string);
        } else if let Some(v) = field_value(line, "PortDescr") {
            port_descr = port_descr_token(v).map(str::to_string);
        }
    }

    // A block with no usable interface or remote system name is noise
    // (chassis-only advertisements, section banners) and is skipped.
    let interface = interface?;
    let sys_name = sys_name?;

    let raw_port = port_id.or(port_descr).unwrap_or_default();
    let remote_port = normalize_port_name(&raw_port, known_devices);

    if interface == MGMT_INTERFACE || remote_port == MGMT_INTERFACE {
        debug!("Dropping management-interface advertisement on {}", interface);
        return None;
    }

    Some(NeighborRecord::new(interface, sys_name, remote_port))
}

/// Strips a known FQDN suffix from an advertised system name.
fn strip_domain_suffix(name: &str) -> &str {
    for suffix in DOMAIN_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            return stripped;
        }
    }
    name
}

/// Extracts a port token from the direct `PortID` field.
///
/// The field is usually `ifname <token>`; a `mac <addr>` value carries
/// no port name and defers to `PortDescr`.
fn port_id_token(value: &str) -> Option<&str> {
    if let Some(rest) = value.strip_prefix("ifname ") {
        let rest = rest.trim();
        (!rest.is_empty()).then_some(rest)
    } else if value.starts_with("mac ") || value.is_empty() {
        None
    } else if value.split_whitespace().count() == 1 {
        Some(value)
    } else {
        None
    }
}

/// Extracts a port token from the free-text `PortDescr` field: either
/// the token after an `as <token>` phrase, or the whole value when it is
/// a single bare token. Values containing commas are capability lists
/// leaked by some agents and never usable as a port name.
fn port_descr_token(value: &str) -> Option<&str> {
    if value.contains(',') {
        return None;
    }
    if let Some(idx) = value.rfind(" as ") {
        let token = value[idx + 4..].trim();
        return (!token.is_empty() && !token.contains(' ')).then_some(token);
    }
    (!value.is_empty() && !value.contains(' ')).then_some(value)
}

fn parse_tables(text: &str, parse: &mut DumpParse) {
    #[derive(Clone, Copy, PartialEq)]
    enum Section {
        None,
        Status,
        Speed,
    }
    let mut section = Section::None;

    for line in text.lines() {
        let line = line.trim();
        match line {
            markers::PORT_STATUS_START => section = Section::Status,
            markers::PORT_STATUS_END | markers::PORT_SPEED_END => section = Section::None,
            markers::PORT_SPEED_START => section = Section::Speed,
            _ => {
                if line.is_empty() || section == Section::None {
                    continue;
                }
                let mut parts = line.split_whitespace();
                let (Some(port), Some(value)) = (parts.next(), parts.next()) else {
                    continue;
                };
                match section {
                    Section::Status => match value.parse::<PortState>() {
                        Ok(state) => {
                            parse.port_status.insert(port.to_string(), state);
                        }
                        Err(e) => warn!("Skipping port status line '{}': {}", line, e),
                    },
                    Section::Speed => match value.parse::<u64>() {
                        Ok(mbits) => {
                            parse.port_speed.insert(port.to_string(), mbits);
                        }
                        Err(e) => warn!("Skipping port speed line '{}': {}", line, e),
                    },
                    Section::None => unreachable!(),
                }
            }
        }
    }
}

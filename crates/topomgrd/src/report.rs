//! Output rendering: the fixed-width validation report and the
//! visualization graph file.
//!
//! Both outputs are rendered fully in memory so a write failure never
//! leaves a partial file behind.

use crate::reconciler::Reconciled;
use chrono::{DateTime, Local};
use fabricmon_common::{FabricError, FabricResult};
use fabricmon_types::{DeviceNode, Link, ValidationRow};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Column widths of the validation table. The last column (Port-Status)
/// is unpadded.
const COLUMN_WIDTHS: [usize; 6] = [10, 10, 28, 16, 28, 12];

/// Banner width: the sum of the padded column widths.
const BANNER_WIDTH: usize = 10 + 10 + 28 + 16 + 28 + 12;

/// Renders the per-device validation report (`lldp_results.ini`).
///
/// Layout: a generation timestamp, then per device a `=`-centered banner
/// and a seven-column fixed-width table, one row per [`ValidationRow`].
pub fn render_report(
    results: &BTreeMap<String, Vec<ValidationRow>>,
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    for (device, rows) in results {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:=^width$}", format!(" {} ", device), width = BANNER_WIDTH);
        let _ = writeln!(
            out,
            "{}",
            format_row("Port", "Status", "Exp-Nbr", "Exp-Nbr-Port", "Act-Nbr", "Act-Nbr-Port", "Port-Status")
        );
        for row in rows {
            let _ = writeln!(
                out,
                "{}",
                format_row(
                    &row.port,
                    &row.verdict.to_string(),
                    &row.expected_neighbor,
                    &row.expected_neighbor_port,
                    &row.actual_neighbor,
                    &row.actual_neighbor_port,
                    &row.port_oper_state,
                )
            );
        }
    }

    out
}

fn format_row(
    port: &str,
    status: &str,
    exp_nbr: &str,
    exp_port: &str,
    act_nbr: &str,
    act_port: &str,
    oper: &str,
) -> String {
    format!(
        "{:<w0$}{:<w1$}{:<w2$}{:<w3$}{:<w4$}{:<w5$}{}",
        port,
        status,
        exp_nbr,
        exp_port,
        act_nbr,
        act_port,
        oper,
        w0 = COLUMN_WIDTHS[0],
        w1 = COLUMN_WIDTHS[1],
        w2 = COLUMN_WIDTHS[2],
        w3 = COLUMN_WIDTHS[3],
        w4 = COLUMN_WIDTHS[4],
        w5 = COLUMN_WIDTHS[5],
    )
}

#[derive(Serialize)]
struct TopologyData<'a> {
    links: &'a [Link],
    nodes: &'a [DeviceNode],
    timestamp: String,
}

/// Renders the reconciled graph as a JavaScript variable assignment
/// (`topology.js`) for direct inclusion by the browser-side
/// visualization.
pub fn render_graph(reconciled: &Reconciled, generated_at: DateTime<Local>) -> FabricResult<String> {
    let data = TopologyData {
        links: &reconciled.links,
        nodes: &reconciled.nodes,
        timestamp: generated_at.format("%Y-%m-%d %H:%M").to_string(),
    };
    let json = serde_json::to_string(&data)
        .map_err(|e| FabricError::internal(format!("graph serialization failed: {}", e)))?;
    Ok(format!("var topologyData = {};", json))
}

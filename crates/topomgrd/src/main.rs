//! topomgrd - LLDP Topology Validation and Reconciliation Daemon
//!
//! Entry point for the topomgrd batch pipeline. Invoked periodically by
//! an external scheduler; one invocation performs one full run.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use fabricmon_topomgrd::pipeline;

/// LLDP topology validation and reconciliation pipeline
#[derive(Debug, Parser)]
#[command(name = "topomgrd", version, about)]
struct Cli {
    /// Root directory containing the collected dumps, configuration
    /// files, and outputs
    #[arg(default_value = ".")]
    root: PathBuf,
}

/// Initializes tracing/logging subsystem
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    info!("--- Starting topomgrd (root: {}) ---", cli.root.display());

    match pipeline::run(&cli.root) {
        Ok(summary) => {
            info!(
                "Run complete: {} devices validated, {} nodes, {} links, {} declared edges skipped",
                summary.devices, summary.nodes, summary.links, summary.skipped_declared
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("topomgrd run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! Best-effort input loading and buffered output writing.

use crate::error::{FabricError, FabricResult};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reads a file fully into memory, degrading to `None` if it is missing
/// or unreadable.
///
/// Inputs to the pipeline are optional by contract: a missing inventory,
/// declared topology, or endpoint config reduces the information in the
/// outputs but never aborts the run. Absence is logged at debug, any
/// other IO failure at warn.
pub fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Input file {} not present, continuing without it", path.display());
            None
        }
        Err(e) => {
            warn!("Failed to read {}: {}, continuing without it", path.display(), e);
            None
        }
    }
}

/// Writes a fully rendered buffer to `path`.
///
/// Callers must render the complete output in memory before calling, so
/// a write failure cannot leave a half-written report behind. The write
/// goes to a sibling temp file first and is renamed into place.
pub fn write_buffered(path: &Path, contents: &str) -> FabricResult<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).map_err(|e| FabricError::output_write(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| FabricError::output_write(path, e))?;
    Ok(())
}

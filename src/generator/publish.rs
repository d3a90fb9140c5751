//! Copying the scanner's manifest out of the workspace.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Copy `<workspace>/<manifest_name>` to `destination`, overwriting it.
///
/// Returns `Ok(None)` when the scanner left no manifest behind; the
/// destination is then not touched. Relative destinations resolve against
/// the process working directory.
pub fn publish_manifest(
    workspace: &Path,
    manifest_name: &str,
    destination: &Path,
) -> Result<Option<u64>> {
    let generated = workspace.join(manifest_name);
    if !generated.is_file() {
        tracing::warn!("Scanner produced no {} in {}", manifest_name, workspace.display());
        return Ok(None);
    }

    let bytes = fs::copy(&generated, destination)?;
    tracing::debug!(
        "Copied {} ({} bytes) to {}",
        generated.display(),
        bytes,
        destination.display()
    );
    Ok(Some(bytes))
}

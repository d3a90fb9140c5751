//! Run-scoped scratch directory.

use std::path::Path;
use tempfile::TempDir;

use crate::error::Result;

/// Prefix of every workspace directory name.
pub const WORKSPACE_PREFIX: &str = "nbreqs-";

/// A uniquely named, empty temporary directory owned by one run.
///
/// The directory and everything in it is removed when the value is
/// dropped, which covers early returns and `?` error paths.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a workspace under the system temporary directory.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()?;
        tracing::debug!("Temporary workspace created at {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Create a workspace under `parent`.
    pub fn create_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(parent)?;
        tracing::debug!("Temporary workspace created at {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Path of the workspace directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace now, reporting removal errors.
    ///
    /// Dropping the workspace does the same but ignores errors.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!("Removed workspace {}", path.display());
        Ok(())
    }
}

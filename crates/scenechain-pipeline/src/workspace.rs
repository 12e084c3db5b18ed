//! Run-scoped temporary workspaces.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use scenechain_models::RunId;

/// A temporary directory owned by exactly one pipeline run.
///
/// Acquiring the workspace creates the directory; dropping it removes the
/// directory recursively. Removal is best-effort: failures are logged and
/// never escalated, so cleanup can never mask the error that ended a run.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Create the workspace directory for a run. Idempotent.
    pub async fn acquire(root: impl AsRef<Path>, run_id: &RunId) -> std::io::Result<Self> {
        let dir = root.as_ref().join(run_id.as_str());
        fs::create_dir_all(&dir).await?;
        debug!(workspace = %dir.display(), "Workspace acquired");
        Ok(Self { dir })
    }

    /// Path of the workspace directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Path of a file inside the workspace.
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.join(name)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => debug!(workspace = %self.dir.display(), "Workspace removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                workspace = %self.dir.display(),
                error = %e,
                "Failed to remove workspace"
            ),
        }
    }
}

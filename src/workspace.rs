//! Local workspace
//!
//! Project-local storage (`.shipway/`) for generated and downloaded
//! artifacts, plus scratch staging directories that are removed on drop
//! whether or not the operation succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::ShipwayResult;

/// Name of the project-local storage directory.
pub const PROJECT_DIR: &str = ".shipway";

/// Local filesystem scope of a single invocation.
pub struct Workspace {
    project_dir: PathBuf,
}

impl Workspace {
    /// Workspace rooted at `<project_root>/.shipway`.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_dir: project_root.join(PROJECT_DIR),
        }
    }

    /// Project-local storage directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Directory holding local vhost artifacts, one per environment.
    pub fn vhost_dir(&self) -> PathBuf {
        self.project_dir.join("apache")
    }

    /// Ensure the vhost directory exists and return it.
    pub fn ensure_vhost_dir(&self) -> ShipwayResult<PathBuf> {
        let dir = self.vhost_dir();
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Create a scratch directory, removed when the returned guard drops.
    pub fn staging(&self) -> ShipwayResult<TempDir> {
        Ok(TempDir::new()?)
    }
}

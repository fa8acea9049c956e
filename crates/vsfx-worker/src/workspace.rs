//! Scoped per-run workspace.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

/// Temporary directory owning every intermediate file of one run.
///
/// Removed by [`Workspace::close`] at the end of the run, or on drop if the
/// run future is abandoned.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace under `parent` (created if missing).
    pub fn create(parent: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(parent)?;
        let dir = tempfile::Builder::new().prefix("vsfx-").tempdir_in(parent)?;
        debug!("Workspace created: {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Delete the workspace and everything in it.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!("Workspace removed: {}", path.display()),
            Err(e) => warn!("Failed to remove workspace {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_removes_contents() {
        let parent = TempDir::new().unwrap();
        let ws = Workspace::create(parent.path()).unwrap();
        let file = ws.file("cut_video.mp4");
        std::fs::write(&file, b"data").unwrap();
        let root = ws.path().to_path_buf();

        ws.close();

        assert!(!file.exists());
        assert!(!root.exists());
    }

    #[test]
    fn test_drop_removes_contents() {
        let parent = TempDir::new().unwrap();
        let root = {
            let ws = Workspace::create(&parent.path().join("nested")).unwrap();
            std::fs::write(ws.file("frame.png"), b"png").unwrap();
            ws.path().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn test_workspaces_are_isolated() {
        let parent = TempDir::new().unwrap();
        let a = Workspace::create(parent.path()).unwrap();
        let b = Workspace::create(parent.path()).unwrap();
        assert_ne!(a.path(), b.path());
    }
}

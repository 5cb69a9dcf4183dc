use std::path::{Path, PathBuf};

/// Removes a directory tree when dropped, unless disarmed first.
///
/// Used around operations that create a directory and must not leave it
/// behind on an early return or panic.
#[derive(Debug)]
pub struct CleanupGuard {
    path: PathBuf,
    armed: bool,
}

impl CleanupGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    /// A guard that never removes anything; convenient when cleanup is
    /// conditional on state discovered at runtime.
    pub fn inert(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Keep the directory.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Remove the directory now and disarm.
    pub fn cleanup(&mut self) -> crate::Result<()> {
        if !self.armed {
            return Ok(());
        }
        self.armed = false;
        crate::remove_dir_all_if_exists(&self.path)?;
        Ok(())
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            tracing::warn!("cleanup of {} failed: {e}", self.path.display());
        }
    }
}

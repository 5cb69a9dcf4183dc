use crate::error::{Error, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

fn paths_equal(p1: &Path, p2: &Path) -> bool {
    fn normalize(p: &Path) -> String {
        let s = p.to_string_lossy();
        let trimmed = s.trim_end_matches(['/', '\\']);
        #[cfg(target_os = "windows")]
        {
            trimmed.to_lowercase()
        }
        #[cfg(not(target_os = "windows"))]
        {
            trimmed.to_string()
        }
    }
    normalize(p1) == normalize(p2)
}

/// An editable search path.
#[derive(Debug, Clone, Default)]
pub struct PathModifier {
    paths: Vec<PathBuf>,
}

impl PathModifier {
    /// Start from an explicit `PATH`-style value.
    pub fn from_os(value: &OsStr) -> Self {
        Self {
            paths: env::split_paths(value).collect(),
        }
    }

    pub fn prepend(mut self, path: PathBuf) -> Self {
        self.paths.retain(|p| !paths_equal(p, &path));
        self.paths.insert(0, path);
        self
    }

    pub fn remove(mut self, path: &Path) -> Self {
        self.paths.retain(|p| !paths_equal(p, path));
        self
    }

    pub fn build(self) -> Result<OsString> {
        env::join_paths(&self.paths)
            .map_err(|_| Error::InvalidPath(format!("{:?}", self.paths)))
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

/// Split a `PATH`-style list, dropping empty entries.
pub fn split_path_list(value: &OsStr) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Find `command` on `search_path`.
pub fn find_executable(command: &str, search_path: &PathModifier) -> Result<PathBuf> {
    let path = search_path.clone().build()?;
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    which::which_in(command, Some(path), cwd).map_err(|_| Error::CommandNotFound {
        cmd: command.to_string(),
    })
}

/// Find `command` on `search_path`, skipping `exclude`.
///
/// Used to reach the unmanaged runtime behind the shims directory.
pub fn find_executable_excluding(
    command: &str,
    search_path: &PathModifier,
    exclude: &Path,
) -> Result<PathBuf> {
    let found = find_executable(command, &search_path.clone().remove(exclude))?;
    tracing::debug!("found {command} outside {}: {}", exclude.display(), found.display());
    Ok(found)
}

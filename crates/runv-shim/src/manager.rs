use crate::{Result, script};
use runv_core::{Config, VersionStore};
use runv_fs::{AtomicWriteOptions, atomic_write, list_dir_names};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What a rehash changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RehashReport {
    /// Every shim present after the rehash.
    pub shims: Vec<String>,
    /// Shims deleted because no installed version provides them anymore.
    pub removed: Vec<String>,
}

/// Owns `<root>/shims`.
///
/// Each shim is written to a hidden temp file and renamed into place, so
/// concurrent readers never see a partial shim. New shims are written before
/// stale ones are removed: a rehash interrupted part-way leaves extra shims
/// (which fail with "command not found") but never drops one still needed.
/// Concurrent rehashes from different processes each recompute the full set,
/// so the last one to finish wins.
pub struct ShimManager<'a> {
    store: &'a VersionStore,
    shims_dir: PathBuf,
    root: PathBuf,
    exe: PathBuf,
}

impl<'a> ShimManager<'a> {
    /// `exe` is the `runv` binary the shims re-enter.
    pub fn new(config: &Config, store: &'a VersionStore, exe: impl Into<PathBuf>) -> Self {
        Self {
            store,
            shims_dir: config.shims_dir(),
            root: config.root.clone(),
            exe: exe.into(),
        }
    }

    pub fn shims_dir(&self) -> &Path { &self.shims_dir }

    /// Distinct executable names across all installed versions' `bin`.
    pub fn wanted(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for version in self.store.list()? {
            let bin = self.store.bin_root(&version);
            for name in list_dir_names(&bin)? {
                if !bin.join(&name).is_dir() {
                    names.insert(name);
                }
            }
        }
        Ok(names)
    }

    /// Shims currently on disk, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = list_dir_names(&self.shims_dir)?;
        names.sort();
        Ok(names)
    }

    pub fn rehash(&self) -> Result<RehashReport> {
        std::fs::create_dir_all(&self.shims_dir).map_err(|e| crate::Error::Io {
            path: self.shims_dir.clone(),
            source: e,
        })?;

        let wanted = self.wanted()?;
        let body = script::render(&self.exe, &self.root);
        let options = AtomicWriteOptions::new().permissions(0o755);

        for name in &wanted {
            atomic_write(self.shims_dir.join(name), body.as_bytes(), options)?;
        }

        let mut removed = Vec::new();
        for name in self.list()? {
            if wanted.contains(&name) {
                continue;
            }
            let path = self.shims_dir.join(&name);
            match std::fs::remove_file(&path) {
                Ok(()) => removed.push(name),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(crate::Error::Io { path, source: e }),
            }
        }

        tracing::info!("rehashed {} shims, removed {}", wanted.len(), removed.len());
        Ok(RehashReport {
            shims: wanted.into_iter().collect(),
            removed,
        })
    }
}

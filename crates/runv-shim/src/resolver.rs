//! Target resolver abstraction.
//!
//! A resolver maps a command name to an absolute binary path, or declines.
//! Resolvers compose: [`ChainResolver`] asks each in order.

use runv_core::{VersionName, VersionStore};
use runv_platform::env::{PathModifier, find_executable_excluding};
use std::path::{Path, PathBuf};

pub trait TargetResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf>;

    /// Name reported when resolution fails.
    fn label(&self) -> String;
}

/// One installed version: `bin/<command>` under its prefix.
pub struct VersionTarget<'a> {
    store: &'a VersionStore,
    version: VersionName,
}

impl<'a> VersionTarget<'a> {
    pub fn new(store: &'a VersionStore, version: VersionName) -> Self {
        Self { store, version }
    }

    pub fn version(&self) -> &VersionName { &self.version }
}

impl TargetResolver for VersionTarget<'_> {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        self.store.command_path(&self.version, command)
    }

    fn label(&self) -> String { self.version.to_string() }
}

/// The unmanaged runtime: the search path with the shims directory removed,
/// so a shim can never resolve to itself.
pub struct SystemTarget<'a> {
    search_path: PathModifier,
    shims_dir: &'a Path,
}

impl<'a> SystemTarget<'a> {
    pub fn new(search_path: PathModifier, shims_dir: &'a Path) -> Self {
        Self {
            search_path,
            shims_dir,
        }
    }
}

impl TargetResolver for SystemTarget<'_> {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        find_executable_excluding(command, &self.search_path, self.shims_dir).ok()
    }

    fn label(&self) -> String { runv_core::SYSTEM.to_string() }
}

/// Resolvers tried in order; the first hit wins.
#[derive(Default)]
pub struct ChainResolver<'a> {
    links: Vec<Box<dyn TargetResolver + 'a>>,
}

impl<'a> ChainResolver<'a> {
    pub fn new() -> Self { Self { links: Vec::new() } }

    pub fn push<R: TargetResolver + 'a>(mut self, resolver: R) -> Self {
        self.links.push(Box::new(resolver));
        self
    }

    /// Index of the winning resolver and the path it produced.
    pub fn resolve_indexed(&self, command: &str) -> Option<(usize, PathBuf)> {
        self.links
            .iter()
            .enumerate()
            .find_map(|(i, link)| link.resolve(command).map(|path| (i, path)))
    }

    pub fn labels(&self) -> Vec<String> { self.links.iter().map(|l| l.label()).collect() }
}

impl TargetResolver for ChainResolver<'_> {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        self.resolve_indexed(command).map(|(_, path)| path)
    }

    fn label(&self) -> String { self.labels().join(", ") }
}

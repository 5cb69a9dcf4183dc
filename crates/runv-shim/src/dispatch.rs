use crate::resolver::{ChainResolver, SystemTarget, VersionTarget};
use crate::{Error, Result};
use runv_core::{Config, VersionName, VersionRequest, VersionResolver, VersionStore};
use runv_platform::env::PathModifier;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

/// A resolved command: which binary, from which version, with which `PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub command: String,
    pub version: VersionName,
    pub path: PathBuf,
    /// `PATH` for the child. A managed version's `bin` goes first so helper
    /// commands it spawns come from the same version.
    pub search_path: OsString,
}

impl Dispatch {
    pub fn into_command<I, S>(self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.path);
        cmd.args(args).env("PATH", &self.search_path);
        cmd
    }
}

pub struct Dispatcher<'a> {
    config: &'a Config,
    store: &'a VersionStore,
    shims_dir: PathBuf,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a Config, store: &'a VersionStore) -> Self {
        Self {
            config,
            store,
            shims_dir: config.shims_dir(),
        }
    }

    /// Resolve the request for this context and locate `command`.
    pub fn locate(&self, command: &str) -> Result<Dispatch> {
        let request = VersionResolver::new(self.config).resolve()?;
        self.locate_in(command, &request)
    }

    /// Locate `command` by trying each candidate of `request` in order.
    ///
    /// `system` candidates search the `PATH` minus the shims directory.
    pub fn locate_in(&self, command: &str, request: &VersionRequest) -> Result<Dispatch> {
        if command.is_empty() || command.contains(['/', '\\']) {
            return Err(Error::InvalidCommand(command.to_string()));
        }

        let search_path = PathModifier::from_os(&self.config.search_path);
        let chain = request.versions.iter().fold(ChainResolver::new(), |chain, version| {
            if version.is_system() {
                chain.push(SystemTarget::new(search_path.clone(), &self.shims_dir))
            } else {
                chain.push(VersionTarget::new(self.store, version.clone()))
            }
        });

        let Some((index, path)) = chain.resolve_indexed(command) else {
            let providers = self
                .store
                .versions_providing(command)?
                .into_iter()
                .map(VersionName::into_string)
                .collect();
            return Err(Error::NotFound {
                command: command.to_string(),
                tried: chain.labels(),
                providers,
            });
        };

        let version = request.versions[index].clone();
        let child_path = if version.is_system() {
            search_path
        } else {
            search_path.prepend(self.store.bin_root(&version))
        };

        tracing::debug!("dispatching {command} to {} ({version})", path.display());
        Ok(Dispatch {
            command: command.to_string(),
            version,
            path,
            search_path: child_path.build()?,
        })
    }
}

//! Command handlers. Each returns the process exit status; `Err` means
//! status `1` with the error printed.

use crate::cli::Commands;
use anyhow::{Context, Result};
use runv_core::{Config, VersionStore};
use runv_shim::ShimManager;
use std::path::PathBuf;

mod exec;
mod install;
mod select;
mod shims;

/// Everything a command needs, built once per process.
pub struct Session {
    pub config: Config,
    pub store: VersionStore,
    /// This executable; shims re-enter it.
    pub exe: PathBuf,
}

impl Session {
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env().context("cannot read configuration")?;
        let exe = std::env::current_exe().context("cannot locate the runv executable")?;
        Ok(Self::new(config, exe))
    }

    pub fn new(config: Config, exe: PathBuf) -> Self {
        let store = VersionStore::new(&config);
        Self { config, store, exe }
    }

    pub fn shims(&self) -> ShimManager<'_> { ShimManager::new(&self.config, &self.store, &self.exe) }
}

pub fn run(cmd: Commands) -> Result<i32> {
    match cmd {
        // Needs no configuration, so it works even without a home directory.
        Commands::Completions { shell } => shims::completions(shell),
        cmd => {
            let session = Session::from_env()?;
            if let Err(e) = crate::logging::init(session.config.debug) {
                eprintln!("runv: logging disabled: {e}");
            }
            dispatch(&session, cmd)
        }
    }
}

fn dispatch(session: &Session, cmd: Commands) -> Result<i32> {
    match cmd {
        Commands::Install(args) => install::install(session, args),
        Commands::Uninstall(args) => install::uninstall(session, args),
        Commands::Global { versions } => select::global(session, &versions),
        Commands::Local { versions, unset } => select::local(session, &versions, unset),
        Commands::Version => select::version(session),
        Commands::VersionName => select::version_name(session),
        Commands::Versions { bare } => select::versions(session, bare),
        Commands::Prefix { versions } => select::prefix(session, &versions),
        Commands::Root => select::root(session),
        Commands::Which { command } => exec::which(session, &command),
        Commands::Whence { path, command } => exec::whence(session, &command, path),
        Commands::Exec { command, args } => exec::exec(session, &command, &args),
        Commands::Rehash => shims::rehash(session),
        Commands::Shims { short } => shims::list(session, short),
        Commands::Completions { shell } => shims::completions(shell),
    }
}

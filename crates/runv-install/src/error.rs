use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("hook {hook} exited with status {status}")]
    Failed { hook: String, status: i32 },

    #[error("hook {hook} could not be started: {source}")]
    Spawn {
        hook: String,
        #[source]
        source: std::io::Error,
    },

    #[error("hook {hook} failed: {message}")]
    Other { hook: String, message: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("version `{0}' not installed")]
    NotInstalled(String),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error("invalid hook file {path}: {source}")]
    HookFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to run builder {program}: {source}")]
    Builder {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Version(#[from] runv_version::VersionError),

    #[error(transparent)]
    Core(#[from] runv_core::Error),

    #[error(transparent)]
    Shim(#[from] runv_shim::Error),

    #[error(transparent)]
    Fs(#[from] runv_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

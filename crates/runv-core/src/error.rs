use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("version `{0}' not installed")]
    NotInstalled(String),

    #[error("no local version configured for this directory")]
    NoLocalVersion,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error(transparent)]
    Version(#[from] runv_version::VersionError),

    #[error(transparent)]
    Fs(#[from] runv_fs::Error),

    #[error(transparent)]
    Platform(#[from] runv_platform::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for shim operations.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("`{command}' command not found for any configured version (tried: {})", .tried.join(", "))]
    NotFound {
        command: String,
        tried: Vec<String>,
        /// Installed versions that do provide the command.
        providers: Vec<String>,
    },

    #[error("invalid command name '{0}'")]
    InvalidCommand(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] runv_core::Error),

    #[error(transparent)]
    Fs(#[from] runv_fs::Error),

    #[error(transparent)]
    Platform(#[from] runv_platform::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

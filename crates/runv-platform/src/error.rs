use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("home directory could not be determined")]
    NoHome,

    #[error("PATH entry contains a separator character: {0}")]
    InvalidPath(String),

    #[error("command not found: {cmd}")]
    CommandNotFound { cmd: String },
}

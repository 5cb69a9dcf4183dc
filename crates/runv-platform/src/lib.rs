pub use error::{Error, Result};

pub mod dir;
pub mod env;
mod error;

//! Configuration, the installed-version store and version resolution.
//!
//! ```text
//! <root>/
//!   version            global marker (also read: global, default)
//!   versions/<name>/   one prefix per installed version
//!   shims/<command>    generated dispatch shims
//!   plugins/<plugin>/  hook-contributing plugins
//! ```

pub use config::{Config, GLOBAL_MARKERS, LOCAL_MARKER};
pub use error::{Error, Result};
pub use marker::{read_marker, unset_local, write_global, write_local};
pub use resolver::{VersionOrigin, VersionRequest, VersionResolver};
pub use runv_version::{SYSTEM, VersionName};
pub use store::VersionStore;

mod config;
mod error;
mod marker;
mod resolver;
mod store;

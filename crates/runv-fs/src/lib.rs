//! Filesystem primitives shared by the runv crates.
//!
//! Everything that readers may observe concurrently (shims, marker files) is
//! written through [`atomic_write`]: content lands in a uniquely named
//! sibling temp file and is renamed over the destination, so a reader sees
//! either the old file or the new one, never a partial write.

mod error;
mod guard;
mod primitives;

pub use error::{Error, Result};
pub use guard::CleanupGuard;
pub use primitives::{
    AtomicWriteOptions, atomic_write, is_executable, list_dir_names,
    make_executable, remove_dir_all_if_exists,
};

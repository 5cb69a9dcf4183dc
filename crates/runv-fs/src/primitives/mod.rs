pub mod atomic_write;
pub mod permissions;
pub mod remove;

pub use atomic_write::{AtomicWriteOptions, atomic_write};
pub use permissions::{is_executable, make_executable};
pub use remove::{list_dir_names, remove_dir_all_if_exists};

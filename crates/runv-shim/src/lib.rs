//! Shims and dispatch.
//!
//! # Architecture
//!
//! A shim is a tiny script named after a command. It knows nothing about
//! versions: it re-enters `runv exec <command>`, and [`Dispatcher`] decides
//! which binary runs. [`ShimManager::rehash`] keeps one shim per executable
//! name found across every installed version.
//!
//! Resolution policy is expressed through [`TargetResolver`]: each candidate
//! version of a request becomes one resolver, and the first one that can
//! produce the command wins.

pub use dispatch::{Dispatch, Dispatcher};
pub use error::{Error, Result};
pub use manager::{RehashReport, ShimManager};
pub use resolver::{ChainResolver, SystemTarget, TargetResolver, VersionTarget};

mod dispatch;
mod error;
mod manager;
mod resolver;
mod script;

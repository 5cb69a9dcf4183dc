//! Version names and ordering.
//!
//! A version name is whatever directory name a version was installed under
//! (`3.12.1`, `0.19.1`, `pypy3.10-7.3.15`, `nightly`). Names are ordered
//! version-aware rather than lexically: digit runs compare as numbers, so `10`
//! sorts after `9`, and pre-release tails sort before the release.

pub use self::marker::parse_marker;
pub use self::name::{SYSTEM, VersionError, VersionName, compare_versions, derive_version_name};

mod marker;
mod name;

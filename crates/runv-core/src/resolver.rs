//! Version request resolution.
//!
//! Sources, highest precedence first:
//!
//! 1. `RUNV_VERSION`
//! 2. the nearest `.runv-version`, walking up from the start directory
//! 3. the global marker (`version`, then `global`, then `default`)
//! 4. `system`
//!
//! The winning source supplies the whole list; sources never merge.

use crate::{Config, Result, marker::read_marker};
use runv_version::VersionName;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOrigin {
    Environment,
    LocalFile(PathBuf),
    GlobalFile(PathBuf),
    Default,
}

impl fmt::Display for VersionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOrigin::Environment => f.write_str("RUNV_VERSION environment variable"),
            VersionOrigin::LocalFile(path) | VersionOrigin::GlobalFile(path) => {
                write!(f, "{}", path.display())
            }
            VersionOrigin::Default => f.write_str("default"),
        }
    }
}

/// Ordered candidate versions and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequest {
    pub versions: Vec<VersionName>,
    pub origin: VersionOrigin,
}

impl VersionRequest {
    pub fn system() -> Self {
        Self {
            versions: vec![VersionName::system()],
            origin: VersionOrigin::Default,
        }
    }

    /// Whether the request is exactly the unmanaged runtime.
    pub fn is_system(&self) -> bool {
        matches!(self.versions.as_slice(), [only] if only.is_system())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.versions.iter().map(VersionName::as_str)
    }
}

pub struct VersionResolver<'a> {
    config: &'a Config,
}

impl<'a> VersionResolver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn resolve(&self) -> Result<VersionRequest> {
        let request = match self.from_environment() {
            Some(request) => request,
            None => match self.local()? {
                Some(request) => request,
                None => self.global()?.unwrap_or_else(VersionRequest::system),
            },
        };
        tracing::debug!(
            "resolved [{}] from {}",
            request.names().collect::<Vec<_>>().join(", "),
            request.origin
        );
        Ok(request)
    }

    fn from_environment(&self) -> Option<VersionRequest> {
        let raw = self.config.version_override.as_ref()?;
        let versions: Vec<VersionName> = raw
            .iter()
            .filter_map(|v| match VersionName::new(v.as_str()) {
                Ok(name) => Some(name),
                Err(e) => {
                    tracing::warn!("ignoring RUNV_VERSION entry: {e}");
                    None
                }
            })
            .collect();
        (!versions.is_empty()).then_some(VersionRequest {
            versions,
            origin: VersionOrigin::Environment,
        })
    }

    /// The nearest non-empty local marker at or above the start directory.
    pub fn local(&self) -> Result<Option<VersionRequest>> {
        for dir in self.config.dir.ancestors() {
            let path = Config::local_marker_in(dir);
            if let Some(versions) = read_marker(&path)? {
                return Ok(Some(VersionRequest {
                    versions,
                    origin: VersionOrigin::LocalFile(path),
                }));
            }
        }
        Ok(None)
    }

    /// The first non-empty global marker.
    pub fn global(&self) -> Result<Option<VersionRequest>> {
        for path in self.config.global_markers() {
            if let Some(versions) = read_marker(&path)? {
                return Ok(Some(VersionRequest {
                    versions,
                    origin: VersionOrigin::GlobalFile(path),
                }));
            }
        }
        Ok(None)
    }
}

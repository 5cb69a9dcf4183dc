use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Per-directory marker file name.
pub const LOCAL_MARKER: &str = ".runv-version";

/// Global marker file names under the root, in read order. Only the first
/// is ever written; the others are honored for older layouts.
pub const GLOBAL_MARKERS: [&str; 3] = ["version", "global", "default"];

const DEFAULT_BUILDER: &str = "runv-build";

/// Process-wide settings, read once at startup and passed to every component.
#[derive(Debug, Clone)]
pub struct Config {
    /// Installation root (`RUNV_ROOT`).
    pub root: PathBuf,
    /// Where the local marker search starts (`RUNV_DIR`, else the cwd).
    pub dir: PathBuf,
    /// Trace shims and builder invocations (`RUNV_DEBUG`).
    pub debug: bool,
    /// Versions forced for this process (`RUNV_VERSION`, `:`-separated).
    pub version_override: Option<Vec<String>>,
    /// Keep build trees under this directory (`RUNV_BUILD_ROOT`).
    pub build_root: Option<PathBuf>,
    /// Source download cache handed to the builder.
    pub cache_path: Option<PathBuf>,
    /// Extra hook roots searched before plugins (`RUNV_HOOK_PATH`).
    pub hook_path: Vec<PathBuf>,
    /// External builder program (`RUNV_BUILDER`).
    pub builder: OsString,
    /// Search path used to locate the unmanaged runtime (`PATH`).
    pub search_path: OsString,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
        Self::from_lookup(|key| std::env::var_os(key), cwd)
    }

    /// Build a config from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F, cwd: PathBuf) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let absolute = |p: OsString| {
            let p = PathBuf::from(p);
            if p.is_absolute() { p } else { cwd.join(p) }
        };

        let root = match var("RUNV_ROOT") {
            Some(root) => absolute(root),
            None => runv_platform::dir::default_root()?,
        };

        let dir = var("RUNV_DIR").map(absolute).unwrap_or_else(|| cwd.clone());

        let version_override = var("RUNV_VERSION").and_then(|v| {
            let versions: Vec<String> = v
                .to_string_lossy()
                .split(':')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
            (!versions.is_empty()).then_some(versions)
        });

        let cache_path = var("RUNV_BUILD_CACHE_PATH").map(absolute).or_else(|| {
            let default = root.join("cache");
            default.is_dir().then_some(default)
        });

        let hook_path = var("RUNV_HOOK_PATH")
            .map(|v| runv_platform::env::split_path_list(&v))
            .unwrap_or_default();

        Ok(Self {
            dir,
            debug: var("RUNV_DEBUG").is_some(),
            version_override,
            build_root: var("RUNV_BUILD_ROOT").map(absolute),
            cache_path,
            hook_path,
            builder: var("RUNV_BUILDER").unwrap_or_else(|| OsString::from(DEFAULT_BUILDER)),
            search_path: var("PATH").unwrap_or_default(),
            root,
        })
    }

    /// A config rooted at `root` with nothing else set.
    pub fn with_root(root: impl Into<PathBuf>, dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dir: dir.into(),
            debug: false,
            version_override: None,
            build_root: None,
            cache_path: None,
            hook_path: Vec::new(),
            builder: OsString::from(DEFAULT_BUILDER),
            search_path: OsString::new(),
        }
    }

    pub fn versions_dir(&self) -> PathBuf { self.root.join("versions") }

    pub fn shims_dir(&self) -> PathBuf { self.root.join("shims") }

    pub fn plugins_dir(&self) -> PathBuf { self.root.join("plugins") }

    pub fn global_marker(&self) -> PathBuf { self.root.join(GLOBAL_MARKERS[0]) }

    pub fn global_markers(&self) -> impl Iterator<Item = PathBuf> + '_ {
        GLOBAL_MARKERS.iter().map(|name| self.root.join(name))
    }

    pub fn local_marker_in(dir: &Path) -> PathBuf { dir.join(LOCAL_MARKER) }
}

//! Reading and writing marker files.

use crate::{Config, Error, Result};
use runv_fs::{AtomicWriteOptions, atomic_write};
use runv_version::{VersionName, parse_marker};
use std::path::Path;

/// Versions named by the marker at `path`.
///
/// `None` when the file is missing or names nothing (blank or whitespace
/// only), so callers can fall through to the next source.
pub fn read_marker(path: &Path) -> Result<Option<Vec<VersionName>>> {
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = std::fs::read(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let contents = String::from_utf8_lossy(&bytes);

    let versions: Vec<VersionName> = parse_marker(&contents)
        .into_iter()
        .filter(|word| {
            let valid = !word.contains(char::REPLACEMENT_CHARACTER);
            if !valid {
                tracing::warn!("ignoring non UTF-8 entry in {}", path.display());
            }
            valid
        })
        .filter_map(|word| VersionName::new(word).ok())
        .collect();
    Ok((!versions.is_empty()).then_some(versions))
}

fn render(versions: &[VersionName]) -> String {
    versions.iter().map(|v| format!("{v}\n")).collect()
}

/// Write the primary global marker.
pub fn write_global(config: &Config, versions: &[VersionName]) -> Result<()> {
    std::fs::create_dir_all(&config.root).map_err(|e| Error::Io {
        path: config.root.clone(),
        source: e,
    })?;
    atomic_write(config.global_marker(), render(versions).as_bytes(), AtomicWriteOptions::new().sync(true))?;
    Ok(())
}

/// Write the local marker in `dir`.
pub fn write_local(dir: &Path, versions: &[VersionName]) -> Result<()> {
    atomic_write(Config::local_marker_in(dir), render(versions).as_bytes(), AtomicWriteOptions::new().sync(true))?;
    Ok(())
}

/// Remove the local marker in `dir`; returns whether one existed.
pub fn unset_local(dir: &Path) -> Result<bool> {
    let path = Config::local_marker_in(dir);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Io { path, source: e }),
    }
}

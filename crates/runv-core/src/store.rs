use crate::{Config, Error, Result};
use runv_version::VersionName;
use std::path::{Path, PathBuf};

/// Installed versions under `<root>/versions`.
///
/// Read-only: installs and uninstalls create and delete prefixes directly.
#[derive(Debug, Clone)]
pub struct VersionStore {
    versions_dir: PathBuf,
}

impl VersionStore {
    pub fn new(config: &Config) -> Self {
        Self::at(config.versions_dir())
    }

    pub fn at(versions_dir: impl Into<PathBuf>) -> Self {
        Self {
            versions_dir: versions_dir.into(),
        }
    }

    pub fn versions_dir(&self) -> &Path { &self.versions_dir }

    /// Installed version names in version order; empty when the versions
    /// directory does not exist.
    pub fn list(&self) -> Result<Vec<VersionName>> {
        let names = runv_fs::list_dir_names(&self.versions_dir)?;
        let mut versions: Vec<VersionName> = names
            .into_iter()
            .filter(|name| self.versions_dir.join(name).is_dir())
            .filter_map(|name| VersionName::new(name).ok())
            .collect();
        versions.sort();
        Ok(versions)
    }

    pub fn prefix_for(&self, name: &VersionName) -> PathBuf { self.versions_dir.join(name.as_str()) }

    pub fn bin_root(&self, name: &VersionName) -> PathBuf { self.prefix_for(name).join("bin") }

    pub fn exists(&self, name: &VersionName) -> bool { self.prefix_for(name).is_dir() }

    /// `bin/<command>` of `name` when it exists and is executable.
    pub fn command_path(&self, name: &VersionName, command: &str) -> Option<PathBuf> {
        if command.is_empty() || command.contains(['/', '\\']) {
            return None;
        }
        let path = self.bin_root(name).join(command);
        runv_fs::is_executable(&path).then_some(path)
    }

    /// Installed versions providing `command`, in version order.
    pub fn versions_providing(&self, command: &str) -> Result<Vec<VersionName>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|v| self.command_path(v, command).is_some())
            .collect())
    }

    /// Fail with `NotInstalled` unless `name` is installed or is `system`.
    pub fn require(&self, name: &VersionName) -> Result<()> {
        if name.is_system() || self.exists(name) {
            Ok(())
        } else {
            Err(Error::NotInstalled(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn name(n: &str) -> VersionName { VersionName::new(n).unwrap() }

    #[test]
    fn test_list_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let store = VersionStore::at(dir.path().join("versions"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_sorts_version_aware() {
        let dir = tempdir().unwrap();
        for v in ["10.0", "9.1", "3.12.1", "3.9.18"] {
            std::fs::create_dir_all(dir.path().join(v)).unwrap();
        }
        std::fs::create_dir_all(dir.path().join(".hidden")).unwrap();
        std::fs::write(dir.path().join("stray-file"), "").unwrap();

        let store = VersionStore::at(dir.path());
        let listed: Vec<String> = store.list().unwrap().into_iter().map(VersionName::into_string).collect();
        assert_eq!(listed, vec!["3.9.18", "3.12.1", "9.1", "10.0"]);
    }

    #[test]
    fn test_prefix_is_pure_join() {
        let store = VersionStore::at("/r/versions");
        assert_eq!(store.prefix_for(&name("1.0")), PathBuf::from("/r/versions/1.0"));
        assert_eq!(store.bin_root(&name("1.0")), PathBuf::from("/r/versions/1.0/bin"));
        assert!(!store.exists(&name("1.0")));
    }

    #[test]
    fn test_require() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("1.0")).unwrap();
        let store = VersionStore::at(dir.path());
        assert!(store.require(&name("1.0")).is_ok());
        assert!(store.require(&name("system")).is_ok());
        assert!(matches!(store.require(&name("2.0")), Err(Error::NotInstalled(v)) if v == "2.0"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_path_requires_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let bin = dir.path().join("1.0/bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("tool"), "").unwrap();
        std::fs::write(bin.join("data"), "").unwrap();
        std::fs::set_permissions(bin.join("tool"), std::fs::Permissions::from_mode(0o755)).unwrap();
        std::fs::set_permissions(bin.join("data"), std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = VersionStore::at(dir.path());
        assert_eq!(store.command_path(&name("1.0"), "tool"), Some(bin.join("tool")));
        assert_eq!(store.command_path(&name("1.0"), "data"), None);
        assert_eq!(store.command_path(&name("1.0"), "../bin/tool"), None);
        assert_eq!(store.versions_providing("tool").unwrap(), vec![name("1.0")]);
    }
}

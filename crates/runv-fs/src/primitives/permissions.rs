use crate::{Error, Result};
use std::path::Path;

/// Whether `path` is a regular file (after following links) the user may run.
pub fn is_executable(path: impl AsRef<Path>) -> bool {
    let Ok(metadata) = std::fs::metadata(path.as_ref()) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Add execute bits for everyone who can already read the file.
pub fn make_executable(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let perm_err = |source| Error::Permissions {
            path: path.to_path_buf(),
            source,
        };
        let mut perms = std::fs::metadata(path).map_err(perm_err)?.permissions();
        let mode = perms.mode();
        let exec = (mode & 0o444) >> 2;
        if mode & exec != exec {
            perms.set_mode(mode | exec);
            std::fs::set_permissions(path, perms).map_err(perm_err)?;
        }
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }

    Ok(())
}

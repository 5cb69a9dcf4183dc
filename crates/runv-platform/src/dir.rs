use std::path::PathBuf;

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

/// Default installation root: `~/.runv`.
pub fn default_root() -> crate::Result<PathBuf> {
    user_home()
        .map(|home| home.join(".runv"))
        .ok_or(crate::Error::NoHome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_is_under_home() {
        if let Some(home) = user_home() {
            assert_eq!(default_root().unwrap(), home.join(".runv"));
        }
    }
}

//! Version name type and comparator.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use thiserror::Error;

/// Sentinel meaning "the unmanaged runtime already on `PATH`".
pub const SYSTEM: &str = "system";

static SEGMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+|[^0-9]+").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("version name is empty")]
    Empty,
    #[error("invalid version name '{0}': must be a single path segment")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionName(String);

impl VersionName {
    pub fn new(name: impl Into<String>) -> Result<Self, VersionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(VersionError::Empty);
        }
        if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
            return Err(VersionError::Invalid(name));
        }
        Ok(Self(name))
    }

    /// The unmanaged-runtime sentinel.
    pub fn system() -> Self { Self(SYSTEM.to_string()) }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn is_system(&self) -> bool { self.0 == SYSTEM }

    pub fn into_string(self) -> String { self.0 }
}

impl std::str::FromStr for VersionName {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { VersionName::new(s) }
}

impl std::fmt::Display for VersionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for VersionName {
    fn as_ref(&self) -> &str { &self.0 }
}

impl PartialOrd for VersionName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for VersionName {
    fn cmp(&self, other: &Self) -> Ordering { compare_versions(&self.0, &other.0) }
}

/// Total, version-aware ordering of two names.
///
/// Names are split into digit and non-digit runs. Digit runs compare by
/// magnitude, a run like `-rc.` that starts a pre-release sorts before the end
/// of a shorter name (`1.0.0-rc.1 < 1.0.0`), and the end of a name sorts
/// before any further segment (`3.12 < 3.12.1`). Equal only when the strings
/// are equal, so it agrees with `Eq`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Segment<'a> {
    Pre(&'a str),
    End,
    // Digit run with leading zeros trimmed, ordered by length then digits.
    Num(usize, &'a str),
    Text(&'a str),
}

fn sort_key(name: &str) -> Vec<Segment<'_>> {
    let mut key: Vec<Segment<'_>> = SEGMENT_REGEX
        .find_iter(name)
        .map(|m| {
            let run = m.as_str();
            if run.as_bytes()[0].is_ascii_digit() {
                let digits = run.trim_start_matches('0');
                Segment::Num(digits.len(), digits)
            } else if run.starts_with('-') && run[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                Segment::Pre(run)
            } else {
                Segment::Text(run)
            }
        })
        .collect();
    key.push(Segment::End);
    key
}

/// Version name for an install specifier: its final path segment.
///
/// `definitions/3.12.1` and `/abs/path/3.12.1/` both derive `3.12.1`.
pub fn derive_version_name(specifier: &str) -> Result<VersionName, VersionError> {
    let trimmed = specifier.trim().trim_end_matches(['/', '\\']);
    let segment = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    VersionName::new(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<VersionName> = names.iter().map(|n| VersionName::new(*n).unwrap()).collect();
        v.sort();
        v.into_iter().map(VersionName::into_string).collect()
    }

    #[test]
    fn test_numeric_segments_sort_by_value() {
        assert_eq!(sorted(&["10", "9", "2"]), vec!["2", "9", "10"]);
        assert_eq!(
            sorted(&["3.10.0", "3.9.18", "3.11.1", "3.9.2"]),
            vec!["3.9.2", "3.9.18", "3.10.0", "3.11.1"]
        );
    }

    #[test]
    fn test_prerelease_sorts_before_release() {
        assert_eq!(sorted(&["1.0.0", "1.0.0-rc.1"]), vec!["1.0.0-rc.1", "1.0.0"]);
    }

    #[test]
    fn test_mixed_names() {
        assert_eq!(
            sorted(&["pypy3.10-7.3.15", "3.12.1", "0.18.0", "nightly", "3.12"]),
            vec!["0.18.0", "3.12", "3.12.1", "nightly", "pypy3.10-7.3.15"]
        );
    }

    #[test]
    fn test_leading_zeros_are_distinct_but_adjacent() {
        assert_eq!(compare_versions("01", "1"), Ordering::Less);
        assert_eq!(compare_versions("01", "2"), Ordering::Less);
    }

    #[test]
    fn test_derive_version_name() {
        assert_eq!(derive_version_name("0.18.0").unwrap().as_str(), "0.18.0");
        assert_eq!(derive_version_name("defs/3.12.1").unwrap().as_str(), "3.12.1");
        assert_eq!(derive_version_name("/opt/defs/3.12.1/").unwrap().as_str(), "3.12.1");
        assert_eq!(derive_version_name("  ").unwrap_err(), VersionError::Empty);
        assert_eq!(derive_version_name("/").unwrap_err(), VersionError::Empty);
    }

    #[test]
    fn test_version_name_rejects_paths() {
        assert!(VersionName::new("a/b").is_err());
        assert!(VersionName::new("..").is_err());
        assert!(VersionName::new("").is_err());
        assert!(VersionName::new(SYSTEM).unwrap().is_system());
    }
}

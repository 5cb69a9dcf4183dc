//! Marker file contents.

/// Versions named by a marker file, in file order.
///
/// Words are separated by any whitespace, so one version per line and
/// several per line both work. Words that could escape the versions
/// directory (`..`, anything containing a path separator) are dropped.
pub fn parse_marker(contents: &str) -> Vec<String> {
    contents
        .split_whitespace()
        .filter(|word| *word != ".." && *word != "." && !word.contains(['/', '\\']))
        .map(str::to_owned)
        .collect()
}

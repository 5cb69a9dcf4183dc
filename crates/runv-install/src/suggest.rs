/// Definitions containing `query` as a plain, case-sensitive substring.
///
/// Deliberately not edit-distance based: a typo'd name finds nothing, a
/// partial one (`3.12`) finds every matching definition.
pub fn suggest<'a>(definitions: &'a [String], query: &str) -> Vec<&'a str> {
    if query.is_empty() {
        return Vec::new();
    }
    definitions
        .iter()
        .map(String::as_str)
        .filter(|d| d.contains(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Vec<String> {
        ["3.11.7", "3.12.0", "3.12.1", "pypy3.10-7.3.15"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_substring_matches() {
        assert_eq!(suggest(&defs(), "3.12"), vec!["3.12.0", "3.12.1"]);
        assert_eq!(suggest(&defs(), "3.10"), vec!["pypy3.10-7.3.15"]);
    }

    #[test]
    fn test_no_edit_distance_matching() {
        assert!(suggest(&defs(), "3.21").is_empty());
    }

    #[test]
    fn test_case_sensitive_and_empty_query() {
        assert!(suggest(&defs(), "PYPY").is_empty());
        assert!(suggest(&defs(), "").is_empty());
    }
}

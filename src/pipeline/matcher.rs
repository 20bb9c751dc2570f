use std::collections::HashSet;

/// Marker that turns a pattern into a prefix or suffix match.
pub const WILDCARD: &str = "**";

/// A set of case-insensitive name patterns.
///
/// - `name` matches a category called `name`.
/// - `**name` matches every category ending with `name`.
/// - `name**` matches every category starting with `name`.
///
/// A pattern with the marker on both sides is checked against both rules separately, it is not a
/// "contains" match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    exact: HashSet<String>,
    suffixes: Vec<String>,
    prefixes: Vec<String>,
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(patterns: impl IntoIterator<Item = S>) -> Self {
        let mut set = Self::default();
        for pattern in patterns {
            set.insert(pattern.as_ref());
        }
        set
    }

    pub fn insert(&mut self, pattern: &str) {
        let pattern = pattern.to_lowercase();
        if let Some(suffix) = pattern.strip_prefix(WILDCARD) {
            self.suffixes.push(suffix.to_owned());
        }
        if let Some(prefix) = pattern.strip_suffix(WILDCARD) {
            self.prefixes.push(prefix.to_owned());
        }
        self.exact.insert(pattern);
    }

    /// Merges patterns of `other` into this set.
    pub fn extend(&mut self, other: &PatternSet) {
        self.exact.extend(other.exact.iter().cloned());
        self.suffixes.extend(other.suffixes.iter().cloned());
        self.prefixes.extend(other.prefixes.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.exact.contains(&name)
            || self.prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
            || self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }
}

/// Splits a comma separated pattern list, dropping blank pieces.
pub fn split_patterns(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|v| !v.is_empty())
}

impl<S: AsRef<str>> FromIterator<S> for PatternSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::{split_patterns, PatternSet};

    #[test]
    fn blank_pieces_are_not_patterns() {
        assert_eq!(
            split_patterns(" yaml,, markdown ,").collect::<Vec<_>>(),
            ["yaml", "markdown"]
        );

        let patterns = split_patterns("a,,b").collect::<PatternSet>();
        assert!(!patterns.matches(""));
        assert_eq!(patterns, PatternSet::new(["a", "b"]));
    }

    #[test]
    fn exact_match_ignores_case() {
        let patterns = PatternSet::new(["http request"]);
        assert!(patterns.matches("HTTP Request"));
        assert!(!patterns.matches("HTTP Requests"));

        let patterns = PatternSet::new(["YAML"]);
        assert!(patterns.matches("yaml"));
    }

    #[test]
    fn trailing_marker_matches_prefix() {
        let patterns = PatternSet::new(["test**"]);
        assert!(patterns.matches("testing"));
        assert!(patterns.matches("Test"));
        assert!(!patterns.matches("attest"));
    }

    #[test]
    fn leading_marker_matches_suffix() {
        let patterns = PatternSet::new(["**ing"]);
        assert!(patterns.matches("testing"));
        assert!(patterns.matches("RUNNING"));
        assert!(!patterns.matches("tests"));
    }

    #[test]
    fn markers_on_both_sides_are_checked_independently() {
        let patterns = PatternSet::new(["**core**"]);
        // "core**" as a suffix and "**core" as a prefix, neither is a "contains".
        assert!(!patterns.matches("hardcore-app"));
        assert!(patterns.matches("**core**"));
    }

    #[test]
    fn bare_marker_matches_everything() {
        let patterns = PatternSet::new(["**"]);
        assert!(patterns.matches("anything"));
        assert!(patterns.matches(""));
    }

    #[test]
    fn extend_combines_all_forms() {
        let mut patterns = PatternSet::new(["java"]);
        patterns.extend(&PatternSet::new(["vue**", "**.md"]));

        assert!(patterns.matches("Java"));
        assert!(patterns.matches("Vue.js"));
        assert!(patterns.matches("README.md"));
        assert!(!patterns.matches("Python"));
    }
}

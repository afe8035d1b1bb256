//! Path matcher artifacts carried on route configs.
//!
//! # Responsibilities
//! - Define the seam the external URL matcher plugs into
//! - Provide the never-matching placeholder installed by the builder
//! - Provide a regex-backed matcher producing positional captures
//!
//! # Design Decisions
//! - The core never inspects a matcher; it only carries and defaults it
//! - Captures are positional: index 0 is the whole match

use regex::Regex;

use crate::routing::record::RawParams;

/// Trait for matching URL paths against a compiled route pattern.
pub trait PathMatcher: Send + Sync + std::fmt::Debug {
    /// Returns the positional captures if the path matches.
    fn captures(&self, path: &str) -> Option<RawParams>;

    /// Returns true if the path matches this pattern.
    fn matches(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }
}

/// Placeholder matcher that rejects every path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverMatcher;

impl PathMatcher for NeverMatcher {
    fn captures(&self, _path: &str) -> Option<RawParams> {
        None
    }
}

/// Matches paths with a compiled regular expression.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    pattern: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl PathMatcher for RegexMatcher {
    fn captures(&self, path: &str) -> Option<RawParams> {
        let caps = self.pattern.captures(path)?;
        let groups = caps
            .iter()
            .map(|group| group.map(|m| m.as_str().to_string()))
            .collect();
        Some(RawParams::Positional(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_matcher() {
        let matcher = NeverMatcher;
        assert!(!matcher.matches("/"));
        assert!(!matcher.matches(""));
    }

    #[test]
    fn test_regex_matcher_captures() {
        let matcher = RegexMatcher::new(r"^/u/([^/]+)/([^/]+)$").unwrap();

        match matcher.captures("/u/42/abc") {
            Some(RawParams::Positional(groups)) => {
                assert_eq!(
                    groups,
                    vec![
                        Some("/u/42/abc".to_string()),
                        Some("42".to_string()),
                        Some("abc".to_string())
                    ]
                );
            }
            other => panic!("unexpected captures: {:?}", other),
        }

        assert!(!matcher.matches("/images"));
    }

    #[test]
    fn test_regex_matcher_optional_group() {
        let matcher = RegexMatcher::new(r"^/docs(?:/([^/]+))?$").unwrap();
        match matcher.captures("/docs") {
            Some(RawParams::Positional(groups)) => assert_eq!(groups, vec![Some("/docs".into()), None]),
            other => panic!("unexpected captures: {:?}", other),
        }
    }
}

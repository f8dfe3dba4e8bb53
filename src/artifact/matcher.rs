// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Exclude/include matching over sets of artifact patterns.

use crate::error::{MatchError, PatternError};

use super::coordinate::Coordinates;
use super::pattern::Pattern;

/// Matches artifacts against exclude and include patterns.
///
/// An artifact matches when at least one exclude pattern matches it and no
/// include pattern does. With no exclude patterns nothing ever matches:
/// artifacts must be excluded explicitly before an include can re-admit them.
#[derive(Debug, Clone, Default)]
pub struct ArtifactMatcher {
    exclude_patterns: Vec<Pattern>,
    include_patterns: Vec<Pattern>,
}

impl ArtifactMatcher {
    /// Compile both pattern lists. Empty and blank strings are skipped.
    pub fn new<E, I>(excludes: E, includes: I) -> Result<Self, PatternError>
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let exclude_patterns = compile_patterns(excludes)?;
        let include_patterns = compile_patterns(includes)?;

        tracing::debug!(
            "Compiled artifact matcher: {} excludes, {} includes",
            exclude_patterns.len(),
            include_patterns.len()
        );

        Ok(Self {
            exclude_patterns,
            include_patterns,
        })
    }

    /// Like [`ArtifactMatcher::new`], with absent lists treated as empty.
    pub fn from_optional(
        excludes: Option<&[String]>,
        includes: Option<&[String]>,
    ) -> Result<Self, PatternError> {
        Self::new(excludes.unwrap_or_default(), includes.unwrap_or_default())
    }

    pub fn exclude_patterns(&self) -> &[Pattern] {
        &self.exclude_patterns
    }

    pub fn include_patterns(&self) -> &[Pattern] {
        &self.include_patterns
    }

    /// Check whether the coordinates are excluded and not re-included.
    pub fn matches<C: Coordinates + ?Sized>(&self, coordinates: &C) -> Result<bool, MatchError> {
        if !any_match(&self.exclude_patterns, coordinates)? {
            return Ok(false);
        }
        Ok(!any_match(&self.include_patterns, coordinates)?)
    }
}

fn compile_patterns<P>(patterns: P) -> Result<Vec<Pattern>, PatternError>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .filter(|p| !p.as_ref().trim().is_empty())
        .map(|p| Pattern::new(p.as_ref()))
        .collect()
}

fn any_match<C: Coordinates + ?Sized>(
    patterns: &[Pattern],
    coordinates: &C,
) -> Result<bool, MatchError> {
    for pattern in patterns {
        if pattern.matches(coordinates)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Coordinate;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_empty_excludes_never_match() {
        let matcher = ArtifactMatcher::new(NONE, ["*", "org.foo:bar"]).unwrap();
        assert!(!matcher.matches(&Coordinate::new("org.foo", "bar")).unwrap());
        assert!(!matcher.matches(&Coordinate::default()).unwrap());

        let matcher = ArtifactMatcher::new(NONE, NONE).unwrap();
        assert!(!matcher.matches(&Coordinate::new("org.foo", "bar")).unwrap());
    }

    #[test]
    fn test_include_overrides_exclude() {
        let matcher = ArtifactMatcher::new(["org.foo:*"], ["org.foo:special"]).unwrap();
        assert!(matcher.matches(&Coordinate::new("org.foo", "other")).unwrap());
        assert!(!matcher.matches(&Coordinate::new("org.foo", "special")).unwrap());
        assert!(!matcher.matches(&Coordinate::new("org.bar", "other")).unwrap());
    }

    #[test]
    fn test_any_exclude_is_enough() {
        let matcher = ArtifactMatcher::new(["com.acme:*", "org.foo:bar"], NONE).unwrap();
        assert!(matcher.matches(&Coordinate::new("org.foo", "bar")).unwrap());
        assert!(matcher.matches(&Coordinate::new("com.acme", "x")).unwrap());
        assert!(!matcher.matches(&Coordinate::new("org.foo", "baz")).unwrap());
    }

    #[test]
    fn test_empty_strings_are_skipped() {
        let matcher = ArtifactMatcher::new(["", "org.foo", "  "], ["", "\t"]).unwrap();
        assert_eq!(matcher.exclude_patterns().len(), 1);
        assert!(matcher.include_patterns().is_empty());

        let blank_only = ArtifactMatcher::new(["  "], NONE).unwrap();
        assert!(blank_only.exclude_patterns().is_empty());
        assert!(!blank_only.matches(&Coordinate::new("org.foo", "bar")).unwrap());
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        assert!(matches!(
            ArtifactMatcher::new(["a::c"], NONE),
            Err(PatternError::EmptySegment { .. })
        ));
        assert!(matches!(
            ArtifactMatcher::new(NONE, ["a:b:c:d:e:f:g"]),
            Err(PatternError::TooManyDelimiters { .. })
        ));
    }

    #[test]
    fn test_from_optional() {
        let excludes = vec!["org.foo:*".to_string()];
        let matcher = ArtifactMatcher::from_optional(Some(excludes.as_slice()), None).unwrap();
        assert!(matcher.matches(&Coordinate::new("org.foo", "bar")).unwrap());

        let matcher = ArtifactMatcher::from_optional(None, None).unwrap();
        assert!(!matcher.matches(&Coordinate::new("org.foo", "bar")).unwrap());
    }

    #[test]
    fn test_version_range_error_propagates() {
        let matcher = ArtifactMatcher::new(["org.foo:bar:(1.0"], NONE).unwrap();
        let c = Coordinate::new("org.foo", "bar").with_version("1.0");
        assert!(matches!(
            matcher.matches(&c),
            Err(MatchError::InvalidVersionRange { .. })
        ));
    }

    #[test]
    fn test_include_pin_versus_bare_version() {
        let excludes = ["org.foo:bar:(,2.17.1)"];
        let vulnerable = Coordinate::new("org.foo", "bar").with_version("2.14.0");
        let patched = Coordinate::new("org.foo", "bar").with_version("2.12.4");

        // [v] re-admits exactly v.
        let pinned = ArtifactMatcher::new(excludes, ["org.foo:bar:[2.12.4]"]).unwrap();
        assert!(pinned.matches(&vulnerable).unwrap());
        assert!(!pinned.matches(&patched).unwrap());

        // A bare v re-admits v and everything newer.
        let bare = ArtifactMatcher::new(excludes, ["org.foo:bar:2.12.4"]).unwrap();
        assert!(!bare.matches(&vulnerable).unwrap());
        assert!(!bare.matches(&patched).unwrap());
        let older = Coordinate::new("org.foo", "bar").with_version("2.0");
        assert!(bare.matches(&older).unwrap());
    }

    #[test]
    fn test_order_invariant() {
        let c = Coordinate::new("org.foo", "bar").with_version("1.5");
        let a = ArtifactMatcher::new(["org.foo:*", "org.foo:bar:[1,2)"], ["*:baz"]).unwrap();
        let b = ArtifactMatcher::new(["org.foo:bar:[1,2)", "org.foo:*"], ["*:baz"]).unwrap();
        assert_eq!(a.matches(&c).unwrap(), b.matches(&c).unwrap());
    }
}

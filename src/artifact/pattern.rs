// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Compiled artifact patterns.
//!
//! A pattern is `groupId[:artifactId[:version[:type[:scope[:classifier]]]]]`
//! where every segment is a glob (`*` any sequence, `?` any character).
//! The version segment may also be a version range.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{MatchError, PatternError, VersionError};
use crate::version::{contains_version, ArtifactVersion, VersionRange};

use super::coordinate::{Coordinates, DEFAULT_TYPE, SCOPE_COMPILE};

/// Maximum number of segments in a pattern.
const MAX_SEGMENTS: usize = 6;

const VERSION_INDEX: usize = 2;

/// Predicate for a single pattern segment.
#[derive(Debug, Clone)]
enum SegmentMatcher {
    /// The segment is exactly `*`.
    Any,
    Glob(Regex),
}

impl SegmentMatcher {
    fn compile(segment: &str) -> Result<Self, regex::Error> {
        if segment == "*" {
            return Ok(SegmentMatcher::Any);
        }
        Regex::new(&glob_to_regex(segment)).map(SegmentMatcher::Glob)
    }

    fn is_match(&self, input: &str) -> bool {
        match self {
            SegmentMatcher::Any => true,
            SegmentMatcher::Glob(regex) => regex.is_match(input),
        }
    }
}

/// Translate a glob into an anchored regex; everything but `*` and `?` is literal.
fn glob_to_regex(glob: &str) -> String {
    let mut regex = String::with_capacity(glob.len() + 8);
    regex.push_str("^(?s:");
    let mut buf = [0u8; 4];
    for c in glob.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            other => regex.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    regex.push_str(")$");
    regex
}

/// Coordinate fields, cascaded from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    GroupId,
    ArtifactId,
    Version,
    Type,
    Scope,
    Classifier,
}

impl Field {
    const CASCADE: [Field; MAX_SEGMENTS] = [
        Field::Classifier,
        Field::Scope,
        Field::Type,
        Field::Version,
        Field::ArtifactId,
        Field::GroupId,
    ];

    fn index(self) -> usize {
        match self {
            Field::GroupId => 0,
            Field::ArtifactId => 1,
            Field::Version => VERSION_INDEX,
            Field::Type => 3,
            Field::Scope => 4,
            Field::Classifier => 5,
        }
    }

    /// Value substituted when the candidate field is absent or empty.
    fn default_value(self) -> Option<&'static str> {
        match self {
            Field::Type => Some(DEFAULT_TYPE),
            Field::Scope => Some(SCOPE_COMPILE),
            _ => None,
        }
    }

    fn extract<C: Coordinates + ?Sized>(self, coordinates: &C) -> Option<&str> {
        match self {
            Field::GroupId => coordinates.group_id(),
            Field::ArtifactId => coordinates.artifact_id(),
            Field::Version => coordinates.version(),
            Field::Type => coordinates.artifact_type(),
            Field::Scope => coordinates.scope(),
            Field::Classifier => coordinates.classifier(),
        }
    }

    fn value<C: Coordinates + ?Sized>(self, coordinates: &C) -> &str {
        match (self.extract(coordinates), self.default_value()) {
            (Some(value), _) if !value.is_empty() => value,
            (_, Some(default)) => default,
            (value, None) => value.unwrap_or(""),
        }
    }
}

/// A compiled artifact pattern.
///
/// Segment matchers and the version range are compiled on first use and
/// cached for the lifetime of the pattern. The caches are `OnceLock`s, so
/// one pattern can be shared between threads.
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: String,
    parts: Vec<String>,
    compiled: Vec<OnceLock<SegmentMatcher>>,
    version_range: OnceLock<Result<VersionRange, VersionError>>,
}

impl Pattern {
    /// Parse a pattern string.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let parts: Vec<String> = pattern
            .splitn(MAX_SEGMENTS + 1, ':')
            .map(str::to_string)
            .collect();

        if parts.len() > MAX_SEGMENTS {
            return Err(PatternError::TooManyDelimiters {
                pattern: pattern.to_string(),
            });
        }

        if parts.iter().any(String::is_empty) {
            return Err(PatternError::EmptySegment {
                pattern: pattern.to_string(),
            });
        }

        let compiled = parts.iter().map(|_| OnceLock::new()).collect();

        Ok(Self {
            pattern: pattern.to_string(),
            parts,
            compiled,
            version_range: OnceLock::new(),
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Number of segments the pattern constrains.
    pub fn segment_count(&self) -> usize {
        self.parts.len()
    }

    /// Check a coordinate against the pattern.
    ///
    /// Fields are checked from classifier down to group id and the first
    /// mismatch wins. Fields beyond the pattern's segment count are not
    /// constrained. A version segment that is neither a matching glob nor a
    /// valid range is an error.
    pub fn matches<C: Coordinates + ?Sized>(&self, coordinates: &C) -> Result<bool, MatchError> {
        for field in Field::CASCADE {
            let index = field.index();
            if index >= self.parts.len() {
                continue;
            }

            let value = field.value(coordinates);
            let matched = if field == Field::Version {
                self.version_matches(value)?
            } else {
                self.segment_matches(index, value)?
            };

            if !matched {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn segment_matches(&self, index: usize, input: &str) -> Result<bool, PatternError> {
        Ok(self.segment(index)?.is_match(input))
    }

    fn segment(&self, index: usize) -> Result<&SegmentMatcher, PatternError> {
        if let Some(matcher) = self.compiled[index].get() {
            return Ok(matcher);
        }

        let segment = &self.parts[index];
        let matcher =
            SegmentMatcher::compile(segment).map_err(|e| PatternError::InvalidSegment {
                pattern: self.pattern.clone(),
                segment: segment.clone(),
                message: e.to_string(),
            })?;

        // A racing thread may have published first; both values are equivalent.
        Ok(self.compiled[index].get_or_init(|| matcher))
    }

    fn version_matches(&self, version: &str) -> Result<bool, MatchError> {
        if self.segment_matches(VERSION_INDEX, version)? {
            return Ok(true);
        }

        let range = self
            .version_range
            .get_or_init(|| VersionRange::from_spec(&self.parts[VERSION_INDEX]))
            .as_ref()
            .map_err(|source| MatchError::InvalidVersionRange {
                pattern: self.pattern.clone(),
                source: source.clone(),
            })?;

        Ok(contains_version(range, &ArtifactVersion::new(version)))
    }
}

impl TryFrom<Option<&str>> for Pattern {
    type Error = PatternError;

    fn try_from(pattern: Option<&str>) -> Result<Self, Self::Error> {
        match pattern {
            Some(pattern) => Pattern::new(pattern),
            None => Err(PatternError::Missing),
        }
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{Artifact, Coordinate, Dependency};

    fn pattern(s: &str) -> Pattern {
        Pattern::new(s).unwrap()
    }

    fn coordinate(group: &str, artifact: &str, version: &str) -> Coordinate {
        Coordinate::new(group, artifact).with_version(version)
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            Pattern::new("a:b:c:d:e:f:g").unwrap_err(),
            PatternError::TooManyDelimiters {
                pattern: "a:b:c:d:e:f:g".to_string()
            }
        );
        assert!(matches!(
            Pattern::new("a::c"),
            Err(PatternError::EmptySegment { .. })
        ));
        assert!(matches!(
            Pattern::new(""),
            Err(PatternError::EmptySegment { .. })
        ));
        assert!(matches!(
            Pattern::new("a:"),
            Err(PatternError::EmptySegment { .. })
        ));
        assert_eq!(
            Pattern::try_from(None::<&str>).unwrap_err(),
            PatternError::Missing
        );
        assert_eq!(pattern("a:b:c:d:e:f").segment_count(), 6);
    }

    #[test]
    fn test_star_matches_any_group() {
        let p = pattern("*");
        assert!(p.matches(&Coordinate::new("org.foo", "bar")).unwrap());
        assert!(p.matches(&Coordinate::new("", "bar")).unwrap());
        assert!(p.matches(&Coordinate::default()).unwrap());
    }

    #[test]
    fn test_group_and_artifact() {
        let p = pattern("org.foo:bar");
        assert!(p.matches(&Coordinate::new("org.foo", "bar")).unwrap());
        assert!(!p.matches(&Coordinate::new("org.foo", "baz")).unwrap());
        assert!(!p.matches(&Coordinate::new("orgXfoo", "bar")).unwrap());
    }

    #[test]
    fn test_glob_wildcards() {
        let p = pattern("org.*:ba?");
        assert!(p.matches(&Coordinate::new("org.foo", "bar")).unwrap());
        assert!(p.matches(&Coordinate::new("org.", "baz")).unwrap());
        assert!(!p.matches(&Coordinate::new("org.foo", "barr")).unwrap());
        assert!(!p.matches(&Coordinate::new("com.foo", "bar")).unwrap());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let p = pattern("org.foo+:a|b");
        assert!(p.matches(&Coordinate::new("org.foo+", "a|b")).unwrap());
        assert!(!p.matches(&Coordinate::new("org.fooo", "a")).unwrap());
    }

    #[test]
    fn test_bare_version_is_lower_bound() {
        let p = pattern("org.foo:bar:2.0.4");
        assert!(p.matches(&coordinate("org.foo", "bar", "2.0.4")).unwrap());
        assert!(p.matches(&coordinate("org.foo", "bar", "3.0.0")).unwrap());
        assert!(!p.matches(&coordinate("org.foo", "bar", "1.0.0")).unwrap());
    }

    #[test]
    fn test_version_range() {
        let p = pattern("org.foo:bar:[1.0,2.0)");
        assert!(p.matches(&coordinate("org.foo", "bar", "1.5")).unwrap());
        assert!(!p.matches(&coordinate("org.foo", "bar", "2.0")).unwrap());
        assert!(!p.matches(&coordinate("org.foo", "bar", "0.9")).unwrap());
    }

    #[test]
    fn test_version_glob() {
        let p = pattern("org.foo:bar:1.*");
        assert!(p.matches(&coordinate("org.foo", "bar", "1.2.3")).unwrap());
        // Falls back to "1.*" as a bare lower bound.
        assert!(p.matches(&coordinate("org.foo", "bar", "2.0")).unwrap());
        assert!(!p.matches(&coordinate("org.foo", "bar", "0.9")).unwrap());
    }

    #[test]
    fn test_invalid_version_range_is_an_error() {
        let p = pattern("org.foo:bar:[1.0");
        let err = p
            .matches(&coordinate("org.foo", "bar", "1.0"))
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidVersionRange { .. }));
        assert!(err.to_string().contains("org.foo:bar:[1.0"));
    }

    #[test]
    fn test_mismatch_short_circuits_before_version() {
        // Classifier mismatches first, so the broken range is never parsed.
        let p = pattern("org.foo:bar:[1.0:jar:compile:sources");
        let c = coordinate("org.foo", "bar", "1.0").with_classifier("javadoc");
        assert!(!p.matches(&c).unwrap());
    }

    #[test]
    fn test_scope_and_type_defaults() {
        let p = pattern("org.foo:bar:1.0:jar:compile");
        let c = coordinate("org.foo", "bar", "1.0");
        assert!(p.matches(&c).unwrap());

        let c = coordinate("org.foo", "bar", "1.0")
            .with_type("")
            .with_scope("");
        assert!(p.matches(&c).unwrap());

        let c = coordinate("org.foo", "bar", "1.0").with_scope("test");
        assert!(!p.matches(&c).unwrap());

        let c = coordinate("org.foo", "bar", "1.0").with_type("war");
        assert!(!p.matches(&c).unwrap());
    }

    #[test]
    fn test_classifier_absent_is_empty() {
        let p = pattern("org.foo:bar:1.0:jar:compile:*");
        assert!(p.matches(&coordinate("org.foo", "bar", "1.0")).unwrap());

        let p = pattern("org.foo:bar:1.0:jar:compile:tests");
        assert!(!p.matches(&coordinate("org.foo", "bar", "1.0")).unwrap());
        let c = coordinate("org.foo", "bar", "1.0").with_classifier("tests");
        assert!(p.matches(&c).unwrap());
    }

    #[test]
    fn test_artifact_and_dependency() {
        let p = pattern("org.foo:bar:*:jar:test");
        let artifact = Artifact::new("org.foo", "bar", "1.0").with_scope("test");
        assert!(p.matches(&artifact).unwrap());

        let dependency = Dependency {
            group_id: "org.foo".to_string(),
            artifact_id: "bar".to_string(),
            scope: Some("test".to_string()),
            ..Dependency::default()
        };
        assert!(p.matches(&dependency).unwrap());
    }

    #[test]
    fn test_matching_is_repeatable() {
        let p = pattern("org.*:bar:[1.0,2.0)");
        let inside = coordinate("org.foo", "bar", "1.5");
        let outside = coordinate("org.foo", "bar", "2.5");
        for _ in 0..3 {
            assert!(p.matches(&inside).unwrap());
            assert!(!p.matches(&outside).unwrap());
        }
    }

    #[test]
    fn test_shared_between_threads() {
        let p = std::sync::Arc::new(pattern("org.*:b?r:[1.0,2.0)"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = std::sync::Arc::clone(&p);
                std::thread::spawn(move || {
                    p.matches(&coordinate("org.foo", "bar", "1.1")).unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn test_display_is_pattern_text() {
        assert_eq!(pattern("org.foo:*:[1,2)").to_string(), "org.foo:*:[1,2)");
    }

    #[test]
    fn test_glob_to_regex() {
        assert_eq!(glob_to_regex("a.b*"), r"^(?s:a\.b.*)$");
        assert_eq!(glob_to_regex("a?"), "^(?s:a.)$");
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Version range specifications.
//!
//! Grammar: either a bare version (`1.0`, a *recommended* version), or one
//! or more comma separated restrictions such as `[1.0,2.0)`, `(,1.0]`,
//! `[1.5]` or `[1.0,1.2),[1.3,)`.

use std::fmt;

use crate::error::VersionError;

use super::ArtifactVersion;

/// One interval of a version range. Missing bounds are open ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    lower_bound: Option<ArtifactVersion>,
    lower_bound_inclusive: bool,
    upper_bound: Option<ArtifactVersion>,
    upper_bound_inclusive: bool,
}

impl Restriction {
    /// A restriction without bounds.
    pub fn everything() -> Self {
        Self {
            lower_bound: None,
            lower_bound_inclusive: false,
            upper_bound: None,
            upper_bound_inclusive: false,
        }
    }

    pub fn lower_bound(&self) -> Option<&ArtifactVersion> {
        self.lower_bound.as_ref()
    }

    pub fn is_lower_bound_inclusive(&self) -> bool {
        self.lower_bound_inclusive
    }

    pub fn upper_bound(&self) -> Option<&ArtifactVersion> {
        self.upper_bound.as_ref()
    }

    pub fn is_upper_bound_inclusive(&self) -> bool {
        self.upper_bound_inclusive
    }

    /// Whether the version falls inside this interval.
    pub fn contains_version(&self, version: &ArtifactVersion) -> bool {
        if let Some(lower) = &self.lower_bound {
            match lower.cmp(version) {
                std::cmp::Ordering::Greater => return false,
                std::cmp::Ordering::Equal if !self.lower_bound_inclusive => return false,
                _ => {}
            }
        }
        if let Some(upper) = &self.upper_bound {
            match upper.cmp(version) {
                std::cmp::Ordering::Less => return false,
                std::cmp::Ordering::Equal if !self.upper_bound_inclusive => return false,
                _ => {}
            }
        }
        true
    }

    fn parse(spec: &str) -> Result<Self, VersionError> {
        let lower_bound_inclusive = spec.starts_with('[');
        let upper_bound_inclusive = spec.ends_with(']');

        let inner = spec[1..spec.len() - 1].trim();

        let Some(comma) = inner.find(',') else {
            if !lower_bound_inclusive || !upper_bound_inclusive {
                return Err(VersionError::SingleVersionNotClosed {
                    spec: spec.to_string(),
                });
            }
            let version = ArtifactVersion::new(inner);
            return Ok(Self {
                lower_bound: Some(version.clone()),
                lower_bound_inclusive,
                upper_bound: Some(version),
                upper_bound_inclusive,
            });
        };

        let lower = inner[..comma].trim();
        let upper = inner[comma + 1..].trim();

        if lower == upper {
            return Err(VersionError::IdenticalBoundaries {
                spec: spec.to_string(),
            });
        }

        let lower_bound = (!lower.is_empty()).then(|| ArtifactVersion::new(lower));
        let upper_bound = (!upper.is_empty()).then(|| ArtifactVersion::new(upper));

        if let (Some(lower), Some(upper)) = (&lower_bound, &upper_bound) {
            if upper < lower {
                return Err(VersionError::BoundsOutOfOrder {
                    spec: spec.to_string(),
                });
            }
        }

        Ok(Self {
            lower_bound,
            lower_bound_inclusive,
            upper_bound,
            upper_bound_inclusive,
        })
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.lower_bound_inclusive { "[" } else { "(" })?;
        if let Some(lower) = &self.lower_bound {
            write!(f, "{}", lower)?;
        }
        // A pinned restriction prints as [v]
        let pinned = self.lower_bound.is_some() && self.lower_bound == self.upper_bound;
        if !pinned {
            f.write_str(",")?;
            if let Some(upper) = &self.upper_bound {
                write!(f, "{}", upper)?;
            }
        }
        f.write_str(if self.upper_bound_inclusive { "]" } else { ")" })
    }
}

/// A parsed version range specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    recommended_version: Option<ArtifactVersion>,
    restrictions: Vec<Restriction>,
}

impl VersionRange {
    /// Parse a range specification.
    pub fn from_spec(spec: &str) -> Result<Self, VersionError> {
        let mut restrictions: Vec<Restriction> = Vec::new();
        let mut process = spec;
        let mut upper_bound: Option<ArtifactVersion> = None;

        while process.starts_with('[') || process.starts_with('(') {
            let close_paren = process.find(')');
            let close_bracket = process.find(']');

            let index = match (close_paren, close_bracket) {
                (Some(paren), Some(bracket)) => paren.min(bracket),
                (Some(paren), None) => paren,
                (None, Some(bracket)) => bracket,
                (None, None) => {
                    return Err(VersionError::UnboundedRange {
                        spec: spec.to_string(),
                    })
                }
            };

            let restriction = Restriction::parse(&process[..=index]).map_err(|e| match e {
                // Report the whole specification, not the fragment.
                VersionError::SingleVersionNotClosed { .. } => {
                    VersionError::SingleVersionNotClosed {
                        spec: spec.to_string(),
                    }
                }
                VersionError::IdenticalBoundaries { .. } => VersionError::IdenticalBoundaries {
                    spec: spec.to_string(),
                },
                VersionError::BoundsOutOfOrder { .. } => VersionError::BoundsOutOfOrder {
                    spec: spec.to_string(),
                },
                other => other,
            })?;

            if let Some(previous_upper) = &upper_bound {
                let overlaps = match restriction.lower_bound() {
                    Some(lower) => lower < previous_upper,
                    None => true,
                };
                if overlaps {
                    return Err(VersionError::RangesOverlap {
                        spec: spec.to_string(),
                    });
                }
            }

            upper_bound = restriction.upper_bound().cloned();
            restrictions.push(restriction);

            process = process[index + 1..].trim();
            if let Some(rest) = process.strip_prefix(',') {
                process = rest.trim();
            }
        }

        let mut recommended_version = None;
        if !process.is_empty() {
            if !restrictions.is_empty() {
                return Err(VersionError::MixedSet {
                    spec: spec.to_string(),
                });
            }
            recommended_version = Some(ArtifactVersion::new(process));
            restrictions.push(Restriction::everything());
        }

        Ok(Self {
            recommended_version,
            restrictions,
        })
    }

    /// The pinned version of a bare specification such as `2.0.4`.
    pub fn recommended_version(&self) -> Option<&ArtifactVersion> {
        self.recommended_version.as_ref()
    }

    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    /// Interval containment: true if any restriction contains the version.
    ///
    /// A bare specification has a single unbounded restriction and therefore
    /// contains everything here; [`contains_version`] gives bare versions
    /// their lower-bound meaning.
    pub fn contains_version(&self, version: &ArtifactVersion) -> bool {
        self.restrictions
            .iter()
            .any(|restriction| restriction.contains_version(version))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(version) = &self.recommended_version {
            return write!(f, "{}", version);
        }
        for (i, restriction) in self.restrictions.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", restriction)?;
        }
        Ok(())
    }
}

/// Check whether `version` is allowed by `allowed_range`.
///
/// A bare version is treated as a lower bound: `2.0.4` behaves like
/// `[2.0.4,)`. Ranges with explicit restrictions use interval containment.
pub fn contains_version(allowed_range: &VersionRange, version: &ArtifactVersion) -> bool {
    match allowed_range.recommended_version() {
        Some(recommended) => recommended <= version,
        None => allowed_range.contains_version(version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(spec: &str) -> VersionRange {
        VersionRange::from_spec(spec).unwrap()
    }

    fn version(s: &str) -> ArtifactVersion {
        ArtifactVersion::new(s)
    }

    #[test]
    fn test_bare_version_is_lower_bound() {
        let r = range("2.0.4");
        assert_eq!(r.recommended_version(), Some(&version("2.0.4")));
        assert!(contains_version(&r, &version("2.0.4")));
        assert!(contains_version(&r, &version("3.0.0")));
        assert!(!contains_version(&r, &version("1.0.0")));
        // Plain interval containment accepts everything for a bare version.
        assert!(r.contains_version(&version("1.0.0")));
    }

    #[test]
    fn test_half_open_range() {
        let r = range("[1.0,2.0)");
        assert!(r.recommended_version().is_none());
        assert!(contains_version(&r, &version("1.0")));
        assert!(contains_version(&r, &version("1.5")));
        assert!(!contains_version(&r, &version("2.0")));
        assert!(!contains_version(&r, &version("0.9")));
    }

    #[test]
    fn test_open_ended_ranges() {
        let r = range("[1.5,)");
        assert!(contains_version(&r, &version("1.5")));
        assert!(contains_version(&r, &version("99")));
        assert!(!contains_version(&r, &version("1.4")));

        let r = range("(,1.0]");
        assert!(contains_version(&r, &version("0.1")));
        assert!(contains_version(&r, &version("1.0")));
        assert!(!contains_version(&r, &version("1.0.1")));
    }

    #[test]
    fn test_exact_version() {
        let r = range("[1.5]");
        assert!(contains_version(&r, &version("1.5")));
        assert!(contains_version(&r, &version("1.5.0")));
        assert!(!contains_version(&r, &version("1.6")));
        assert_eq!(r.to_string(), "[1.5]");
    }

    #[test]
    fn test_multiple_sets() {
        let r = range("(,1.0],[1.2,)");
        assert_eq!(r.restrictions().len(), 2);
        assert!(contains_version(&r, &version("0.5")));
        assert!(!contains_version(&r, &version("1.1")));
        assert!(contains_version(&r, &version("1.2")));
        assert_eq!(r.to_string(), "(,1.0],[1.2,)");
    }

    #[test]
    fn test_invalid_specs() {
        assert!(matches!(
            VersionRange::from_spec("[1.0"),
            Err(VersionError::UnboundedRange { .. })
        ));
        assert!(matches!(
            VersionRange::from_spec("(1.0)"),
            Err(VersionError::SingleVersionNotClosed { .. })
        ));
        assert!(matches!(
            VersionRange::from_spec("[1.0,1.0]"),
            Err(VersionError::IdenticalBoundaries { .. })
        ));
        assert!(matches!(
            VersionRange::from_spec("[2.0,1.0]"),
            Err(VersionError::BoundsOutOfOrder { .. })
        ));
        assert!(matches!(
            VersionRange::from_spec("[1.0,2.0],[1.5,3.0]"),
            Err(VersionError::RangesOverlap { .. })
        ));
        assert!(matches!(
            VersionRange::from_spec("[1.0,2.0],3.0"),
            Err(VersionError::MixedSet { .. })
        ));
    }

    #[test]
    fn test_error_reports_full_spec() {
        let err = VersionRange::from_spec("[1.0,2.0),(3.0)").unwrap_err();
        assert!(err.to_string().contains("[1.0,2.0),(3.0)"));
    }
}

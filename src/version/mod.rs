// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Artifact versions and version ranges.
//!
//! Versions use Maven's generic ordering (see [`ComparableVersion`]);
//! ranges follow the `[low,high)` notation.

mod comparable;
mod range;

pub use comparable::ComparableVersion;
pub use range::{contains_version, Restriction, VersionRange};

use std::cmp::Ordering;
use std::fmt;

/// The version of an artifact or dependency.
#[derive(Debug, Clone)]
pub struct ArtifactVersion {
    comparable: ComparableVersion,
}

impl ArtifactVersion {
    /// Parse a version. Any string is accepted.
    pub fn new(version: &str) -> Self {
        Self {
            comparable: ComparableVersion::new(version.trim()),
        }
    }

    /// The version text.
    pub fn as_str(&self) -> &str {
        self.comparable.as_str()
    }
}

impl PartialEq for ArtifactVersion {
    fn eq(&self, other: &Self) -> bool {
        self.comparable == other.comparable
    }
}

impl Eq for ArtifactVersion {}

impl PartialOrd for ArtifactVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArtifactVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparable.cmp(&other.comparable)
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.comparable)
    }
}

impl std::str::FromStr for ArtifactVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

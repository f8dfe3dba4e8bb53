// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Artifact coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PatternError;

/// Type assumed when an artifact does not declare one.
pub const DEFAULT_TYPE: &str = "jar";

/// Scope assumed when an artifact does not declare one.
pub const SCOPE_COMPILE: &str = "compile";

/// Access to the six fields patterns are matched against.
///
/// Absent fields are `None`; they match as the empty string unless the
/// field has a default (type and scope).
pub trait Coordinates {
    fn group_id(&self) -> Option<&str>;
    fn artifact_id(&self) -> Option<&str>;
    fn version(&self) -> Option<&str>;
    fn artifact_type(&self) -> Option<&str>;
    fn scope(&self) -> Option<&str>;
    fn classifier(&self) -> Option<&str>;
}

/// A free-standing coordinate tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinate {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub artifact_type: Option<String>,
    pub scope: Option<String>,
    pub classifier: Option<String>,
}

impl Coordinate {
    /// Create a coordinate with group and artifact id.
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            artifact_id: Some(artifact_id.into()),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = Some(artifact_type.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }
}

impl Coordinates for Coordinate {
    fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    fn artifact_id(&self) -> Option<&str> {
        self.artifact_id.as_deref()
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn artifact_type(&self) -> Option<&str> {
        self.artifact_type.as_deref()
    }

    fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }
}

/// Parses `group[:artifact[:version[:type[:scope[:classifier]]]]]`.
/// Empty parts are absent fields.
impl std::str::FromStr for Coordinate {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(7, ':').collect();
        if parts.len() == 7 {
            return Err(PatternError::TooManyDelimiters {
                pattern: s.to_string(),
            });
        }

        let field = |i: usize| {
            parts
                .get(i)
                .filter(|p| !p.is_empty())
                .map(|p| p.to_string())
        };

        Ok(Self {
            group_id: field(0),
            artifact_id: field(1),
            version: field(2),
            artifact_type: field(3),
            scope: field(4),
            classifier: field(5),
        })
    }
}

/// A resolved artifact, as found in a project's dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(rename = "type", default = "default_type")]
    pub artifact_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
}

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

impl Artifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            artifact_type: default_type(),
            scope: None,
            classifier: None,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }
}

impl Coordinates for Artifact {
    fn group_id(&self) -> Option<&str> {
        Some(&self.group_id)
    }

    fn artifact_id(&self) -> Option<&str> {
        Some(&self.artifact_id)
    }

    fn version(&self) -> Option<&str> {
        Some(&self.version)
    }

    fn artifact_type(&self) -> Option<&str> {
        Some(&self.artifact_type)
    }

    fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.artifact_type, self.version
        )?;
        if let Some(scope) = &self.scope {
            write!(f, ":{}", scope)?;
        }
        Ok(())
    }
}

/// A declared dependency. The version may be a range or missing when it
/// is managed elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub artifact_type: Option<String>,
    pub scope: Option<String>,
    pub classifier: Option<String>,
    pub optional: bool,
}

impl Coordinates for Dependency {
    fn group_id(&self) -> Option<&str> {
        Some(&self.group_id)
    }

    fn artifact_id(&self) -> Option<&str> {
        Some(&self.artifact_id)
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn artifact_type(&self) -> Option<&str> {
        self.artifact_type.as_deref()
    }

    fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }
}

/// Key for artifacts that are equivalent as far as matching goes.
///
/// Two artifacts with the same six fields are the same `MatchingArtifact`.
/// Absent fields render as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchingArtifact(String);

impl MatchingArtifact {
    pub fn new<C: Coordinates + ?Sized>(coordinates: &C) -> Self {
        let fields = [
            coordinates.group_id(),
            coordinates.artifact_id(),
            coordinates.version(),
            coordinates.artifact_type(),
            coordinates.scope(),
            coordinates.classifier(),
        ];
        let key = fields
            .iter()
            .map(|f| f.unwrap_or("null"))
            .collect::<Vec<_>>()
            .join(":");
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchingArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

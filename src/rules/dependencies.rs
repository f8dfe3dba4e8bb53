// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule banning dependencies by coordinate pattern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::artifact::{ArtifactMatcher, MatchingArtifact};
use crate::error::RuleError;

use super::builtin::{cache_id_of, Rule};
use super::context::RuleContext;

/// Fails when a dependency matches one of `excludes` and none of `includes`.
///
/// Patterns use `groupId[:artifactId[:version[:type[:scope[:classifier]]]]]`,
/// with `*` and `?` wildcards and version ranges in the version segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannedDependencies {
    /// Patterns of dependencies to ban.
    pub excludes: Vec<String>,

    /// Patterns of dependencies allowed even though an exclude matches.
    pub includes: Vec<String>,

    /// Message prepended to the list of banned dependencies.
    pub message: Option<String>,
}

impl BannedDependencies {
    pub fn new<S: Into<String>>(excludes: impl IntoIterator<Item = S>) -> Self {
        Self {
            excludes: excludes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_includes<S: Into<String>>(mut self, includes: impl IntoIterator<Item = S>) -> Self {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Dependencies from the context that are banned.
    pub fn find_banned(&self, context: &RuleContext) -> Result<Vec<MatchingArtifact>, RuleError> {
        let matcher = ArtifactMatcher::new(&self.excludes, &self.includes)
            .map_err(|e| RuleError::Misconfigured(e.to_string()))?;

        let mut banned = BTreeSet::new();
        for dependency in context.dependencies() {
            let matched = matcher
                .matches(dependency)
                .map_err(|e| RuleError::Misconfigured(e.to_string()))?;
            if matched {
                tracing::debug!("Dependency {} is banned", dependency);
                banned.insert(MatchingArtifact::new(dependency));
            }
        }

        Ok(banned.into_iter().collect())
    }
}

impl Rule for BannedDependencies {
    fn name(&self) -> &str {
        "Banned dependencies"
    }

    fn cache_id(&self) -> Option<String> {
        Some(cache_id_of(&format!("{:?}", self)))
    }

    fn execute(&self, context: &RuleContext) -> Result<(), RuleError> {
        let banned = self.find_banned(context)?;
        if banned.is_empty() {
            return Ok(());
        }

        let mut message = String::new();
        if let Some(custom) = &self.message {
            message.push_str(custom);
            message.push('\n');
        }
        let lines: Vec<String> = banned
            .iter()
            .map(|artifact| format!("Found Banned Dependency: {}", artifact))
            .collect();
        message.push_str(&lines.join("\n"));

        Err(RuleError::Violation(message))
    }
}

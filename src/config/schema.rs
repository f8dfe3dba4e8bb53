// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from enforcer.toml.

use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;
use crate::rules::{
    BannedDependencies, RequireEnvironmentVariable, RequireFileChecksum, RequireTextFileChecksum,
};

/// The main configuration structure for enforcer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnforcerConfig {
    /// Execution settings.
    pub settings: SettingsConfig,

    /// Rule declarations.
    pub rules: RulesConfig,

    /// Resolved dependencies of the project.
    pub dependencies: Vec<Artifact>,
}

impl EnforcerConfig {
    /// Total number of declared rules.
    pub fn rule_count(&self) -> usize {
        self.rules.require_environment_variable.len()
            + self.rules.require_file_checksum.len()
            + self.rules.require_text_file_checksum.len()
            + self.rules.banned_dependencies.len()
    }
}

/// Execution settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SettingsConfig {
    /// Stop at the first failing rule.
    pub fail_fast: bool,
}

/// Rule declarations, grouped by rule kind.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    pub require_environment_variable: Vec<RequireEnvironmentVariable>,

    pub require_file_checksum: Vec<RequireFileChecksum>,

    pub require_text_file_checksum: Vec<RequireTextFileChecksum>,

    pub banned_dependencies: Vec<BannedDependencies>,
}

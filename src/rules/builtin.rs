// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The rule trait and the set of built-in rules.

use sha2::{Digest, Sha256};

use crate::config::EnforcerConfig;
use crate::error::RuleError;

use super::context::RuleContext;

/// A build-time check.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Human readable rule name.
    fn name(&self) -> &str;

    /// Identifier for caching results of identically configured rules.
    fn cache_id(&self) -> Option<String> {
        None
    }

    /// Run the check. `Ok(())` means the rule passed.
    fn execute(&self, context: &RuleContext) -> Result<(), RuleError>;
}

/// Stable identifier derived from a rule's settings.
pub(crate) fn cache_id_of(settings: &str) -> String {
    let digest = Sha256::digest(settings.as_bytes());
    format!("{:x}", digest)[..16].to_string()
}

/// Build every rule declared in the configuration, in declaration order
/// grouped by kind.
pub fn configured_rules(config: &EnforcerConfig) -> Vec<Box<dyn Rule>> {
    let rules = &config.rules;
    let mut configured: Vec<Box<dyn Rule>> = Vec::new();

    for rule in &rules.require_environment_variable {
        configured.push(Box::new(rule.clone()));
    }
    for rule in &rules.require_file_checksum {
        configured.push(Box::new(rule.clone()));
    }
    for rule in &rules.require_text_file_checksum {
        configured.push(Box::new(rule.clone()));
    }
    for rule in &rules.banned_dependencies {
        configured.push(Box::new(rule.clone()));
    }

    configured
}

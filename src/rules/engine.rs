// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine executing configured rules.

use crate::config::EnforcerConfig;

use super::builtin::{configured_rules, Rule};
use super::context::RuleContext;
use super::outcome::{EnforcementResult, RuleOutcome};

/// Runs a list of rules against a context.
#[derive(Debug, Default)]
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
    fail_fast: bool,
}

impl RuleEngine {
    /// Create an engine with the rules declared in the configuration.
    pub fn new(config: &EnforcerConfig) -> Self {
        Self {
            rules: configured_rules(config),
            fail_fast: config.settings.fail_fast,
        }
    }

    /// Add a rule to the engine.
    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Stop at the first failing rule.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Execute every rule and collect the outcomes.
    pub fn enforce(&self, context: &RuleContext) -> EnforcementResult {
        let mut result = EnforcementResult::new();

        for (index, rule) in self.rules.iter().enumerate() {
            tracing::debug!("Executing rule: {}", rule.name());

            let outcome =
                RuleOutcome::from_result(rule.name(), rule.cache_id(), rule.execute(context));
            let failed = !outcome.is_passed();
            if failed {
                tracing::debug!("Rule {} failed: {:?}", rule.name(), outcome.message);
            }
            result.outcomes.push(outcome);

            if failed && self.fail_fast {
                result.skipped = self.rules.len() - index - 1;
                break;
            }
        }

        result
    }
}

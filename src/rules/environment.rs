// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule requiring an environment variable to be set.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RuleError;

use super::builtin::{cache_id_of, Rule};
use super::context::RuleContext;

/// Checks that an environment variable is set and, optionally, that its
/// value matches a regular expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequireEnvironmentVariable {
    /// Name of the required variable.
    pub variable_name: Option<String>,

    /// Message used when the variable is not set.
    pub message: Option<String>,

    /// Regular expression the whole value must match.
    pub regex: Option<String>,

    /// Message used when the value does not match `regex`.
    pub regex_message: Option<String>,
}

impl RequireEnvironmentVariable {
    pub fn new(variable_name: impl Into<String>) -> Self {
        Self {
            variable_name: Some(variable_name.into()),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    pub fn with_regex_message(mut self, message: impl Into<String>) -> Self {
        self.regex_message = Some(message.into());
        self
    }

    fn check_value(&self, variable: &str, value: &str) -> Result<(), RuleError> {
        let Some(pattern) = &self.regex else {
            return Ok(());
        };

        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            RuleError::Misconfigured(format!("Invalid regular expression \"{}\": {}", pattern, e))
        })?;

        if regex.is_match(value) {
            return Ok(());
        }

        let message = self.regex_message.clone().unwrap_or_else(|| {
            format!(
                "{} \"{}\" evaluates to \"{}\".  This does not match the regular expression \"{}\"",
                self.name(),
                variable,
                value,
                pattern
            )
        });
        Err(RuleError::Violation(message))
    }
}

impl Rule for RequireEnvironmentVariable {
    fn name(&self) -> &str {
        "Environment variable"
    }

    fn cache_id(&self) -> Option<String> {
        Some(cache_id_of(&self.to_string()))
    }

    fn execute(&self, context: &RuleContext) -> Result<(), RuleError> {
        let variable = self.variable_name.as_deref().ok_or_else(|| {
            RuleError::Misconfigured("The variable name to check has not been set".to_string())
        })?;

        let Some(value) = context.environment().get(variable) else {
            let message = self.message.clone().unwrap_or_else(|| {
                format!("{} \"{}\" is required for this build.", self.name(), variable)
            });
            return Err(RuleError::Violation(message));
        };

        tracing::debug!("Environment variable {} is set", variable);
        self.check_value(variable, &value)
    }
}

impl fmt::Display for RequireEnvironmentVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "null".to_string());
        write!(
            f,
            "RequireEnvironmentVariable[variableName={}, message={}, regex={}, regexMessage={}]",
            show(&self.variable_name),
            show(&self.message),
            show(&self.regex),
            show(&self.regex_message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn context(vars: &[(&str, &str)]) -> RuleContext {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuleContext::new(".").with_environment(env)
    }

    #[test]
    fn test_variable_present() {
        let rule = RequireEnvironmentVariable::new("JAVA_HOME");
        assert!(rule.execute(&context(&[("JAVA_HOME", "/opt/jdk")])).is_ok());
    }

    #[test]
    fn test_variable_missing_default_message() {
        let rule = RequireEnvironmentVariable::new("JAVA_HOME");
        let err = rule.execute(&context(&[])).unwrap_err();
        assert_eq!(
            err,
            RuleError::Violation(
                "Environment variable \"JAVA_HOME\" is required for this build.".to_string()
            )
        );
    }

    #[test]
    fn test_variable_missing_custom_message() {
        let rule = RequireEnvironmentVariable::new("JAVA_HOME").with_message("set JAVA_HOME");
        let err = rule.execute(&context(&[])).unwrap_err();
        assert_eq!(err.to_string(), "set JAVA_HOME");
    }

    #[test]
    fn test_regex_must_match_whole_value() {
        let rule = RequireEnvironmentVariable::new("PROFILE").with_regex("dev|prod");
        assert!(rule.execute(&context(&[("PROFILE", "prod")])).is_ok());

        let err = rule.execute(&context(&[("PROFILE", "production")])).unwrap_err();
        assert!(err.is_violation());
        assert_eq!(
            err.to_string(),
            "Environment variable \"PROFILE\" evaluates to \"production\".  \
             This does not match the regular expression \"dev|prod\""
        );
    }

    #[test]
    fn test_regex_custom_message() {
        let rule = RequireEnvironmentVariable::new("PROFILE")
            .with_regex("dev")
            .with_regex_message("only dev builds");
        let err = rule.execute(&context(&[("PROFILE", "prod")])).unwrap_err();
        assert_eq!(err.to_string(), "only dev builds");
    }

    #[test]
    fn test_misconfigured() {
        let rule = RequireEnvironmentVariable::default();
        assert!(matches!(
            rule.execute(&context(&[])),
            Err(RuleError::Misconfigured(_))
        ));

        let rule = RequireEnvironmentVariable::new("X").with_regex("(");
        assert!(matches!(
            rule.execute(&context(&[("X", "1")])),
            Err(RuleError::Misconfigured(_))
        ));
    }

    #[test]
    fn test_cache_id_follows_settings() {
        let a = RequireEnvironmentVariable::new("A");
        let b = RequireEnvironmentVariable::new("B");
        assert_eq!(a.cache_id(), a.clone().cache_id());
        assert_ne!(a.cache_id(), b.cache_id());
        assert!(a.to_string().contains("variableName=A"));
    }
}

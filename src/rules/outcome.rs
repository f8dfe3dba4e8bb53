// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Enforcement result types.

use chrono::{DateTime, Utc};
use console::{style, Style};

use crate::cli::args::OutputFormat;
use crate::error::RuleError;

/// How a single rule ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Passed,
    /// The enforced condition does not hold.
    Violation,
    /// The rule could not be evaluated as configured.
    Misconfigured,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Passed => "passed",
            OutcomeStatus::Violation => "violation",
            OutcomeStatus::Misconfigured => "misconfigured",
        }
    }
}

/// The result of executing one rule.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    /// Rule name.
    pub rule: String,
    /// Cache identifier of the rule, if it has one.
    pub cache_id: Option<String>,
    pub status: OutcomeStatus,
    /// Failure message.
    pub message: Option<String>,
}

impl RuleOutcome {
    /// Build an outcome from a rule's execution result.
    pub fn from_result(
        rule: impl Into<String>,
        cache_id: Option<String>,
        result: Result<(), RuleError>,
    ) -> Self {
        let (status, message) = match result {
            Ok(()) => (OutcomeStatus::Passed, None),
            Err(RuleError::Violation(message)) => (OutcomeStatus::Violation, Some(message)),
            Err(RuleError::Misconfigured(message)) => (OutcomeStatus::Misconfigured, Some(message)),
        };

        Self {
            rule: rule.into(),
            cache_id,
            status,
            message,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == OutcomeStatus::Passed
    }

    /// Format the outcome for terminal output.
    pub fn format(&self) -> String {
        let (prefix, name_style) = match self.status {
            OutcomeStatus::Passed => (style("✓").green().bold(), Style::new().green()),
            OutcomeStatus::Violation => (style("✗").red().bold(), Style::new().red()),
            OutcomeStatus::Misconfigured => (style("⚠").yellow().bold(), Style::new().yellow()),
        };

        let mut output = format!("{} {}", prefix, name_style.apply_to(&self.rule));

        if let Some(ref message) = self.message {
            for line in message.lines() {
                output.push_str(&format!("\n  {} {}", style("→").dim(), line));
            }
        }

        output
    }
}

/// Result of running a set of rules.
#[derive(Debug, Clone)]
pub struct EnforcementResult {
    /// Outcomes in execution order.
    pub outcomes: Vec<RuleOutcome>,
    /// Rules not executed because an earlier rule failed in fail-fast mode.
    pub skipped: usize,
    /// When the rules were executed.
    pub checked_at: DateTime<Utc>,
}

impl EnforcementResult {
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            skipped: 0,
            checked_at: Utc::now(),
        }
    }

    /// Check if every executed rule passed.
    pub fn is_successful(&self) -> bool {
        self.outcomes.iter().all(RuleOutcome::is_passed)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_passed()).count()
    }

    /// Total number of rules, executed or skipped.
    pub fn total(&self) -> usize {
        self.outcomes.len() + self.skipped
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    fn print_text(&self) {
        for outcome in &self.outcomes {
            println!("{}", outcome.format());
        }
        println!("{}", self.summary());
    }

    fn print_json(&self) {
        println!(
            "{}",
            serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
        );
    }

    /// JSON representation of the result.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": self.is_successful(),
            "checked_at": self.checked_at.to_rfc3339(),
            "skipped": self.skipped,
            "rules": self.outcomes.iter().map(|o| {
                serde_json::json!({
                    "rule": o.rule,
                    "cache_id": o.cache_id,
                    "status": o.status.as_str(),
                    "message": o.message,
                })
            }).collect::<Vec<_>>(),
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_successful() {
            format!("All {} rules passed", self.outcomes.len())
        } else if self.skipped > 0 {
            format!(
                "{} of {} rules failed ({} skipped)",
                self.failed_count(),
                self.total(),
                self.skipped
            )
        } else {
            format!("{} of {} rules failed", self.failed_count(), self.total())
        }
    }
}

impl Default for EnforcementResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_successful() {
        let result = EnforcementResult::new();
        assert!(result.is_successful());
        assert_eq!(result.summary(), "All 0 rules passed");
    }

    #[test]
    fn test_outcome_from_result() {
        let passed = RuleOutcome::from_result("a", None, Ok(()));
        assert!(passed.is_passed());
        assert!(passed.message.is_none());

        let violated =
            RuleOutcome::from_result("b", None, Err(RuleError::Violation("nope".to_string())));
        assert_eq!(violated.status, OutcomeStatus::Violation);
        assert_eq!(violated.message.as_deref(), Some("nope"));

        let broken = RuleOutcome::from_result(
            "c",
            Some("id".to_string()),
            Err(RuleError::Misconfigured("bad".to_string())),
        );
        assert_eq!(broken.status, OutcomeStatus::Misconfigured);
    }

    #[test]
    fn test_summary_with_failures() {
        let mut result = EnforcementResult::new();
        result.outcomes.push(RuleOutcome::from_result("a", None, Ok(())));
        result.outcomes.push(RuleOutcome::from_result(
            "b",
            None,
            Err(RuleError::Violation("nope".to_string())),
        ));
        assert!(!result.is_successful());
        assert_eq!(result.summary(), "1 of 2 rules failed");

        result.skipped = 2;
        assert_eq!(result.summary(), "1 of 4 rules failed (2 skipped)");
    }

    #[test]
    fn test_outcome_format() {
        let outcome = RuleOutcome::from_result(
            "Banned dependencies",
            None,
            Err(RuleError::Violation("first\nsecond".to_string())),
        );
        let formatted = outcome.format();
        assert!(formatted.contains("Banned dependencies"));
        assert!(formatted.contains("first"));
        assert!(formatted.contains("second"));
    }

    #[test]
    fn test_json() {
        let mut result = EnforcementResult::new();
        result.outcomes.push(RuleOutcome::from_result(
            "Environment variable",
            None,
            Err(RuleError::Violation("missing".to_string())),
        ));
        let json = result.to_json();
        assert_eq!(json["success"], false);
        assert_eq!(json["rules"][0]["status"], "violation");
        assert_eq!(json["rules"][0]["message"], "missing");
    }
}

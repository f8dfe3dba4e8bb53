// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for enforcer.
//!
//! Pattern and version errors are raised by the matching core, rule
//! errors by rule execution, and everything converges on [`EnforcerError`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for enforcer operations.
#[derive(Error, Debug)]
pub enum EnforcerError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Pattern construction errors
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] PatternError),

    // Pattern evaluation errors
    #[error("Pattern evaluation failed: {0}")]
    Match(#[from] MatchError),

    // Rule errors
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Enforcement failed: {failed} of {total} rules did not pass")]
    EnforcementFailed { failed: usize, total: usize },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Errors raised while compiling an artifact pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is missing")]
    Missing,

    #[error("pattern '{pattern}' contains too many delimiters")]
    TooManyDelimiters { pattern: String },

    #[error("pattern '{pattern}' or one of its parts is empty")]
    EmptySegment { pattern: String },

    #[error("pattern '{pattern}' segment '{segment}' cannot be compiled: {message}")]
    InvalidSegment {
        pattern: String,
        segment: String,
        message: String,
    },
}

/// Errors raised while evaluating a pattern against a coordinate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("pattern '{pattern}' has an invalid version range: {source}")]
    InvalidVersionRange {
        pattern: String,
        #[source]
        source: VersionError,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Version range specification errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Unbounded range: {spec}")]
    UnboundedRange { spec: String },

    #[error("Single version must be surrounded by []: {spec}")]
    SingleVersionNotClosed { spec: String },

    #[error("Range cannot have identical boundaries: {spec}")]
    IdenticalBoundaries { spec: String },

    #[error("Range defies version ordering: {spec}")]
    BoundsOutOfOrder { spec: String },

    #[error("Ranges overlap: {spec}")]
    RangesOverlap { spec: String },

    #[error("Only fully-qualified sets allowed in multiple set scenario: {spec}")]
    MixedSet { spec: String },
}

/// Outcome of a rule that did not pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The enforced condition does not hold; the build must fail.
    #[error("{0}")]
    Violation(String),

    /// The rule itself is set up incorrectly.
    #[error("{0}")]
    Misconfigured(String),
}

impl RuleError {
    /// Whether the error is a violation of the enforced condition.
    pub fn is_violation(&self) -> bool {
        matches!(self, RuleError::Violation(_))
    }
}

/// Result type alias for enforcer operations.
pub type Result<T> = std::result::Result<T, EnforcerError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EnforcerError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Enforcer rules.
//!
//! Each rule is an independent check implementing [`Rule`]. Rules read
//! what they need from a [`RuleContext`] and are run by the [`RuleEngine`].

mod builtin;
mod checksum;
mod context;
mod dependencies;
mod engine;
mod environment;
mod outcome;

pub use builtin::{configured_rules, Rule};
pub use checksum::{
    HashType, LineSeparator, RequireFileChecksum, RequireTextFileChecksum, TextEncoding,
};
pub use context::{ProcessEnvironment, PropertySource, RuleContext};
pub use dependencies::BannedDependencies;
pub use engine::RuleEngine;
pub use environment::RequireEnvironmentVariable;
pub use outcome::{EnforcementResult, OutcomeStatus, RuleOutcome};

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Enforcer - build-time rule checks
//!
//! Matches Maven-style artifact coordinates against glob and version-range
//! patterns, and runs the rules built on top of them.
//!
//! # Features
//!
//! - **Artifact Matching**: `group[:artifact[:version[:type[:scope[:classifier]]]]]`
//!   patterns with `*`/`?` wildcards and version ranges
//! - **Version Ranges**: Maven ordering and `[1.0,2.0)` style restrictions
//! - **Environment Rule**: Require a variable, optionally matching a regex
//! - **Checksum Rules**: Verify files, optionally after line-ending normalization
//! - **Banned Dependencies**: Fail on dependencies matching exclude patterns
//!
//! # Example
//!
//! ```
//! use enforcer::artifact::{Artifact, ArtifactMatcher};
//!
//! let matcher = ArtifactMatcher::new(
//!     ["org.apache.logging.log4j:log4j-core:(,2.17.1)"],
//!     ["org.apache.logging.log4j:log4j-core:[2.12.4]"],
//! )
//! .unwrap();
//!
//! let artifact = Artifact::new("org.apache.logging.log4j", "log4j-core", "2.14.0");
//! assert!(matcher.matches(&artifact).unwrap());
//!
//! let patched = Artifact::new("org.apache.logging.log4j", "log4j-core", "2.12.4");
//! assert!(!matcher.matches(&patched).unwrap());
//! ```

// Module declarations
pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod rules;
pub mod version;

// Re-exports for convenience
pub use artifact::{Artifact, ArtifactMatcher, Pattern};
pub use config::EnforcerConfig;
pub use error::{EnforcerError, Result};
pub use version::{ArtifactVersion, VersionRange};

/// Build information embedded at compile time.
pub mod build_info {
    /// The current version of enforcer.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        let short = GIT_SHA.map(|sha| &sha[..7.min(sha.len())]);
        match (short, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => format!("{} ({} {})", VERSION, sha, date),
            (Some(sha), None) => format!("{} ({})", VERSION, sha),
            _ => VERSION.to_string(),
        }
    }

}

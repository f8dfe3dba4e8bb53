// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Execution context handed to rules.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::artifact::Artifact;

/// Lookup of named values such as environment variables.
pub trait PropertySource: Send + Sync {
    /// Get the value of `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl PropertySource for ProcessEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl PropertySource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Everything a rule may inspect while it runs.
pub struct RuleContext {
    environment: Box<dyn PropertySource>,
    dependencies: Vec<Artifact>,
    base_dir: PathBuf,
}

impl RuleContext {
    /// Create a context rooted at `base_dir`, reading the process environment.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            environment: Box::new(ProcessEnvironment),
            dependencies: Vec::new(),
            base_dir: base_dir.into(),
        }
    }

    /// Replace the environment lookup.
    pub fn with_environment(mut self, environment: impl PropertySource + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// Set the project's resolved dependencies.
    pub fn with_dependencies(mut self, dependencies: Vec<Artifact>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn environment(&self) -> &dyn PropertySource {
        self.environment.as_ref()
    }

    pub fn dependencies(&self) -> &[Artifact] {
        &self.dependencies
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a possibly relative path against the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl std::fmt::Debug for RuleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleContext")
            .field("dependencies", &self.dependencies.len())
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration discovery and loading.

use crate::error::{ConfigError, EnforcerError, Result};
use std::path::{Path, PathBuf};

use super::schema::EnforcerConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["enforcer.toml", ".enforcer.toml", ".config/enforcer.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    // XDG config directory
    let config_dir = dirs::config_dir()?;
    let user_config = config_dir.join("enforcer").join("config.toml");
    user_config.exists().then_some(user_config)
}

/// Load configuration from `explicit`, or from the default locations when
/// no path is given. Also returns the file the configuration came from.
pub fn load_config(explicit: Option<&Path>) -> Result<(EnforcerConfig, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    match path {
        Some(path) => {
            let config = load_config_from(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok((EnforcerConfig::default(), None))
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<EnforcerConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(EnforcerError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        EnforcerError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<EnforcerConfig> {
    let config: EnforcerConfig = toml::from_str(content).map_err(|e| {
        EnforcerError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    validate_config(&config)?;
    tracing::debug!("Loaded {} rules", config.rule_count());

    Ok(config)
}

/// Reject declarations that can never run.
fn validate_config(config: &EnforcerConfig) -> Result<()> {
    for (index, rule) in config.rules.banned_dependencies.iter().enumerate() {
        if rule.excludes.is_empty() && !rule.includes.is_empty() {
            tracing::warn!(
                "rules.banned_dependencies[{}] has includes but no excludes and never matches",
                index
            );
        }
        for pattern in rule.excludes.iter().chain(&rule.includes) {
            if pattern.trim().is_empty() {
                continue;
            }
            crate::artifact::Pattern::new(pattern).map_err(|e| {
                EnforcerError::Config(ConfigError::InvalidValue {
                    key: format!("rules.banned_dependencies[{}]", index),
                    message: e.to_string(),
                })
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::LineSeparator;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.rule_count(), 0);
        assert!(!config.settings.fail_fast);
    }

    #[test]
    fn test_parse_rules() {
        let toml = r#"
[settings]
fail_fast = true

[[rules.require_environment_variable]]
variable_name = "JAVA_HOME"
regex = ".*jdk.*"

[[rules.require_text_file_checksum]]
file = "LICENSE"
checksum = "4fcc82a88ee38e0aa16c17f512c685c9"
type = "md5"
normalize_line_separator_to = "windows"

[[rules.banned_dependencies]]
excludes = ["org.apache.logging.log4j:log4j-core:(,2.17.1)"]
includes = ["org.apache.logging.log4j:log4j-core:[2.12.4]"]
"#;
        let config = parse_config(toml).unwrap();
        assert!(config.settings.fail_fast);
        assert_eq!(config.rule_count(), 3);

        let env = &config.rules.require_environment_variable[0];
        assert_eq!(env.variable_name.as_deref(), Some("JAVA_HOME"));
        assert_eq!(env.regex.as_deref(), Some(".*jdk.*"));

        let checksum = &config.rules.require_text_file_checksum[0];
        assert_eq!(checksum.normalize_line_separator_to, LineSeparator::Windows);

        let banned = &config.rules.banned_dependencies[0];
        assert_eq!(banned.includes.len(), 1);
    }

    #[test]
    fn test_parse_dependencies() {
        let toml = r#"
[[dependencies]]
group_id = "org.example"
artifact_id = "lib"
version = "1.0"
scope = "test"

[[dependencies]]
group_id = "org.example"
artifact_id = "natives"
version = "1.0"
type = "zip"
classifier = "linux"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.dependencies.len(), 2);
        assert_eq!(config.dependencies[0].artifact_type, "jar");
        assert_eq!(config.dependencies[1].artifact_type, "zip");
        assert_eq!(config.dependencies[1].classifier.as_deref(), Some("linux"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let toml = r#"
[[rules.banned_dependencies]]
excludes = ["a:b:c:d:e:f:g"]
"#;
        let err = parse_config(toml).unwrap_err();
        assert!(err.to_string().contains("rules.banned_dependencies[0]"));
    }

    #[test]
    fn test_blank_patterns_are_ignored() {
        let toml = r#"
[[rules.banned_dependencies]]
excludes = ["org.foo", "   "]
includes = [""]
"#;
        assert!(parse_config(toml).is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            parse_config("[settings"),
            Err(EnforcerError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config_from(Path::new("/nonexistent/enforcer.toml")).unwrap_err();
        assert!(matches!(
            err,
            EnforcerError::Config(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_config_reports_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[settings]\nfail_fast = true\n").unwrap();

        let (config, source) = load_config(Some(&path)).unwrap();
        assert!(config.settings.fail_fast);
        assert_eq!(source, Some(path));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(EnforcerError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("enforcer.toml"), "").unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join("enforcer.toml"));
        assert!(load_config_from(&found).is_ok());
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::EnforcerConfig;

/// Get the default configuration.
pub fn default_config() -> EnforcerConfig {
    EnforcerConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# Enforcer Configuration File
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

[settings]
# Stop at the first failing rule
fail_fast = false

# The build needs a JDK
[[rules.require_environment_variable]]
variable_name = "JAVA_HOME"
message = "JAVA_HOME must point to a JDK"

# Only known deployment profiles
[[rules.require_environment_variable]]
variable_name = "DEPLOY_PROFILE"
regex = "dev|staging|prod"
regex_message = "DEPLOY_PROFILE must be one of dev, staging or prod"

# The license text must not change, whatever the checkout line endings
[[rules.require_text_file_checksum]]
file = "LICENSE"
checksum = "4fcc82a88ee38e0aa16c17f512c685c9"
type = "md5"
normalize_line_separator_to = "unix"
encoding = "UTF-8"
message = "LICENSE has been modified"

# Binary files are hashed as-is
[[rules.require_file_checksum]]
file = "gradle/wrapper/gradle-wrapper.jar"
checksum = "2751a3a2f303ad21752038085e2b8c5f98ecff61a2e4ebbd43506a941725be80"
type = "sha256"
nonexistent_file_message = "The wrapper jar is missing"

# Pattern: groupId[:artifactId[:version[:type[:scope[:classifier]]]]]
# `*` and `?` are wildcards; the version may be a range such as [1.0,2.0)
# and a bare version means "this version or newer".
[[rules.banned_dependencies]]
excludes = [
    "org.apache.logging.log4j:log4j-core:(,2.17.1)",
    "commons-logging",
    "*:*:*:jar:system",
]
includes = ["org.apache.logging.log4j:log4j-core:[2.12.4]"]
message = "Remove vulnerable or unwanted dependencies"

# Resolved dependencies checked by banned_dependencies
[[dependencies]]
group_id = "org.slf4j"
artifact_id = "slf4j-api"
version = "2.0.9"

[[dependencies]]
group_id = "junit"
artifact_id = "junit"
version = "4.13.2"
scope = "test"
"#
}

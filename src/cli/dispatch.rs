// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::path::{Path, PathBuf};

use crate::artifact::{ArtifactMatcher, Coordinate};
use crate::config::{load_config, EnforcerConfig};
use crate::error::{ConfigError, EnforcerError, Result, ResultExt};
use crate::rules::{RuleContext, RuleEngine};

use super::args::{CheckArgs, Cli, Commands, InitArgs, MatchArgs, OutputFormat};

/// Name of the file written by `init`.
const CONFIG_FILE_NAME: &str = "enforcer.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.effective_command() {
        Commands::Check(args) => run_check(&cli, args),
        Commands::Match(args) => run_match(&cli, args),
        Commands::Version => run_version(),
        Commands::Init(args) => run_init(args),
    }
}

/// Load the configuration and the directory it applies to.
fn resolve_config(cli: &Cli) -> Result<(EnforcerConfig, Option<PathBuf>)> {
    let (config, source) = load_config(cli.config.as_deref())?;
    let dir = source.as_deref().and_then(Path::parent).map(Path::to_path_buf);
    Ok((config, dir))
}

/// Run the check command.
fn run_check(cli: &Cli, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let (config, config_dir) = resolve_config(cli)?;

    let base_dir = match args.base_dir.or(config_dir) {
        Some(dir) => dir,
        None => std::env::current_dir().context("check")?,
    };

    let fail_fast = args.fail_fast || config.settings.fail_fast;
    let engine = RuleEngine::new(&config).with_fail_fast(fail_fast);
    let context = RuleContext::new(base_dir).with_dependencies(config.dependencies.clone());

    let result = engine.enforce(&context);
    result.print(cli.format);

    if result.is_successful() {
        Ok(())
    } else {
        Err(EnforcerError::EnforcementFailed {
            failed: result.failed_count(),
            total: result.total(),
        })
    }
}

/// Run the match command.
fn run_match(cli: &Cli, args: MatchArgs) -> Result<()> {
    tracing::debug!("Running match command with args: {:?}", args);

    let coordinate: Coordinate = args.coordinate.parse()?;
    let matcher = ArtifactMatcher::new(&args.excludes, &args.includes)?;
    let matched = matcher.matches(&coordinate)?;

    match cli.format {
        Some(OutputFormat::Json) => {
            let json = serde_json::json!({
                "coordinate": coordinate,
                "excludes": args.excludes,
                "includes": args.includes,
                "matches": matched,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        _ => println!("{}", matched),
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("enforcer {}", crate::build_info::version_string());

    if let Some(sha) = crate::build_info::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::build_info::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() && !args.force {
        return Err(EnforcerError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    std::fs::write(config_path, example_config()).context("init")?;

    println!("✓ Created {}", CONFIG_FILE_NAME);

    Ok(())
}

//! Command implementations for txlock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod contend;

use crate::cli::{Command, ContendArgs};
use std::path::Path;
use txlock::config::Config;
use txlock::error::{LockError, Result};

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    match command {
        Command::Contend(args) => cmd_contend(&config, &args),
        Command::Config => cmd_config(&config),
    }
}

/// Load the config file if one was given, otherwise use defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn cmd_contend(config: &Config, args: &ContendArgs) -> Result<()> {
    let report = contend::run_drill(config, args)?;

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| LockError::Config(format!("failed to serialize drill report: {}", e)))?;
    println!("{}", json);

    if report.violations > 0 {
        return Err(LockError::Violation(format!(
            "{} overlapping acquisition(s) observed",
            report.violations
        )));
    }
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}

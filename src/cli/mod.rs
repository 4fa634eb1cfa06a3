//! CLI argument parsing for txlock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// txlock: in-process named resource locks with transaction-deferred release.
///
/// The binary exercises the lock service: it can run a contention drill
/// against the configured semaphore and print the effective configuration.
#[derive(Parser, Debug)]
#[command(name = "txlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file (defaults apply when omitted).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for txlock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a contention drill against the configured semaphore.
    ///
    /// Spawns worker threads that repeatedly lock, touch and unlock a set of
    /// resource names, then prints a JSON report. Fails if two workers were
    /// ever seen inside the same resource at once.
    Contend(ContendArgs),

    /// Print the effective configuration as YAML.
    Config,
}

/// Arguments for the `contend` command.
#[derive(Parser, Debug)]
pub struct ContendArgs {
    /// Number of worker threads.
    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    /// Resource names to contend on (comma-separated).
    #[arg(long, value_delimiter = ',', default_value = "TRIGGER_ACCESS,STATE_ACCESS")]
    pub names: Vec<String>,

    /// Lock/unlock rounds per worker.
    #[arg(long, default_value_t = 100)]
    pub iterations: usize,

    /// Use the transactional semaphore and wrap every round in a transaction.
    #[arg(long)]
    pub transactional: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_contend_defaults() {
        let cli = Cli::try_parse_from(["txlock", "contend"]).unwrap();
        assert!(cli.config.is_none());
        if let Command::Contend(args) = cli.command {
            assert_eq!(args.threads, 4);
            assert_eq!(args.names, vec!["TRIGGER_ACCESS", "STATE_ACCESS"]);
            assert_eq!(args.iterations, 100);
            assert!(!args.transactional);
        } else {
            panic!("Expected Contend command");
        }
    }

    #[test]
    fn parse_contend_full() {
        let cli = Cli::try_parse_from([
            "txlock",
            "contend",
            "--threads",
            "8",
            "--names",
            "a,b,c",
            "--iterations",
            "10",
            "--transactional",
            "--config",
            "locks.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("locks.yaml")));
        if let Command::Contend(args) = cli.command {
            assert_eq!(args.threads, 8);
            assert_eq!(args.names, vec!["a", "b", "c"]);
            assert_eq!(args.iterations, 10);
            assert!(args.transactional);
        } else {
            panic!("Expected Contend command");
        }
    }

    #[test]
    fn parse_config() {
        let cli = Cli::try_parse_from(["txlock", "--config", "x.yaml", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
    }

    #[test]
    fn unknown_command_fails() {
        assert!(Cli::try_parse_from(["txlock", "claim"]).is_err());
    }
}

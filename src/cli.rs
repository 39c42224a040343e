// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `stalecheck`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stalecheck",
    version,
    about = "Decide whether output files are stale relative to their inputs.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STALECHECK_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the modification time and path of every matched file.
    Times {
        /// Comma-delimited absolute globs (escape literal commas as `\,`).
        globs: String,
    },

    /// Print the path of every matched file.
    Files {
        /// Comma-delimited absolute globs (escape literal commas as `\,`).
        globs: String,
    },

    /// Print `true` and exit with status 1 if the outputs are stale.
    Outdated {
        /// Input glob list.
        inputs: String,
        /// Output glob list.
        outputs: String,
    },

    /// Remove every matched regular file.
    Delete {
        /// Comma-delimited absolute globs (escape literal commas as `\,`).
        globs: String,

        /// Print what would be removed without removing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Evaluate rules from the rule file; exit with status 1 if any is stale.
    Check {
        /// Path to the rule file (TOML).
        ///
        /// Default: `$STALECHECK_CONFIG`, else `Stalecheck.toml`.
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Rules to evaluate (default: all).
        #[arg(value_name = "RULE")]
        rules: Vec<String>,
    },

    /// Remove the outputs of rules from the rule file.
    Clean {
        /// Path to the rule file (TOML).
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Print what would be removed without removing it.
        #[arg(long)]
        dry_run: bool,

        /// Rules to clean (default: all).
        #[arg(value_name = "RULE")]
        rules: Vec<String>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

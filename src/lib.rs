// src/lib.rs

//! Modification-time based freshness checks for glob-matched files.
//!
//! The four core operations work on comma-delimited lists of absolute
//! globs (see [`glob::split_glob_list`] for the escaping rules):
//!
//! - [`time_globber`]: modification times of matched regular files.
//! - [`file_globber`]: paths of matched regular files.
//! - [`outdated`]: whether outputs are stale relative to inputs.
//! - [`delete_files`]: remove matched regular files.
//!
//! Each has a counterpart taking a [`fs::FileSystem`] in its own module.

pub mod cli;
pub mod config;
pub mod delete;
pub mod errors;
pub mod freshness;
pub mod fs;
pub mod glob;
pub mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::{default_config_path, load_and_validate, ConfigFile, RuleConfig};
use crate::errors::StalecheckError;
use crate::freshness::epoch_seconds;
use crate::fs::{FileSystem, RealFileSystem};

pub use crate::freshness::Freshness;

/// Modification times of the regular files matched by `globs`.
pub fn time_globber(globs: &str) -> errors::Result<Vec<SystemTime>> {
    glob::mod_times(&RealFileSystem, globs)
}

/// Paths of the regular files matched by `globs`.
pub fn file_globber(globs: &str) -> errors::Result<Vec<PathBuf>> {
    glob::matched_paths(&RealFileSystem, globs)
}

/// True if the newest input is newer than the oldest output, or if inputs
/// match but outputs do not.
pub fn outdated(input_globs: &str, output_globs: &str) -> errors::Result<bool> {
    freshness::outdated(&RealFileSystem, input_globs, output_globs)
}

/// Remove the regular files matched by `globs`.
pub fn delete_files(globs: &str) -> errors::Result<()> {
    delete::delete_files(&RealFileSystem, globs)
}

/// Result of a successful CLI run, mapped to the exit status by `main.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    /// `outdated` / `check` found stale outputs.
    Stale,
}

/// High-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> Result<RunOutcome> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(args, &mut out)
}

/// Run a command against the real filesystem, writing results to `out`.
pub fn run_with(args: CliArgs, out: &mut dyn Write) -> Result<RunOutcome> {
    let fs = RealFileSystem;

    match args.command {
        Command::Times { globs } => {
            for file in glob::resolve(&fs, &globs)? {
                writeln!(out, "{:.6}\t{}", epoch_seconds(file.modified), file.path.display())?;
            }
            Ok(RunOutcome::Success)
        }
        Command::Files { globs } => {
            for path in glob::matched_paths(&fs, &globs)? {
                writeln!(out, "{}", path.display())?;
            }
            Ok(RunOutcome::Success)
        }
        Command::Outdated { inputs, outputs } => {
            let verdict = freshness::freshness(&fs, &inputs, &outputs)?;
            writeln!(out, "{}", verdict.is_outdated())?;
            Ok(outcome_of(verdict.is_outdated()))
        }
        Command::Delete { globs, dry_run } => {
            remove_or_report(&fs, &globs, dry_run, out)?;
            Ok(RunOutcome::Success)
        }
        Command::Check { config, rules } => {
            let cfg = load_config(config.as_deref())?;
            let mut any_stale = false;
            for (name, rule) in select_rules(&cfg, &rules)? {
                let verdict =
                    freshness::freshness(&fs, &rule.input_globs(), &rule.output_globs())
                        .with_context(|| format!("checking rule '{name}'"))?;
                any_stale |= verdict.is_outdated();
                match &rule.description {
                    Some(desc) => writeln!(out, "{name}: {verdict}  # {desc}")?,
                    None => writeln!(out, "{name}: {verdict}")?,
                }
            }
            Ok(outcome_of(any_stale))
        }
        Command::Clean {
            config,
            dry_run,
            rules,
        } => {
            let cfg = load_config(config.as_deref())?;
            for (name, rule) in select_rules(&cfg, &rules)? {
                debug!(rule = %name, "cleaning outputs");
                remove_or_report(&fs, &rule.output_globs(), dry_run, out)
                    .with_context(|| format!("cleaning rule '{name}'"))?;
            }
            Ok(RunOutcome::Success)
        }
    }
}

fn outcome_of(stale: bool) -> RunOutcome {
    if stale {
        RunOutcome::Stale
    } else {
        RunOutcome::Success
    }
}

fn remove_or_report(
    fs: &dyn FileSystem,
    globs: &str,
    dry_run: bool,
    out: &mut dyn Write,
) -> Result<()> {
    if dry_run {
        for path in delete::plan_deletion(fs, globs)? {
            writeln!(out, "would remove {}", path.display())?;
        }
    } else {
        delete::delete_files(fs, globs)?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ConfigFile> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    load_and_validate(&path).with_context(|| format!("loading rule file {:?}", path))
}

/// Pick the named rules, or every rule when `names` is empty.
fn select_rules<'a>(
    cfg: &'a ConfigFile,
    names: &'a [String],
) -> errors::Result<Vec<(&'a str, &'a RuleConfig)>> {
    if names.is_empty() {
        return Ok(cfg
            .rules()
            .iter()
            .map(|(name, rule)| (name.as_str(), rule))
            .collect());
    }

    names
        .iter()
        .map(|name| {
            cfg.rule(name)
                .map(|rule| (name.as_str(), rule))
                .ok_or_else(|| StalecheckError::ConfigError(format!("unknown rule '{name}'")))
        })
        .collect()
}

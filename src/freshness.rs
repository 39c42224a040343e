// src/freshness.rs

//! Staleness rule: outputs are fresh only if no input is newer than the
//! oldest output.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::glob::mod_times;

/// Verdict of comparing an input file set with an output file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No input file matched; nothing can make the outputs stale.
    NoInputs,
    /// Inputs exist but no output file matched.
    MissingOutputs,
    /// The newest input is strictly newer than the oldest output.
    Stale {
        newest_input: SystemTime,
        oldest_output: SystemTime,
    },
    UpToDate {
        newest_input: SystemTime,
        oldest_output: SystemTime,
    },
}

impl Freshness {
    /// Apply the rule to already collected modification times.
    pub fn evaluate(inputs: &[SystemTime], outputs: &[SystemTime]) -> Self {
        let Some(&newest_input) = inputs.iter().max() else {
            return Freshness::NoInputs;
        };
        let Some(&oldest_output) = outputs.iter().min() else {
            return Freshness::MissingOutputs;
        };

        if newest_input > oldest_output {
            Freshness::Stale {
                newest_input,
                oldest_output,
            }
        } else {
            Freshness::UpToDate {
                newest_input,
                oldest_output,
            }
        }
    }

    pub fn is_outdated(&self) -> bool {
        matches!(self, Freshness::MissingOutputs | Freshness::Stale { .. })
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freshness::NoInputs => write!(f, "up to date (no inputs)"),
            Freshness::MissingOutputs => write!(f, "outdated (no outputs)"),
            Freshness::Stale {
                newest_input,
                oldest_output,
            } => write!(
                f,
                "outdated (newest input {:.6} > oldest output {:.6})",
                epoch_seconds(*newest_input),
                epoch_seconds(*oldest_output)
            ),
            Freshness::UpToDate {
                newest_input,
                oldest_output,
            } => write!(
                f,
                "up to date (newest input {:.6} <= oldest output {:.6})",
                epoch_seconds(*newest_input),
                epoch_seconds(*oldest_output)
            ),
        }
    }
}

/// Seconds since the Unix epoch as a float; negative before 1970.
pub fn epoch_seconds(t: SystemTime) -> f64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

/// Compare the files matched by two glob lists.
pub fn freshness(fs: &dyn FileSystem, input_globs: &str, output_globs: &str) -> Result<Freshness> {
    let intimes = mod_times(fs, input_globs)?;
    debug!(times = ?seconds(&intimes), "input times");
    let outtimes = mod_times(fs, output_globs)?;
    debug!(times = ?seconds(&outtimes), "output times");

    let verdict = Freshness::evaluate(&intimes, &outtimes);
    debug!(%verdict, "freshness");
    Ok(verdict)
}

/// True if any input is newer than any output, or inputs exist without
/// outputs.
pub fn outdated(fs: &dyn FileSystem, input_globs: &str, output_globs: &str) -> Result<bool> {
    Ok(freshness(fs, input_globs, output_globs)?.is_outdated())
}

fn seconds(times: &[SystemTime]) -> Vec<f64> {
    times.iter().copied().map(epoch_seconds).collect()
}

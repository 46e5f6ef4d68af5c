//! Command-line arguments.
//!
//! The positional interface (`covdiag [LEVEL [PREPATH]]`) is what build
//! scripts pipe gcovr output into, so it is resolved into `Options` here and
//! kept separate from the binary for testing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use crate::error::{CovdiagError, Result};

/// Turn a Cobertura coverage report into compiler-style diagnostics.
///
/// Usage: gcovr --xml | covdiag [LEVEL [PREPATH]]
#[derive(Parser, Debug)]
#[command(name = "covdiag", version, about)]
pub struct Cli {
    /// Severity threshold: 0 = errors, 1 = errors and warnings (default),
    /// 2 = errors, warnings and info.
    #[arg(allow_negative_numbers = true)]
    pub level: Option<i64>,

    /// Directory prepended to relative file names found in the report.
    pub prepath: Option<String>,

    /// Read the report from this file instead of stdin.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Which diagnostics are reported. Ordered from least to most verbose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Errors only.
    Error,
    /// Errors and uncovered branches.
    #[default]
    Warning,
    /// Everything, uncovered statements included.
    Info,
}

impl Level {
    /// Map a numeric threshold. Values past either end clamp to it.
    #[must_use]
    pub fn from_threshold(threshold: i64) -> Self {
        match threshold {
            i64::MIN..=0 => Level::Error,
            1 => Level::Warning,
            _ => Level::Info,
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub level: Level,
    /// Empty, or a directory ending in exactly one '/'.
    pub prefix: String,
    pub input: Option<PathBuf>,
    pub verbose: bool,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Self {
            level: cli.level.map(Level::from_threshold).unwrap_or_default(),
            prefix: cli.prepath.as_deref().map(dir_prefix).unwrap_or_default(),
            input: cli.input,
            verbose: cli.verbose,
        }
    }
}

/// Parse process-style arguments (program name first).
///
/// More positionals than `LEVEL PREPATH` is a usage error. Any other clap
/// failure, including a non-numeric LEVEL and `--help`, comes back as
/// `CovdiagError::Cli` for the caller to render.
pub fn resolve<I, T>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::UnknownArgument => CovdiagError::InvalidArgument,
        _ => CovdiagError::Cli(e),
    })?;
    Ok(cli.into())
}

fn dir_prefix(prepath: &str) -> String {
    format!("{}/", prepath.trim_end_matches('/'))
}

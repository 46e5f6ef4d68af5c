use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use covdiag::error::CovdiagError;
use covdiag::parsers::cobertura::CoberturaParser;
use covdiag::parsers::Parser;
use covdiag::{cli, report};

fn main() -> Result<ExitCode> {
    let options = match cli::resolve(std::env::args_os()) {
        Ok(options) => options,
        Err(CovdiagError::InvalidArgument) => {
            println!("Invalid argument");
            return Ok(ExitCode::from(255));
        }
        Err(CovdiagError::Cli(e)) => e.exit(),
        Err(e) => return Err(e.into()),
    };

    // Logs go to stderr; stdout carries only the diagnostics.
    let default_filter = if options.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let input = match &options.input {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read coverage report {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read coverage report from stdin")?;
            buf
        }
    };

    let report = CoberturaParser
        .parse(&input)
        .context("Failed to parse coverage report")?;

    let mut out = io::BufWriter::new(io::stdout().lock());
    report::emit(&report, &options, &mut out).context("Failed to write diagnostics")?;
    out.flush().context("Failed to write diagnostics")?;

    Ok(ExitCode::SUCCESS)
}

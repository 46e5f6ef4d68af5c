//! Compiler-style diagnostics (`path:line: severity: message`) and the rules
//! that decide which line records produce one.

use std::fmt;

use tracing::warn;

use crate::cli::Level;
use crate::model::{ConditionCoverage, LineRecord};
use crate::source::SourceText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic line. Printed as soon as it is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    /// Absent for diagnostics about the file as a whole.
    pub line: Option<u32>,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// The file-level error for a source file that cannot be read.
    #[must_use]
    pub fn unreadable(file: &str) -> Self {
        Self {
            file: file.to_string(),
            line: None,
            severity: Severity::Error,
            message: "Could not open file".to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}: {}", self.file, line, self.severity, self.message),
            None => write!(f, "{}: {}: {}", self.file, self.severity, self.message),
        }
    }
}

/// Decide what, if anything, to report for one line record.
///
/// - With `Level::Info`, a line that was never executed is an uncovered
///   statement.
/// - Otherwise, with `Level::Warning` or above, an executed branch line with
///   outcomes left unexercised is an uncovered branch.
///
/// A record that would be reported but points past the end of the source, or
/// whose condition-coverage text cannot be read, yields a warning about that
/// instead.
#[must_use]
pub fn classify(
    file: &str,
    record: &LineRecord,
    source: &SourceText,
    level: Level,
) -> Option<Diagnostic> {
    let diagnostic = |severity, message| Diagnostic {
        file: file.to_string(),
        line: Some(record.number),
        severity,
        message,
    };
    let out_of_range = || {
        warn!(file, line = record.number, lines = source.len(), "line out of range");
        diagnostic(
            Severity::Warning,
            format!("Line out of range (source has {} lines)", source.len()),
        )
    };

    if level >= Level::Info && record.hits == 0 {
        let Some(text) = source.line(record.number) else {
            return Some(out_of_range());
        };
        return Some(diagnostic(
            Severity::Info,
            format!("Uncovered statement: {}", text),
        ));
    }

    if level >= Level::Warning && record.hits > 0 && record.is_branch {
        let raw = record.condition_coverage.as_deref().unwrap_or("");
        let coverage = match raw.parse::<ConditionCoverage>() {
            Ok(coverage) => coverage,
            Err(e) => {
                warn!(file, line = record.number, "{}", e);
                return Some(diagnostic(
                    Severity::Warning,
                    format!("Malformed condition coverage: {}", raw),
                ));
            }
        };
        if coverage.uncovered() == 0 {
            return None;
        }
        let Some(text) = source.line(record.number) else {
            return Some(out_of_range());
        };
        return Some(diagnostic(
            Severity::Warning,
            format!(
                "Uncovered branch ({}/{}): {}",
                coverage.uncovered(),
                coverage.total,
                text
            ),
        ));
    }

    None
}

//! Output of a whole report: per-file headers, diagnostics and the summary
//! block of each coverage group.

use std::io::Write;

use tracing::{debug, warn};

use crate::cli::Options;
use crate::diagnostic::{classify, Diagnostic};
use crate::error::Result;
use crate::model::{ClassEntry, Counters, CoverageGroup, Report};
use crate::source::{resolve_path, SourceText};

/// Write every group of `report` to `out` and return the final counters.
///
/// Counters run across the whole report: each group's summary shows the
/// totals of every file seen so far, not only its own.
pub fn emit<W: Write>(report: &Report, options: &Options, out: &mut W) -> Result<Counters> {
    let mut counters = Counters::default();

    for (index, group) in report.groups.iter().enumerate() {
        debug!(group = index, files = group.classes.len(), "processing coverage group");
        for class in &group.classes {
            emit_class(class, options, &mut counters, out)?;
        }
        write!(out, "{}", format_summary(group, &counters))?;
    }

    Ok(counters)
}

/// One file entry. A source file that cannot be read produces a single error
/// line and nothing else: no header, no diagnostics, no counts.
fn emit_class<W: Write>(
    class: &ClassEntry,
    options: &Options,
    counters: &mut Counters,
    out: &mut W,
) -> Result<()> {
    let path = resolve_path(&class.filename, &options.prefix);
    let source = match SourceText::read(&path) {
        Ok(source) => source,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not open source file");
            writeln!(out, "{}", Diagnostic::unreadable(&class.filename))?;
            return Ok(());
        }
    };
    debug!(
        path = %path.display(),
        records = class.lines.len(),
        source_lines = source.len(),
        "processing file"
    );

    writeln!(out, "{}", format_file_header(class))?;

    for line in &class.lines {
        counters.record(line);
    }

    for line in class.sorted_lines() {
        if let Some(diagnostic) = classify(&class.filename, line, &source, options.level) {
            writeln!(out, "{}", diagnostic)?;
        }
    }

    Ok(())
}

/// Per-file line with the rates reported upstream, as whole percentages.
#[must_use]
pub fn format_file_header(class: &ClassEntry) -> String {
    format!(
        "File: {:<50} Line: {:>3.0}% Branch: {:>3.0}%",
        class.filename,
        class.line_rate * 100.0,
        class.branch_rate * 100.0
    )
}

/// Summary block for one group: running totals plus the group's own rates.
#[must_use]
pub fn format_summary(group: &CoverageGroup, counters: &Counters) -> String {
    format!(
        "            {:>10} {:>10}\n\
         Total:      {:>10} {:>10}\n\
         Uncovered:  {:>9.2}% {:>9.2}%\n",
        "Lines",
        "Branches",
        counters.lines,
        counters.branches,
        group.line_rate * 100.0,
        group.branch_rate * 100.0
    )
}

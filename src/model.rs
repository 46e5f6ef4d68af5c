//! In-memory representation of a Cobertura report. Parsers produce a
//! `Report` once; nothing in it is mutated afterwards. The only state that
//! changes while a report is being emitted is the running `Counters`.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CovdiagError;

/// Pre-compiled regex for condition-coverage attributes like "75% (3/4)".
static CONDITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\S+\s+\(*(\d+)/(\d+)\)*(?:\s|$)").unwrap());

/// The whole parsed document.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub groups: Vec<CoverageGroup>,
}

/// One `<coverage>` element with its overall rates.
#[derive(Debug, Clone, Default)]
pub struct CoverageGroup {
    pub line_rate: f64,
    pub branch_rate: f64,
    pub classes: Vec<ClassEntry>,
}

/// One `<class>` element: a single source file.
#[derive(Debug, Clone, Default)]
pub struct ClassEntry {
    /// File name exactly as written in the report.
    pub filename: String,
    pub line_rate: f64,
    pub branch_rate: f64,
    /// Line records in document order.
    pub lines: Vec<LineRecord>,
}

impl ClassEntry {
    /// Line records ordered by line number. The sort is stable, so records
    /// sharing a number keep their document order.
    #[must_use]
    pub fn sorted_lines(&self) -> Vec<&LineRecord> {
        let mut lines: Vec<&LineRecord> = self.lines.iter().collect();
        lines.sort_by_key(|l| l.number);
        lines
    }
}

/// A single `<line>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// 1-based line number in the source file.
    pub number: u32,
    pub hits: u64,
    pub is_branch: bool,
    /// Raw `condition-coverage` text, e.g. "50% (1/2)".
    pub condition_coverage: Option<String>,
}

/// Covered/total branch outcomes for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionCoverage {
    pub covered: u32,
    pub total: u32,
}

impl ConditionCoverage {
    #[must_use]
    pub fn uncovered(&self) -> u32 {
        self.total - self.covered
    }
}

impl FromStr for ConditionCoverage {
    type Err = CovdiagError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let malformed = || CovdiagError::Parse(format!("Malformed condition coverage: '{}'", s));

        let caps = CONDITION_RE.captures(s).ok_or_else(malformed)?;
        let covered: u32 = caps[1].parse().map_err(|_| malformed())?;
        let total: u32 = caps[2].parse().map_err(|_| malformed())?;
        if covered > total {
            return Err(malformed());
        }
        Ok(Self { covered, total })
    }
}

/// Running totals over every line record of every file that could be opened.
/// Never reset between coverage groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub lines: u64,
    pub branches: u64,
}

impl Counters {
    pub fn record(&mut self, line: &LineRecord) {
        self.lines += 1;
        if line.is_branch {
            self.branches += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(number: u32, is_branch: bool) -> LineRecord {
        LineRecord {
            number,
            hits: 1,
            is_branch,
            condition_coverage: None,
        }
    }

    #[test]
    fn test_condition_coverage() {
        let c: ConditionCoverage = "50% (1/2)".parse().unwrap();
        assert_eq!(c, ConditionCoverage { covered: 1, total: 2 });
        assert_eq!(c.uncovered(), 1);

        let c: ConditionCoverage = "100% (4/4)".parse().unwrap();
        assert_eq!(c.uncovered(), 0);

        let c: ConditionCoverage = "0% (0/0)".parse().unwrap();
        assert_eq!(c.uncovered(), 0);
    }

    #[test]
    fn test_condition_coverage_malformed() {
        assert!("".parse::<ConditionCoverage>().is_err());
        assert!("50%".parse::<ConditionCoverage>().is_err());
        assert!("50% (1-2)".parse::<ConditionCoverage>().is_err());
        assert!("50% (a/2)".parse::<ConditionCoverage>().is_err());
        // covered can never exceed total
        assert!("150% (3/2)".parse::<ConditionCoverage>().is_err());
    }

    #[test]
    fn test_sorted_lines_is_stable() {
        let mut dup = line(2, false);
        dup.hits = 7;
        let class = ClassEntry {
            filename: "a.c".to_string(),
            lines: vec![line(3, false), line(2, false), line(1, true), dup.clone()],
            ..Default::default()
        };

        let sorted = class.sorted_lines();
        let numbers: Vec<u32> = sorted.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 2, 3]);
        assert_eq!(sorted[1].hits, 1);
        assert_eq!(sorted[2].hits, 7);
    }

    #[test]
    fn test_counters() {
        let mut counters = Counters::default();
        counters.record(&line(1, false));
        counters.record(&line(2, true));
        counters.record(&line(3, true));
        assert_eq!(counters, Counters { lines: 3, branches: 2 });
    }
}

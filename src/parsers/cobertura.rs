/// Parser for Cobertura XML coverage reports, as written by gcovr and
/// coverage.py.
///
/// Cobertura XML structure:
///   <coverage line-rate="..." branch-rate="...">
///     <sources><source>...</source></sources>
///     <packages>
///       <package name="...">
///         <classes>
///           <class name="..." filename="..." line-rate="..." branch-rate="...">
///             <methods/>
///             <lines>
///               <line number="..." hits="..." branch="true|false"
///                     condition-coverage="50% (1/2)" />
///             </lines>
///           </class>
///         </classes>
///       </package>
///     </packages>
///   </coverage>
///
/// Nesting is not relied upon: every `<coverage>` in the document (the root
/// included) becomes a group, every `<class>` below a group becomes a file
/// entry, and every `<line>` below a class becomes a line record. A `<line>`
/// listed under both `<method>` and `<lines>` is therefore recorded twice.
use std::str::FromStr;

use crate::error::{CovdiagError, Result};
use crate::model::*;
use crate::parsers::tree::{parse_document, Element};
use crate::parsers::Parser;

pub struct CoberturaParser;

impl Parser for CoberturaParser {
    fn parse(&self, input: &[u8]) -> Result<Report> {
        parse_cobertura(input)
    }
}

fn parse_cobertura(input: &[u8]) -> Result<Report> {
    let root = parse_document(input)?;

    let groups = root
        .descendants("coverage")
        .into_iter()
        .map(coverage_group)
        .collect::<Result<Vec<_>>>()?;

    Ok(Report { groups })
}

fn coverage_group(coverage: &Element) -> Result<CoverageGroup> {
    let classes = coverage
        .descendants("class")
        .into_iter()
        .map(class_entry)
        .collect::<Result<Vec<_>>>()?;

    Ok(CoverageGroup {
        line_rate: required(coverage, "coverage", "line-rate")?,
        branch_rate: required(coverage, "coverage", "branch-rate")?,
        classes,
    })
}

fn class_entry(class: &Element) -> Result<ClassEntry> {
    let filename = class
        .attr("filename")
        .ok_or(CovdiagError::MissingAttribute {
            element: "class",
            attribute: "filename",
        })?
        .to_string();

    let lines = class
        .descendants("line")
        .into_iter()
        .map(line_record)
        .collect::<Result<Vec<_>>>()?;

    Ok(ClassEntry {
        filename,
        line_rate: required(class, "class", "line-rate")?,
        branch_rate: required(class, "class", "branch-rate")?,
        lines,
    })
}

fn line_record(line: &Element) -> Result<LineRecord> {
    Ok(LineRecord {
        number: required(line, "line", "number")?,
        hits: required(line, "line", "hits")?,
        // Anything other than the literal "true" (or no attribute at all)
        // marks a plain statement.
        is_branch: line.attr("branch") == Some("true"),
        condition_coverage: line.attr("condition-coverage").map(str::to_string),
    })
}

/// Fetch an attribute and parse it, failing the whole report if it is
/// missing or does not parse.
fn required<T: FromStr>(
    element: &Element,
    element_name: &'static str,
    attribute: &'static str,
) -> Result<T> {
    let value = element.attr(attribute).ok_or(CovdiagError::MissingAttribute {
        element: element_name,
        attribute,
    })?;
    value
        .trim()
        .parse()
        .map_err(|_| CovdiagError::InvalidAttribute {
            element: element_name,
            attribute,
            value: value.to_string(),
        })
}

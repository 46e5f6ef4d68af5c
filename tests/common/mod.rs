use std::path::Path;

use covdiag::cli::{Level, Options};
use covdiag::model::Counters;
use covdiag::parsers::cobertura::CoberturaParser;
use covdiag::parsers::Parser;
use tempfile::TempDir;

/// Create a temporary source tree, returning the dir handle and the prefix
/// (with trailing separator) that points at it.
/// The caller must hold onto `TempDir` to keep the temp directory alive.
pub fn setup_sources(files: &[(&str, &str)]) -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        write_source(dir.path(), name, contents);
    }
    let prefix = format!("{}/", dir.path().display());
    (dir, prefix)
}

pub fn write_source(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Parse `xml` and emit it, returning everything written and the final counters.
pub fn run(xml: &[u8], level: Level, prefix: &str) -> (String, Counters) {
    let report = CoberturaParser.parse(xml).unwrap();
    let options = Options {
        level,
        prefix: prefix.to_string(),
        ..Default::default()
    };
    let mut out = Vec::new();
    let counters = covdiag::report::emit(&report, &options, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), counters)
}

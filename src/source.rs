//! Locating and reading the source files a report refers to.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve a report filename to a readable path.
///
/// Absolute filenames are used as-is; anything else is joined onto `prefix`,
/// which is either empty or ends with a separator.
#[must_use]
pub fn resolve_path(filename: &str, prefix: &str) -> PathBuf {
    if filename.starts_with('/') {
        PathBuf::from(filename)
    } else {
        PathBuf::from(format!("{}{}", prefix, filename))
    }
}

/// The lines of one source file, read once per file entry.
#[derive(Debug, Clone, Default)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    /// Read a whole file. The handle is closed before this returns, whatever
    /// happens later while the file entry is processed.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn read(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of the 1-based line `number`, ready to be embedded in a
    /// diagnostic: trailing whitespace stripped, tabs turned into single
    /// spaces. `None` when the line does not exist.
    #[must_use]
    pub fn line(&self, number: u32) -> Option<String> {
        let index = (number as usize).checked_sub(1)?;
        self.lines
            .get(index)
            .map(|l| l.trim_end().replace('\t', " "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_path() {
        assert_eq!(resolve_path("src/a.c", ""), PathBuf::from("src/a.c"));
        assert_eq!(resolve_path("src/a.c", "proj/"), PathBuf::from("proj/src/a.c"));
        assert_eq!(resolve_path("/abs/a.c", "proj/"), PathBuf::from("/abs/a.c"));
    }

    #[test]
    fn test_line_cleaning() {
        let text = SourceText::from_text("int x;\r\n\tif (x)\t{  \n\n}");
        assert_eq!(text.len(), 4);
        assert_eq!(text.line(1).as_deref(), Some("int x;"));
        assert_eq!(text.line(2).as_deref(), Some(" if (x) {"));
        assert_eq!(text.line(3).as_deref(), Some(""));
        assert_eq!(text.line(4).as_deref(), Some("}"));
    }

    #[test]
    fn test_line_out_of_range() {
        let text = SourceText::from_text("a\nb\n");
        assert_eq!(text.len(), 2);
        assert_eq!(text.line(0), None);
        assert_eq!(text.line(3), None);
        assert!(SourceText::default().is_empty());
    }

    #[test]
    fn test_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xff\xfe\n").unwrap();

        let text = SourceText::read(file.path()).unwrap();
        assert_eq!(text.len(), 2);
        assert_eq!(text.line(1).as_deref(), Some("ok"));
        assert_eq!(text.line(2).as_deref(), Some("\u{fffd}\u{fffd}"));

        assert!(SourceText::read(Path::new("/nonexistent/covdiag/file.c")).is_err());
    }
}

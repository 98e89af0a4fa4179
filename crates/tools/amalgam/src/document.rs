//! In-memory source documents.
//!
//! A [`SourceDocument`] is an ordered list of lines. Every line remembers the
//! include chain that produced it, which is how the engine detects cycles
//! without any global state.

use crate::error::{AmalgamError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Canonical paths from the main document down to the file a line came from.
pub type IncludeChain = Arc<[PathBuf]>;

/// One line of text plus its provenance.
#[derive(Debug, Clone)]
pub struct Line {
    text: String,
    chain: IncludeChain,
}

impl Line {
    pub(crate) fn new(text: impl Into<String>, chain: IncludeChain) -> Self {
        Self {
            text: text.into(),
            chain,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Files this line was inlined through, outermost first. Empty for
    /// documents built in memory.
    pub fn chain(&self) -> &[PathBuf] {
        &self.chain
    }

    pub(crate) fn shared_chain(&self) -> &IncludeChain {
        &self.chain
    }
}

/// An ordered sequence of text lines.
///
/// Equality compares line text only; provenance is bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    lines: Vec<Line>,
}

impl SourceDocument {
    /// Build a document from in-memory lines with no file provenance.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chain: IncludeChain = Arc::from(Vec::new());
        Self {
            lines: lines
                .into_iter()
                .map(|l| Line::new(l, Arc::clone(&chain)))
                .collect(),
        }
    }

    /// Split `text` on `\n` / `\r\n`, attributing every line to `chain`.
    pub fn from_text(text: &str, chain: &IncludeChain) -> Self {
        Self {
            lines: text.lines().map(|l| Line::new(l, Arc::clone(chain))).collect(),
        }
    }

    /// Read the main document from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let (canonical, text) = read_source(path)?;
        let chain: IncludeChain = Arc::from(vec![canonical]);
        Ok(Self::from_text(&text, &chain))
    }

    pub(crate) fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(Line::text).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join lines with `\n`; a non-empty document ends with a newline.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.text.len() + 1).sum());
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

impl From<Vec<Line>> for SourceDocument {
    fn from(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

impl PartialEq for SourceDocument {
    fn eq(&self, other: &Self) -> bool {
        self.lines.len() == other.lines.len()
            && self
                .lines
                .iter()
                .zip(&other.lines)
                .all(|(a, b)| a.text == b.text)
    }
}

impl Eq for SourceDocument {}

/// Canonicalize and fully read a source file.
///
/// Any failure, whether the file is missing or unreadable, is reported as
/// [`AmalgamError::FileNotFound`] against the path as given.
pub(crate) fn read_source(path: &Path) -> Result<(PathBuf, String)> {
    let not_found = |source| AmalgamError::FileNotFound {
        path: path.to_path_buf(),
        source,
    };
    let canonical = std::fs::canonicalize(path).map_err(not_found)?;
    let text = std::fs::read_to_string(&canonical).map_err(not_found)?;
    Ok((canonical, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_from_text_strips_terminators() {
        let chain: IncludeChain = Arc::from(Vec::new());
        let doc = SourceDocument::from_text("a\r\nb\nc", &chain);
        assert_eq!(doc.texts(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let chain: IncludeChain = Arc::from(Vec::new());
        let doc = SourceDocument::from_text("a\n\n\nb\n", &chain);
        assert_eq!(doc.texts(), vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_render_terminates_lines() {
        let doc = SourceDocument::from_lines(["int x;", "", "int y;"]);
        assert_eq!(doc.render(), "int x;\n\nint y;\n");
        assert_eq!(SourceDocument::default().render(), "");
    }

    #[test]
    fn test_equality_ignores_provenance() {
        let chain: IncludeChain = Arc::from(vec![PathBuf::from("/p/a.hpp")]);
        let from_file = SourceDocument::from_text("x\ny\n", &chain);
        assert_eq!(from_file, SourceDocument::from_lines(["x", "y"]));
        assert_ne!(from_file, SourceDocument::from_lines(["x"]));
    }

    #[test]
    fn test_read_records_canonical_origin() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main.cpp");
        std::fs::write(&path, "int main() {}\n").unwrap();

        let doc = SourceDocument::read(&path).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(
            doc.lines()[0].chain(),
            &[std::fs::canonicalize(&path).unwrap()]
        );
    }

    #[test]
    fn test_read_missing_is_file_not_found() {
        let temp = TempDir::new().unwrap();
        let err = SourceDocument::read(&temp.path().join("main.cpp")).unwrap_err();
        assert!(matches!(err, AmalgamError::FileNotFound { .. }));
    }
}

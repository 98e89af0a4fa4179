//! Recognition of local include directives.
//!
//! A line is a directive only if, after trimming, the whole line has the form
//! `#include "<relative-path>"` with the path ending in the header extension.
//! Anything else (system includes, comments, trailing code) is plain content.

use crate::error::{AmalgamError, Result};
use regex::Regex;
use std::path::PathBuf;

/// Header extension used when none is configured.
pub const DEFAULT_HEADER_EXTENSION: &str = "hpp";

/// A recognised `#include "..."` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Path as written between the quotes, relative to the project root.
    pub path: PathBuf,
}

/// Whole-line matcher for local include directives.
#[derive(Debug, Clone)]
pub struct DirectiveMatcher {
    pattern: Regex,
    extension: String,
}

impl DirectiveMatcher {
    /// Build a matcher for headers ending in `.{extension}`.
    ///
    /// A leading `.` is accepted and ignored, so `"hpp"` and `".hpp"` are
    /// equivalent.
    pub fn new(extension: &str) -> Result<Self> {
        let extension = normalize_extension(extension)?;
        let pattern = format!(r#"^#include\s+"([^"]+\.{})"$"#, regex::escape(&extension));
        let pattern = Regex::new(&pattern).map_err(|_| AmalgamError::InvalidExtension {
            extension: extension.clone(),
        })?;
        Ok(Self { pattern, extension })
    }

    /// The normalized extension, without a leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn parse(&self, line: &str) -> Option<IncludeDirective> {
        let caps = self.pattern.captures(line.trim())?;
        Some(IncludeDirective {
            path: PathBuf::from(&caps[1]),
        })
    }

    pub fn is_directive(&self, line: &str) -> bool {
        self.pattern.is_match(line.trim())
    }
}

fn normalize_extension(extension: &str) -> Result<String> {
    let ext = extension.trim();
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    if ext.is_empty()
        || ext
            .chars()
            .any(|c| c == '"' || c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(AmalgamError::InvalidExtension {
            extension: extension.to_string(),
        });
    }
    Ok(ext.to_string())
}

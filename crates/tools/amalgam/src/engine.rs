//! The flattening engine.
//!
//! Flattening is a fixed-point loop: while the document still contains a
//! local include directive, replace every directive with the lines of the file
//! it names. Each pass inlines exactly one more level of the include graph.
//!
//! # Path resolution
//! Every directive resolves against the project root, including directives
//! that were themselves inlined from a header in a subdirectory.
//!
//! # Cycles
//! Each line carries the chain of files it was inlined through. A directive
//! whose target already appears in its own line's chain is a cycle and fails
//! with [`AmalgamError::CyclicInclude`]. The same header reached along two
//! different chains is inlined twice; there is no include-guard deduplication.

use crate::config::AmalgamConfig;
use crate::directive::DirectiveMatcher;
use crate::document::{IncludeChain, Line, SourceDocument, read_source};
use crate::error::{AmalgamError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// States of the driving loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Looking for a remaining directive.
    Scanning,
    /// Performing one expansion pass.
    Expanding,
    /// No directive remains.
    Done,
}

/// Result of a complete flattening run.
#[derive(Debug, Clone)]
pub struct FlattenReport {
    pub document: SourceDocument,
    /// Number of expansion passes performed.
    pub rounds: usize,
    /// Total number of directives replaced across all passes.
    pub inlined: usize,
}

/// Inlines local includes relative to a fixed project root.
#[derive(Debug, Clone)]
pub struct Flattener {
    root: PathBuf,
    matcher: DirectiveMatcher,
}

impl Flattener {
    pub fn new(root: impl Into<PathBuf>, matcher: DirectiveMatcher) -> Self {
        Self {
            root: root.into(),
            matcher,
        }
    }

    pub fn from_config(config: &AmalgamConfig) -> Result<Self> {
        Ok(Self::new(
            config.root.clone(),
            DirectiveMatcher::new(&config.header_extension)?,
        ))
    }

    /// True iff at least one line is a local include directive.
    pub fn detect(&self, document: &SourceDocument) -> bool {
        document
            .lines()
            .iter()
            .any(|line| self.matcher.is_directive(line.text()))
    }

    pub fn directive_count(&self, document: &SourceDocument) -> usize {
        document
            .lines()
            .iter()
            .filter(|line| self.matcher.is_directive(line.text()))
            .count()
    }

    /// Replace every directive with the lines of its file, one level deep.
    ///
    /// Lines spliced in by this call are not expanded again until the next
    /// call. On error nothing is returned; the input is never modified.
    pub fn expand_once(&self, document: &SourceDocument) -> Result<SourceDocument> {
        self.expand_pass(document).map(|(doc, _)| doc)
    }

    /// Expand until no directive remains.
    pub fn run(&self, document: SourceDocument) -> Result<SourceDocument> {
        self.run_report(document).map(|report| report.document)
    }

    /// Like [`Flattener::run`], also reporting how much work was done.
    pub fn run_report(&self, document: SourceDocument) -> Result<FlattenReport> {
        let mut document = document;
        let mut rounds = 0;
        let mut inlined = 0;
        let mut phase = Phase::Scanning;

        loop {
            let next = match phase {
                Phase::Scanning => {
                    if self.detect(&document) {
                        Phase::Expanding
                    } else {
                        Phase::Done
                    }
                }
                Phase::Expanding => {
                    let (expanded, count) = self.expand_pass(&document)?;
                    document = expanded;
                    rounds += 1;
                    inlined += count;
                    debug!(
                        round = rounds,
                        inlined = count,
                        lines = document.len(),
                        "Expansion round complete"
                    );
                    Phase::Scanning
                }
                Phase::Done => break,
            };
            trace!(from = ?phase, to = ?next, "Flattener transition");
            phase = next;
        }

        info!(
            rounds,
            inlined,
            lines = document.len(),
            "Flattening complete"
        );
        Ok(FlattenReport {
            document,
            rounds,
            inlined,
        })
    }

    fn expand_pass(&self, document: &SourceDocument) -> Result<(SourceDocument, usize)> {
        let mut out: Vec<Line> = Vec::with_capacity(document.len());
        let mut inlined = 0;

        for line in document.lines() {
            let Some(directive) = self.matcher.parse(line.text()) else {
                out.push(line.clone());
                continue;
            };

            let resolved = self.root.join(&directive.path);
            let (canonical, text) = read_source(&resolved)?;
            let chain = extend_chain(line.shared_chain(), &canonical)?;

            let included = SourceDocument::from_text(&text, &chain);
            debug!(
                path = %resolved.display(),
                lines = included.len(),
                depth = chain.len(),
                "Inlined include"
            );
            out.extend(included.into_lines());
            inlined += 1;
        }

        Ok((SourceDocument::from(out), inlined))
    }
}

fn extend_chain(parent: &IncludeChain, canonical: &Path) -> Result<IncludeChain> {
    let mut chain = Vec::with_capacity(parent.len() + 1);
    chain.extend(parent.iter().cloned());
    chain.push(canonical.to_path_buf());

    if parent.iter().any(|p| p == canonical) {
        return Err(AmalgamError::CyclicInclude {
            path: canonical.to_path_buf(),
            chain,
        });
    }
    Ok(Arc::from(chain))
}

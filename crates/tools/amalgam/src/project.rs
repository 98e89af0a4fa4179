//! Whole-project flattening: read the main document, inline, write.

use crate::config::AmalgamConfig;
use crate::document::SourceDocument;
use crate::engine::{FlattenReport, Flattener};
use crate::error::Result;
use crate::writer::write_document_atomic;
use std::path::PathBuf;
use tracing::info;

/// Summary of a successful [`flatten_project`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOutcome {
    /// File that was written.
    pub output: PathBuf,
    pub rounds: usize,
    pub inlined: usize,
    /// Line count of the written document.
    pub lines: usize,
}

/// Read and fully flatten the configured main document without writing it.
pub fn flatten_document(config: &AmalgamConfig) -> Result<FlattenReport> {
    let flattener = Flattener::from_config(config)?;
    let document = SourceDocument::read(&config.input_path())?;
    flattener.run_report(document)
}

/// Flatten the configured main document and write the submission file.
///
/// The output is only touched after every include has been resolved, so a
/// failed run leaves any previous submission file as it was.
pub fn flatten_project(config: &AmalgamConfig) -> Result<FlattenOutcome> {
    let report = flatten_document(config)?;
    let output = config.output_path();
    write_document_atomic(&output, &report.document)?;

    info!(
        output = %output.display(),
        lines = report.document.len(),
        "Wrote submission file"
    );
    Ok(FlattenOutcome {
        output,
        rounds: report.rounds,
        inlined: report.inlined,
        lines: report.document.len(),
    })
}

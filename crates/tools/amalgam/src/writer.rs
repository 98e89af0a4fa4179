//! Atomic output writing.
//!
//! Uses the atomicwrites crate so the submission file is either fully
//! written or not modified at all.

use crate::document::SourceDocument;
use crate::error::{AmalgamError, Result};
use atomicwrites::{AllowOverwrite, AtomicFile};
use std::io::Write;
use std::path::Path;

/// Write a rendered document to `path` atomically, replacing any previous file.
pub fn write_document_atomic(path: &Path, document: &SourceDocument) -> Result<()> {
    let write_err = |source| AmalgamError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let rendered = document.render();
    AtomicFile::new(path, AllowOverwrite)
        .write(|f| f.write_all(rendered.as_bytes()))
        .map_err(|e| write_err(std::io::Error::from(e)))?;

    Ok(())
}

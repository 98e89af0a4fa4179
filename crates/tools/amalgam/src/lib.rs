//! Single-file amalgamation for multi-file C++ projects.
//!
//! Contest judges such as CodeCup accept one source file. This crate takes a
//! main document that pulls in local headers through `#include "x.hpp"` lines
//! and inlines them, level by level, until no local include remains.
//!
//! # Example
//! ```no_run
//! use amalgam::{AmalgamConfig, flatten_project};
//!
//! let outcome = flatten_project(&AmalgamConfig::for_root("/path/to/bot")).unwrap();
//! println!("{} lines in {}", outcome.lines, outcome.output.display());
//! ```

pub mod config;
pub mod directive;
pub mod document;
pub mod engine;
pub mod error;
pub mod project;
pub mod validation;
pub mod writer;

pub use config::{AmalgamConfig, ConfigOverrides, LoadedConfig, load, load_with_overrides};
pub use directive::{DirectiveMatcher, IncludeDirective};
pub use document::{Line, SourceDocument};
pub use engine::{FlattenReport, Flattener, Phase};
pub use error::{AmalgamError, Result};
pub use project::{FlattenOutcome, flatten_document, flatten_project};
pub use writer::write_document_atomic;

//! Explicit project configuration.
//!
//! # Precedence (lowest to highest)
//! 1. Default values (`main.cpp` -> `main_submit.cpp`, `.hpp` headers)
//! 2. `amalgam.json` in the project root
//! 3. Environment variables
//! 4. Caller overrides (CLI flags)
//!
//! # Environment Variables
//! - `AMALGAM_INPUT`: Override the main document path
//! - `AMALGAM_OUTPUT`: Override the submission output path
//! - `AMALGAM_HEADER_EXT`: Override the header extension

use crate::directive::{DEFAULT_HEADER_EXTENSION, DirectiveMatcher};
use crate::error::{AmalgamError, Result};
use crate::validation::{AdvisoryWarning, validate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Filename for the optional per-project config.
pub const CONFIG_FILE: &str = "amalgam.json";

/// Everything a flattening run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmalgamConfig {
    /// Project root; all include paths resolve against it. Never read from
    /// the config file, which lives inside the root.
    #[serde(skip)]
    pub root: PathBuf,

    /// Main document, relative to the root.
    pub input: PathBuf,

    /// Submission file to write, relative to the root.
    pub output: PathBuf,

    /// Extension that marks a quoted include as local.
    pub header_extension: String,
}

impl Default for AmalgamConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            input: PathBuf::from("main.cpp"),
            output: PathBuf::from("main_submit.cpp"),
            header_extension: DEFAULT_HEADER_EXTENSION.into(),
        }
    }
}

impl AmalgamConfig {
    /// Defaults rooted at `root`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.root.join(&self.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }
}

/// Values supplied directly by the caller; `None` leaves the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub header_extension: Option<String>,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AmalgamConfig,

    /// Advisory warnings from validation.
    pub warnings: Vec<AdvisoryWarning>,

    /// Config file that contributed, if one existed.
    pub source: Option<PathBuf>,
}

/// Load configuration for the project at `root` with no caller overrides.
pub fn load(root: &Path) -> Result<LoadedConfig> {
    load_with_overrides(root, &ConfigOverrides::default())
}

pub fn load_with_overrides(root: &Path, overrides: &ConfigOverrides) -> Result<LoadedConfig> {
    let path = root.join(CONFIG_FILE);
    let (mut config, source) = if path.exists() {
        (read_config_file(&path)?, Some(path))
    } else {
        (AmalgamConfig::default(), None)
    };
    config.root = root.to_path_buf();

    apply_env_overrides(&mut config);
    apply_overrides(&mut config, overrides);

    // Surface a bad extension now rather than at the first directive.
    let matcher = DirectiveMatcher::new(&config.header_extension)?;
    config.header_extension = matcher.extension().to_string();

    let warnings = validate(&config);
    Ok(LoadedConfig {
        config,
        warnings,
        source,
    })
}

fn read_config_file(path: &Path) -> Result<AmalgamConfig> {
    let invalid = |message: String| AmalgamError::Config {
        path: path.to_path_buf(),
        message,
    };

    let raw = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;

    let value: Value = serde_json::from_str(&raw).map_err(|e| invalid(e.to_string()))?;
    if !value.is_object() {
        return Err(invalid("config root must be a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
}

fn apply_env_overrides(config: &mut AmalgamConfig) {
    if let Some(v) = env_trimmed("AMALGAM_INPUT") {
        config.input = PathBuf::from(v);
    }
    if let Some(v) = env_trimmed("AMALGAM_OUTPUT") {
        config.output = PathBuf::from(v);
    }
    if let Some(v) = env_trimmed("AMALGAM_HEADER_EXT") {
        config.header_extension = v;
    }
}

fn apply_overrides(config: &mut AmalgamConfig, overrides: &ConfigOverrides) {
    if let Some(v) = &overrides.input {
        config.input.clone_from(v);
    }
    if let Some(v) = &overrides.output {
        config.output.clone_from(v);
    }
    if let Some(v) = &overrides.header_extension {
        config.header_extension.clone_from(v);
    }
}

/// Helper to read and normalize an env var (trim + filter empty).
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

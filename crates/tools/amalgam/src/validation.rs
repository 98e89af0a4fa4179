//! Advisory validation for [`AmalgamConfig`].
//!
//! Validation is advisory - it produces warnings but doesn't prevent a run.
//! Hard errors (a bad header extension, a missing input) surface elsewhere.

use crate::config::AmalgamConfig;

/// An advisory warning about a configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Human-readable warning message.
    pub message: String,

    /// Config field the warning refers to.
    pub path: &'static str,
}

impl std::fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

pub fn validate(cfg: &AmalgamConfig) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];

    if cfg.input_path() == cfg.output_path() {
        warnings.push(AdvisoryWarning {
            code: "output.same_as_input",
            path: "output",
            message: format!(
                "output '{}' is the main document; it will be overwritten",
                cfg.output.display()
            ),
        });
    }

    let ext = cfg.header_extension.trim_start_matches('.');
    if !ext.is_empty()
        && cfg
            .output
            .extension()
            .is_some_and(|e| e.to_string_lossy() == ext)
    {
        warnings.push(AdvisoryWarning {
            code: "output.header_extension",
            path: "output",
            message: format!(
                "output '{}' ends in .{ext}; other projects including it would inline the submission",
                cfg.output.display()
            ),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_clean() {
        assert!(validate(&AmalgamConfig::default()).is_empty());
    }

    #[test]
    fn test_same_input_and_output() {
        let cfg = AmalgamConfig {
            output: PathBuf::from("main.cpp"),
            ..AmalgamConfig::default()
        };
        let warnings = validate(&cfg);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "output.same_as_input");
        assert!(warnings[0].to_string().starts_with("[output.same_as_input] output:"));
    }

    #[test]
    fn test_output_with_header_extension() {
        let cfg = AmalgamConfig {
            output: PathBuf::from("submit.hpp"),
            ..AmalgamConfig::default()
        };
        let warnings = validate(&cfg);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "output.header_extension");
    }
}

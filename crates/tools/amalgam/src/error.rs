use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AmalgamError {
    #[error("Include file not found: {path}: {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cyclic include of {path}: {}", render_chain(.chain))]
    CyclicInclude { path: PathBuf, chain: Vec<PathBuf> },

    #[error("Invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Invalid header extension: {extension:?}")]
    InvalidExtension { extension: String },

    #[error("Failed to write output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AmalgamError>;

fn render_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_message_renders_chain() {
        let err = AmalgamError::CyclicInclude {
            path: PathBuf::from("/p/a.hpp"),
            chain: vec![
                PathBuf::from("/p/main.cpp"),
                PathBuf::from("/p/a.hpp"),
                PathBuf::from("/p/b.hpp"),
                PathBuf::from("/p/a.hpp"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Cyclic include of /p/a.hpp: /p/main.cpp -> /p/a.hpp -> /p/b.hpp -> /p/a.hpp"
        );
    }

    #[test]
    fn test_file_not_found_names_path() {
        let err = AmalgamError::FileNotFound {
            path: PathBuf::from("missing.hpp"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("missing.hpp"));
    }
}

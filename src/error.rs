//! Centralized error types for html2eml.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the html2eml library.
///
/// Missing or unreadable images are not errors: they are reported in the
/// [`ConversionReport`](crate::export::eml::ConversionReport) and the conversion
/// carries on.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input folder has no HTML document.
    #[error("HTML document not found: {0}")]
    MissingInput(PathBuf),

    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The MIME message could not be serialized.
    #[error("Failed to build message: {0}")]
    Build(#[source] std::io::Error),
}

/// A configuration file that exists but cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Config`](crate::config::Config).
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Convenience alias for `Result<T, ConvertError>`.
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let err = ConvertError::MissingInput(PathBuf::from("mail/index.html"));
        assert_eq!(err.to_string(), "HTML document not found: mail/index.html");
    }

    #[test]
    fn test_io_keeps_path() {
        let err = ConvertError::io(
            "out.eml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("out.eml"));
        assert!(err.to_string().contains("denied"));
    }
}

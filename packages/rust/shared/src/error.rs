//! Error types for bookprep.
//!
//! Library crates use [`BookprepError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all bookprep operations.
#[derive(Debug, thiserror::Error)]
pub enum BookprepError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error (read, write, create, or directory traversal).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input is not a valid nbformat v4 notebook.
    #[error("invalid notebook {path:?}: {message}")]
    Notebook { path: PathBuf, message: String },

    /// YAML or JSON serialization error.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// The notebook produced no sections, so there is no book root.
    #[error("no sections found in {path:?}")]
    NoSections { path: PathBuf },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BookprepError>;

impl BookprepError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a notebook format error for the given file.
    pub fn notebook(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Notebook {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a serialization error from any displayable message.
    pub fn serialize(msg: impl Into<String>) -> Self {
        Self::Serialize(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = BookprepError::config("missing home directory");
        assert_eq!(err.to_string(), "config error: missing home directory");

        let err = BookprepError::NoSections {
            path: PathBuf::from("book.ipynb"),
        };
        assert!(err.to_string().contains("no sections found"));
        assert!(err.to_string().contains("book.ipynb"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = BookprepError::io("book/_build/html/index.html", source);
        assert!(err.to_string().contains("index.html"));
        assert!(err.to_string().contains("gone"));
    }
}

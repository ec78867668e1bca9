//! Typed error handling for exhaustive-enum.
//!
//! Only loading the program graph (and reading configuration) can fail.
//! Unresolvable switch expressions and violations are not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for exhaustive-enum operations.
#[derive(Error, Debug)]
pub enum ExhaustiveError {
    /// I/O error when reading snapshots or configuration
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed program graph snapshot
    #[error("Invalid snapshot {path}: {message}")]
    Snapshot {
        path: PathBuf,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
        /// Column number (1-indexed) if available
        column: Option<usize>,
    },

    /// The same package was supplied by more than one snapshot
    #[error("Package {package} is defined more than once (again in {path})")]
    DuplicatePackage { package: String, path: PathBuf },

    /// The front end failed to parse or type-check a package
    #[error("Package {package} failed to type-check:\n{}", .diagnostics.join("\n"))]
    TypeCheck {
        package: String,
        diagnostics: Vec<String>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl ExhaustiveError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a snapshot error from a JSON failure, keeping its location.
    pub fn snapshot(path: impl Into<PathBuf>, err: &serde_json::Error) -> Self {
        let (line, column) = if err.line() > 0 {
            (Some(err.line()), Some(err.column()))
        } else {
            (None, None)
        };
        Self::Snapshot {
            path: path.into(),
            message: err.to_string(),
            line,
            column,
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error (the run can continue without
    /// the failing input).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Snapshot { path, .. } => Some(path),
            Self::DuplicatePackage { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for exhaustive-enum results.
pub type ExhaustiveResult<T> = Result<T, ExhaustiveError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> ExhaustiveResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> ExhaustiveResult<T> {
        self.map_err(|e| ExhaustiveError::io(path, e))
    }
}

//! Error types for navigation, transfer and launch operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across tripane crates.
pub type FsResult<T> = Result<T, FsError>;

/// Errors that can occur while resolving, transferring or opening paths.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path no longer exists when the operation is attempted.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Target collides with an existing entry. Nothing was overwritten.
    #[error("{path} already exists")]
    AlreadyExists { path: PathBuf },

    /// A directory was required.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Destination lies inside the source directory.
    #[error("Cannot copy or move {source_dir} into itself ({destination})")]
    SourceIsAncestor {
        source_dir: PathBuf,
        destination: PathBuf,
    },

    /// Underlying read/write/copy failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS could not open the path with its default handler.
    #[error("Failed to open {path}: {message}")]
    LaunchFailure { path: PathBuf, message: String },

    /// Paste was requested with nothing copied.
    #[error("Nothing copied to paste")]
    EmptyClipboard,

    /// No desktop or home directory to use as drop fallback.
    #[error("No fallback location available for drop")]
    NoFallbackLocation,

    /// Operation was cancelled before it finished.
    #[error("Operation cancelled")]
    Cancelled,
}

impl FsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a launch failure.
    pub fn launch(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::LaunchFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Coarse category used for status colouring and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::AlreadyExists { .. } => ErrorCategory::AlreadyExists,
            Self::Io { .. } | Self::Cancelled => ErrorCategory::Io,
            Self::LaunchFailure { .. } => ErrorCategory::LaunchFailure,
            Self::NotADirectory { .. }
            | Self::SourceIsAncestor { .. }
            | Self::EmptyClipboard
            | Self::NoFallbackLocation => ErrorCategory::Usage,
        }
    }

    /// Check if this error is a target collision.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Coarse error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ErrorCategory {
    #[strum(to_string = "not found")]
    NotFound,
    #[strum(to_string = "already exists")]
    AlreadyExists,
    #[strum(to_string = "I/O error")]
    Io,
    #[strum(to_string = "launch failure")]
    LaunchFailure,
    #[strum(to_string = "invalid request")]
    Usage,
}

impl ErrorCategory {
    /// Process exit code for the CLI.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::NotFound => 3,
            Self::AlreadyExists => 4,
            Self::Io => 5,
            Self::LaunchFailure => 6,
            Self::Usage => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_maps_not_found() {
        let err = FsError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, FsError::NotFound { .. }));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_io_maps_already_exists() {
        let err = FsError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists"),
        );
        assert!(err.is_conflict());
    }

    #[test]
    fn test_io_keeps_other_kinds() {
        let err = FsError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, FsError::Io { .. }));
        assert!(err.to_string().contains("/test/path"));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ErrorCategory::NotFound,
            ErrorCategory::AlreadyExists,
            ErrorCategory::Io,
            ErrorCategory::LaunchFailure,
            ErrorCategory::Usage,
        ]
        .map(ErrorCategory::exit_code);
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

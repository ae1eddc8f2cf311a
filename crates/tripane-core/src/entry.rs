//! Path classification.
//!
//! Paths are never cached: every call re-stats the filesystem, since an
//! entry can disappear between the moment it is selected and the moment it
//! is used.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Classification of a path at the moment it was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[strum(to_string = "file")]
    File,
    #[strum(to_string = "directory")]
    Directory,
    #[strum(to_string = "missing")]
    Missing,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Check if the path could not be resolved.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Classify a path as file, directory or missing.
///
/// Symlinks are followed. Anything that cannot be stat'd (permission
/// denied, broken link, transient I/O error) is reported as `Missing` and
/// the caller decides how to surface it.
pub fn classify(path: &Path) -> EntryKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => EntryKind::Directory,
        Ok(_) => EntryKind::File,
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "path did not resolve");
            EntryKind::Missing
        }
    }
}

/// Make a path absolute without touching the filesystem.
///
/// Falls back to the path as given if the current directory is unavailable.
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// A path together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    /// Absolute path.
    pub path: PathBuf,
    /// Classification at resolve time.
    pub kind: EntryKind,
}

impl PathEntry {
    /// Resolve a path: absolutize and classify.
    pub fn resolve(path: impl AsRef<Path>) -> Self {
        let path = absolutize(path.as_ref());
        let kind = classify(&path);
        Self { path, kind }
    }

    /// Re-check the classification against the current filesystem state.
    pub fn refresh(&mut self) -> EntryKind {
        self.kind = classify(&self.path);
        self.kind
    }

    /// Final path component, used as the name at a paste or drop target.
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    /// Check if the entry was a directory when resolved.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

//! On-demand directory listings.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::entry::{EntryKind, classify};
use crate::error::{FsError, FsResult};

/// Options controlling which entries a listing contains.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListingOptions {
    /// Include entries whose name starts with `.`.
    pub show_hidden: bool,
}

/// A single row of a directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEntry {
    /// File name (lossy UTF-8).
    pub name: String,
    /// Full path.
    pub path: PathBuf,
    /// Classification, following symlinks.
    pub kind: EntryKind,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Last modification time, if available.
    #[serde(skip)]
    pub modified: Option<SystemTime>,
    /// Whether the name starts with `.`.
    pub hidden: bool,
}

impl ListEntry {
    /// Check if the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Read the entries of `dir`.
///
/// Directories come first, then everything else, each group sorted by name
/// case-insensitively. Entries that vanish while being read are skipped.
pub fn read_listing(dir: &Path, options: ListingOptions) -> FsResult<Vec<ListEntry>> {
    if !classify(dir).is_dir() {
        return Err(if dir.exists() {
            FsError::NotADirectory {
                path: dir.to_path_buf(),
            }
        } else {
            FsError::NotFound {
                path: dir.to_path_buf(),
            }
        });
    }

    let reader = fs::read_dir(dir).map_err(|e| FsError::io(dir, e))?;
    let mut entries = Vec::new();

    for entry in reader.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let hidden = name.starts_with('.');
        if hidden && !options.show_hidden {
            continue;
        }

        let path = entry.path();
        let (kind, size, modified) = match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => (EntryKind::Directory, 0, meta.modified().ok()),
            Ok(meta) => (EntryKind::File, meta.len(), meta.modified().ok()),
            // Broken symlinks still show up so they can be inspected.
            Err(_) => (EntryKind::Missing, 0, None),
        };

        entries.push(ListEntry {
            name,
            path,
            kind,
            size,
            modified,
            hidden,
        });
    }

    entries.sort_by(compare_entries);
    tracing::debug!(dir = %dir.display(), count = entries.len(), "read listing");
    Ok(entries)
}

fn compare_entries(a: &ListEntry, b: &ListEntry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, b"").unwrap();

        let err = read_listing(&file, ListingOptions::default()).unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));
    }

    #[test]
    fn test_listing_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_listing(&dir.path().join("x"), ListingOptions::default()).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }
}

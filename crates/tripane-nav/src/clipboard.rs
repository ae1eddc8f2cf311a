//! Single-entry clipboard.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tripane_core::EntryKind;

/// How a copied path will be pasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ClipMode {
    #[strum(to_string = "file")]
    File,
    #[strum(to_string = "folder")]
    Folder,
}

impl ClipMode {
    /// Mode for a resolved entry, or None if it is missing.
    pub fn for_kind(kind: EntryKind) -> Option<Self> {
        match kind {
            EntryKind::File => Some(Self::File),
            EntryKind::Directory => Some(Self::Folder),
            EntryKind::Missing => None,
        }
    }
}

/// A pending paste source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipEntry {
    pub source: PathBuf,
    pub mode: ClipMode,
}

/// Holds at most one pending paste source.
#[derive(Debug, Clone, Default)]
pub struct ClipboardSlot {
    entry: Option<ClipEntry>,
}

impl ClipboardSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entry`, replacing whatever was held.
    ///
    /// Returns false if the slot already held exactly this entry.
    pub fn set(&mut self, entry: ClipEntry) -> bool {
        if self.entry.as_ref() == Some(&entry) {
            return false;
        }
        self.entry = Some(entry);
        true
    }

    /// The held entry, if any.
    pub fn peek(&self) -> Option<&ClipEntry> {
        self.entry.as_ref()
    }

    /// Remove and return the held entry.
    pub fn take(&mut self) -> Option<ClipEntry> {
        self.entry.take()
    }

    /// Empty the slot.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Check if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Check if the slot holds `source`.
    pub fn holds(&self, source: &Path) -> bool {
        self.entry.as_ref().is_some_and(|e| e.source == source)
    }
}

//! Progress reporting types for transfers.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The type of transfer being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum TransferKind {
    Copy,
    Move,
}

impl TransferKind {
    /// Past-tense verb for summaries.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Copy => "Copied",
            Self::Move => "Moved",
        }
    }
}

/// Progress information for an ongoing transfer.
#[derive(Debug, Clone)]
pub struct TransferProgress {
    /// The type of transfer.
    pub kind: TransferKind,
    /// Number of files completed.
    pub files_completed: usize,
    /// Number of bytes copied so far.
    pub bytes_processed: u64,
    /// The file currently being processed.
    pub current_file: Option<PathBuf>,
}

impl TransferProgress {
    /// Create a new progress tracker.
    pub fn new(kind: TransferKind) -> Self {
        Self {
            kind,
            files_completed: 0,
            bytes_processed: 0,
            current_file: None,
        }
    }

    /// Update the current file being processed.
    pub fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.current_file = path;
    }

    /// Increment the completed count and add bytes.
    pub fn complete_file(&mut self, bytes: u64) {
        self.files_completed += 1;
        self.bytes_processed += bytes;
    }
}

/// Result of a completed transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReport {
    /// The type of transfer.
    pub kind: TransferKind,
    /// Path the data came from.
    pub source: PathBuf,
    /// Final path of the transferred entry.
    pub destination: PathBuf,
    /// Number of files written.
    pub files: usize,
    /// Total bytes written.
    pub bytes: u64,
}

impl TransferReport {
    pub(crate) fn from_progress(
        progress: &TransferProgress,
        source: PathBuf,
        destination: PathBuf,
    ) -> Self {
        Self {
            kind: progress.kind,
            source,
            destination,
            files: progress.files_completed,
            bytes: progress.bytes_processed,
        }
    }

    /// Get a human-readable summary of the transfer.
    pub fn summary(&self) -> String {
        let name = self
            .destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.destination.display().to_string());
        let parent = self
            .destination
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        format!("{} {} to {}", self.kind.verb(), name, parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_accumulates() {
        let mut progress = TransferProgress::new(TransferKind::Copy);
        progress.complete_file(10);
        progress.complete_file(5);
        assert_eq!(progress.files_completed, 2);
        assert_eq!(progress.bytes_processed, 15);
    }

    #[test]
    fn test_summary() {
        let report = TransferReport {
            kind: TransferKind::Copy,
            source: PathBuf::from("/a/report.txt"),
            destination: PathBuf::from("/b/report.txt"),
            files: 1,
            bytes: 3,
        };
        assert_eq!(report.summary(), "Copied report.txt to /b");
    }
}

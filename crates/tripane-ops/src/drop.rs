//! Drag-and-drop transfers.
//!
//! Dropping onto a directory moves the source into it. Dropping onto
//! anything else leaves the source where it is and copies it to a fallback
//! location (the user's desktop by default).

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tripane_core::{EntryKind, FsError, FsResult, classify};

use crate::progress::TransferReport;
use crate::transfer::TransferEngine;

/// What a drop ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropAction {
    /// Source was moved into the directory under the cursor.
    Moved,
    /// Target was not a directory, so source was copied to the fallback location.
    CopiedToFallback,
}

/// Result of a completed drop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropOutcome {
    pub action: DropAction,
    pub report: TransferReport,
}

impl DropOutcome {
    /// Get a human-readable summary of the drop.
    pub fn summary(&self) -> String {
        match self.action {
            DropAction::Moved => self.report.summary(),
            DropAction::CopiedToFallback => {
                format!("{} (drop target is not a folder)", self.report.summary())
            }
        }
    }
}

/// Resolve where non-directory drops copy to.
///
/// Uses `configured` when set, otherwise the desktop directory, otherwise
/// the home directory.
pub fn fallback_location(configured: Option<&Path>) -> FsResult<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .or_else(dirs::desktop_dir)
        .or_else(dirs::home_dir)
        .ok_or(FsError::NoFallbackLocation)
}

impl TransferEngine {
    /// Drop `source` onto `drop_target`.
    ///
    /// `fallback` is resolved with [`fallback_location`] only when the
    /// target is a file, so moves into a directory never depend on it.
    pub fn drop_onto_target(
        &self,
        source: &Path,
        drop_target: &Path,
        fallback: Option<&Path>,
    ) -> FsResult<DropOutcome> {
        let name = target_name(source)?;

        match classify(drop_target) {
            EntryKind::Missing => Err(FsError::NotFound {
                path: drop_target.to_path_buf(),
            }),
            EntryKind::Directory => {
                let report = self.move_path(source, &drop_target.join(name))?;
                Ok(DropOutcome {
                    action: DropAction::Moved,
                    report,
                })
            }
            EntryKind::File => {
                let fallback_dir = fallback_location(fallback)?;
                match classify(&fallback_dir) {
                    EntryKind::Directory => {}
                    EntryKind::File => {
                        return Err(FsError::NotADirectory {
                            path: fallback_dir.clone(),
                        });
                    }
                    EntryKind::Missing => {
                        return Err(FsError::NotFound {
                            path: fallback_dir.clone(),
                        });
                    }
                }
                tracing::debug!(
                    target = %drop_target.display(),
                    fallback = %fallback_dir.display(),
                    "drop target is not a directory, copying to fallback"
                );
                let report = self.copy_any(source, &fallback_dir.join(name))?;
                Ok(DropOutcome {
                    action: DropAction::CopiedToFallback,
                    report,
                })
            }
        }
    }
}

fn target_name(source: &Path) -> FsResult<&OsStr> {
    source.file_name().ok_or_else(|| {
        FsError::io(
            source,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })
}

//! Async transfer jobs with progress reporting.
//!
//! Runs a transfer on tokio's blocking pool so the caller's event loop
//! keeps running. Progress and the final result arrive on a bounded
//! channel; progress updates are dropped rather than blocking the copy
//! when the receiver falls behind.

use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use tripane_core::{FsError, FsResult};

use crate::TRANSFER_CHANNEL_SIZE;
use crate::drop::DropOutcome;
use crate::progress::{TransferKind, TransferProgress, TransferReport};
use crate::transfer::{TransferEngine, TransferOptions};

/// A transfer to run.
#[derive(Debug, Clone)]
pub enum TransferRequest {
    /// Copy a single file.
    CopyFile {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Recursively copy a directory.
    CopyTree {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Move a file or directory.
    Move {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Drop a source onto a row.
    Drop {
        source: PathBuf,
        target: PathBuf,
        /// Configured fallback folder; resolved only for drops onto a file.
        fallback: Option<PathBuf>,
    },
}

impl TransferRequest {
    /// The path being transferred.
    pub fn source(&self) -> &Path {
        match self {
            Self::CopyFile { source, .. }
            | Self::CopyTree { source, .. }
            | Self::Move { source, .. }
            | Self::Drop { source, .. } => source,
        }
    }

    /// The kind of transfer, for progress display.
    pub fn kind(&self) -> TransferKind {
        match self {
            Self::CopyFile { .. } | Self::CopyTree { .. } => TransferKind::Copy,
            Self::Move { .. } | Self::Drop { .. } => TransferKind::Move,
        }
    }

    /// Run the request synchronously on `engine`.
    pub fn execute(&self, engine: &TransferEngine) -> FsResult<JobOutcome> {
        match self {
            Self::CopyFile {
                source,
                destination,
            } => engine.copy_file(source, destination).map(JobOutcome::Transfer),
            Self::CopyTree {
                source,
                destination,
            } => engine.copy_tree(source, destination).map(JobOutcome::Transfer),
            Self::Move {
                source,
                destination,
            } => engine.move_path(source, destination).map(JobOutcome::Transfer),
            Self::Drop {
                source,
                target,
                fallback,
            } => engine
                .drop_onto_target(source, target, fallback.as_deref())
                .map(JobOutcome::Drop),
        }
    }
}

/// Result of a finished job.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    Transfer(TransferReport),
    Drop(DropOutcome),
}

impl JobOutcome {
    /// The underlying transfer report.
    pub fn report(&self) -> &TransferReport {
        match self {
            Self::Transfer(report) => report,
            Self::Drop(outcome) => &outcome.report,
        }
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        match self {
            Self::Transfer(report) => report.summary(),
            Self::Drop(outcome) => outcome.summary(),
        }
    }
}

/// Event sent through the channel during a job.
#[derive(Debug)]
pub enum TransferEvent {
    /// Progress update.
    Progress(TransferProgress),
    /// The job finished.
    Complete(FsResult<JobOutcome>),
}

/// Start a transfer on the blocking pool.
///
/// Must be called from within a tokio runtime. Returns a receiver for
/// progress updates and the final result.
pub fn start_transfer(
    request: TransferRequest,
    options: TransferOptions,
    cancel: CancellationToken,
) -> mpsc::Receiver<TransferEvent> {
    let (tx, rx) = mpsc::channel(TRANSFER_CHANNEL_SIZE);

    let progress_tx = tx.clone();
    let engine = TransferEngine::new(options)
        .with_cancel(cancel)
        .with_progress(move |progress| {
            let _ = progress_tx.try_send(TransferEvent::Progress(progress.clone()));
        });

    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || request.execute(&engine))
            .await
            .unwrap_or_else(|e| {
                Err(FsError::io(
                    PathBuf::new(),
                    io::Error::other(format!("Task failed: {e}")),
                ))
            });
        let _ = tx.send(TransferEvent::Complete(result)).await;
    });

    rx
}

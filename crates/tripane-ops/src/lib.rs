//! File operations engine for tripane.
//!
//! This crate provides the conflict-checked transfer operations (copy, copy
//! tree, move, drop), the platform launcher used to open paths with their
//! default application, and an async wrapper that runs a transfer on a
//! blocking worker with progress reporting via channels.

mod drop;
mod job;
mod launcher;
mod progress;
mod transfer;

pub use drop::{DropAction, DropOutcome, fallback_location};
pub use job::{JobOutcome, TransferEvent, TransferRequest, start_transfer};
pub use launcher::{Launcher, SystemLauncher};
pub use progress::{TransferKind, TransferProgress, TransferReport};
pub use transfer::{TransferEngine, TransferOptions};

pub use tokio_util::sync::CancellationToken;

/// Default channel buffer size for transfer progress updates.
pub const TRANSFER_CHANNEL_SIZE: usize = 100;

//! Core types for tripane.
//!
//! This crate provides the pieces every other tripane crate builds on:
//! path classification, on-demand directory listings, the per-pane name
//! filter, the shared error taxonomy and configuration.

mod config;
mod entry;
mod error;
mod filter;
mod listing;

pub use config::{ExplorerConfig, ExplorerConfigBuilder};
pub use entry::{EntryKind, PathEntry, absolutize, classify};
pub use error::{ErrorCategory, FsError, FsResult};
pub use filter::{FilterView, apply_filter};
pub use listing::{ListEntry, ListingOptions, read_listing};

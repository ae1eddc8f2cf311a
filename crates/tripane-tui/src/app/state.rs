//! Application state types.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use tripane_core::{ErrorCategory, FilterView, FsError, ListEntry};
use tripane_nav::PastePlan;
use tripane_ops::{CancellationToken, TransferEvent, TransferKind, TransferProgress};

/// Application mode representing the current UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    Help,
    /// Editing the focused pane's filter.
    Filter,
    /// Asking for the folder to paste into.
    PastePrompt,
    /// A paste or drop is running in the background.
    Transferring,
    Quit,
}

/// Rows and cursor of one pane.
///
/// The cursor indexes the filtered rows, so it always points at something
/// the user can see.
#[derive(Debug, Clone, Default)]
pub struct PaneState {
    entries: Vec<ListEntry>,
    filter: FilterView,
    visible: Vec<usize>,
    selected: usize,
    error: Option<String>,
}

impl PaneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows, keeping the cursor on the same path when it is still listed.
    pub fn set_entries(&mut self, entries: Vec<ListEntry>) {
        let previous = self.selected_path().map(Path::to_path_buf);
        self.entries = entries;
        self.error = None;
        self.refilter();
        if let Some(previous) = previous {
            self.select_path(&previous);
        }
    }

    /// Show an error instead of rows.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.entries.clear();
        self.visible.clear();
        self.selected = 0;
        self.error = Some(message.into());
    }

    /// Empty the pane. The filter is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.visible.clear();
        self.selected = 0;
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> &FilterView {
        &self.filter
    }

    /// Change the filter and recompute which rows are shown.
    pub fn set_filter(&mut self, needle: &str) {
        self.filter.set_needle(needle);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = self.filter.visible(&self.entries);
        self.selected = self.selected.min(self.visible.len().saturating_sub(1));
    }

    /// Number of rows in the listing before filtering.
    pub fn total_len(&self) -> usize {
        self.entries.len()
    }

    /// Number of rows the filter lets through.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Rows the filter lets through, in order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &ListEntry> {
        self.visible.iter().filter_map(|&i| self.entries.get(i))
    }

    /// Cursor position among the visible rows.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Row under the cursor.
    pub fn selected_entry(&self) -> Option<&ListEntry> {
        self.visible
            .get(self.selected)
            .and_then(|&i| self.entries.get(i))
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.selected_entry().map(|e| e.path.as_path())
    }

    /// Move the cursor to `path` if it is visible.
    pub fn select_path(&mut self, path: &Path) -> bool {
        let found = self.visible_entries().position(|e| e.path == path);
        match found {
            Some(pos) => {
                self.selected = pos;
                true
            }
            None => false,
        }
    }

    pub fn move_up(&mut self, count: usize) {
        self.selected = self.selected.saturating_sub(count);
    }

    pub fn move_down(&mut self, count: usize) {
        self.selected = (self.selected + count).min(self.visible.len().saturating_sub(1));
    }

    pub fn jump_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }
}

/// Tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error(ErrorCategory),
}

/// One-line message shown in the footer until the next action.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(err: &FsError) -> Self {
        Self {
            kind: StatusKind::Error(err.category()),
            text: err.to_string(),
        }
    }
}

/// What to do with the navigation state when a transfer finishes.
#[derive(Debug, Clone)]
pub enum PendingTransfer {
    Paste(PastePlan),
    Drop { source: PathBuf },
}

/// A transfer running on the blocking pool.
pub struct ActiveTransfer {
    pub kind: TransferKind,
    pub source: PathBuf,
    pub rx: mpsc::Receiver<TransferEvent>,
    pub cancel: CancellationToken,
    pub progress: Option<TransferProgress>,
    pub pending: PendingTransfer,
}

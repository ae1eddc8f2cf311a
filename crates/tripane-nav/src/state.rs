//! The three navigation levels and the operations that act on them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use strum::{Display, EnumIter, FromRepr};

use tripane_core::{
    EntryKind, ExplorerConfig, FsError, FsResult, ListEntry, ListingOptions, absolutize, classify,
    read_listing,
};
use tripane_ops::{
    DropAction, DropOutcome, Launcher, SystemLauncher, TransferEngine, TransferOptions,
    TransferRequest,
};

use crate::clipboard::{ClipEntry, ClipMode, ClipboardSlot};

/// One of the three cascading panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromRepr)]
pub enum Level {
    #[strum(to_string = "Directories")]
    Top,
    #[strum(to_string = "Subdirectories")]
    Middle,
    #[strum(to_string = "Files & Inner Subdirectories")]
    Inner,
}

impl Level {
    /// Position from the left, starting at 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The level to the right, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_repr(self as usize + 1)
    }

    /// The level to the left, if any.
    pub fn prev(self) -> Option<Self> {
        (self as usize).checked_sub(1).and_then(Self::from_repr)
    }
}

/// Root and selection of one pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationLevel {
    root: Option<PathBuf>,
    selection: Option<PathBuf>,
}

impl NavigationLevel {
    fn rooted_at(root: PathBuf) -> Self {
        Self {
            root: Some(root),
            selection: None,
        }
    }

    /// Directory this level lists, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Last selected row.
    pub fn selection(&self) -> Option<&Path> {
        self.selection.as_deref()
    }

    /// Check if this level has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn clear(&mut self) {
        self.root = None;
        self.selection = None;
    }

    fn contains(&self, path: &Path) -> bool {
        self.root
            .as_deref()
            .is_some_and(|root| path.starts_with(root) && path != root)
    }
}

/// A paste that has been validated but not yet executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastePlan {
    /// Path taken from the clipboard.
    pub source: PathBuf,
    /// How the source is copied.
    pub mode: ClipMode,
    /// Final path of the copy.
    pub destination: PathBuf,
}

impl PastePlan {
    /// The transfer that carries out this paste.
    pub fn request(&self) -> TransferRequest {
        match self.mode {
            ClipMode::File => TransferRequest::CopyFile {
                source: self.source.clone(),
                destination: self.destination.clone(),
            },
            ClipMode::Folder => TransferRequest::CopyTree {
                source: self.source.clone(),
                destination: self.destination.clone(),
            },
        }
    }
}

/// Navigation levels, clipboard and the operations between them.
pub struct NavigationState<L: Launcher = SystemLauncher> {
    levels: [NavigationLevel; 3],
    clipboard: ClipboardSlot,
    engine: TransferEngine,
    launcher: L,
    listing_options: ListingOptions,
    drop_fallback: Option<PathBuf>,
}

impl NavigationState<SystemLauncher> {
    /// Create a state rooted at `config.root`, opening paths with the
    /// configured or platform launcher.
    pub fn new(config: &ExplorerConfig) -> FsResult<Self> {
        let launcher = SystemLauncher::from_config(config.opener.as_deref());
        Self::with_launcher(config, launcher)
    }
}

impl<L: Launcher> NavigationState<L> {
    /// Create a state rooted at `config.root` using `launcher`.
    pub fn with_launcher(config: &ExplorerConfig, launcher: L) -> FsResult<Self> {
        let mut state = Self {
            levels: Default::default(),
            clipboard: ClipboardSlot::new(),
            engine: TransferEngine::new(TransferOptions {
                preserve_metadata: config.preserve_metadata,
            }),
            launcher,
            listing_options: config.listing_options(),
            drop_fallback: config.drop_fallback.clone(),
        };
        state.select_root(&config.root)?;
        Ok(state)
    }

    /// The state of one level.
    pub fn level(&self, level: Level) -> &NavigationLevel {
        &self.levels[level.index()]
    }

    /// The pending paste source.
    pub fn clipboard(&self) -> &ClipboardSlot {
        &self.clipboard
    }

    /// The launcher used by [`activate`](Self::activate).
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Whether listings include hidden entries.
    pub fn show_hidden(&self) -> bool {
        self.listing_options.show_hidden
    }

    /// Include or skip hidden entries in subsequent listings.
    pub fn set_show_hidden(&mut self, show: bool) {
        self.listing_options.show_hidden = show;
    }

    /// Read the current contents of a level. Empty levels list nothing.
    pub fn listing(&self, level: Level) -> FsResult<Vec<ListEntry>> {
        match self.level(level).root() {
            Some(root) => read_listing(root, self.listing_options),
            None => Ok(Vec::new()),
        }
    }

    /// Set the top-level root, clearing the two levels below it.
    pub fn select_root(&mut self, root: &Path) -> FsResult<()> {
        let root = absolutize(root);
        match classify(&root) {
            EntryKind::Directory => {}
            EntryKind::File => return Err(FsError::NotADirectory { path: root }),
            EntryKind::Missing => return Err(FsError::NotFound { path: root }),
        }

        tracing::debug!(root = %root.display(), "root selected");
        self.levels[Level::Top.index()] = NavigationLevel::rooted_at(root);
        self.clear_from(Level::Middle);
        Ok(())
    }

    /// Select `path` in the top level.
    ///
    /// A directory becomes the middle level's root and the inner level is
    /// cleared. Anything else is ignored. Returns whether the cascade ran.
    pub fn select_level1(&mut self, path: &Path) -> bool {
        self.cascade(Level::Top, path)
    }

    /// Select `path` in the middle level.
    ///
    /// A directory inside the middle root becomes the inner level's root.
    /// Ignored when the middle level is empty or `path` lies outside it.
    pub fn select_level2(&mut self, path: &Path) -> bool {
        let path = absolutize(path);
        if !self.level(Level::Middle).contains(&path) {
            tracing::debug!(path = %path.display(), "selection outside middle level ignored");
            return false;
        }
        self.cascade(Level::Middle, &path)
    }

    /// Select `path` at `level`.
    ///
    /// Inner-level selections only record the row. Returns whether a deeper
    /// level was re-rooted.
    pub fn select(&mut self, level: Level, path: &Path) -> bool {
        match level {
            Level::Top => self.select_level1(path),
            Level::Middle => self.select_level2(path),
            Level::Inner => {
                let path = absolutize(path);
                let inner = &mut self.levels[Level::Inner.index()];
                if inner.contains(&path) {
                    inner.selection = Some(path);
                }
                false
            }
        }
    }

    fn cascade(&mut self, level: Level, path: &Path) -> bool {
        let Some(next) = level.next() else {
            return false;
        };
        let path = absolutize(path);
        if !classify(&path).is_dir() {
            return false;
        }

        tracing::debug!(level = %level, path = %path.display(), "directory selected");
        self.levels[level.index()].selection = Some(path.clone());
        self.levels[next.index()] = NavigationLevel::rooted_at(path);
        if let Some(after) = next.next() {
            self.clear_from(after);
        }
        true
    }

    fn clear_from(&mut self, level: Level) {
        for slot in &mut self.levels[level.index()..] {
            slot.clear();
        }
    }

    /// Open `path` with the launcher.
    pub fn activate(&self, path: &Path) -> FsResult<()> {
        self.launcher.open(path).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "could not open path");
        })
    }

    /// The command to run in the foreground instead of [`activate`](Self::activate),
    /// when the launcher needs the terminal.
    pub fn foreground_command(&self, path: &Path) -> FsResult<Option<Command>> {
        self.launcher.foreground_command(path)
    }

    /// Put `path` in the clipboard.
    ///
    /// Copying the same path again leaves the slot unchanged. A missing path
    /// is refused and the slot is left as it was.
    pub fn copy(&mut self, path: &Path) -> FsResult<ClipMode> {
        let path = absolutize(path);
        let mode = ClipMode::for_kind(classify(&path))
            .ok_or_else(|| FsError::NotFound { path: path.clone() })?;

        if self.clipboard.set(ClipEntry {
            source: path.clone(),
            mode,
        }) {
            tracing::debug!(path = %path.display(), mode = %mode, "copied to clipboard");
        }
        Ok(mode)
    }

    /// Validate a paste into `target` without touching the filesystem.
    pub fn plan_paste(&self, target: &Path) -> FsResult<PastePlan> {
        let entry = self.clipboard.peek().ok_or(FsError::EmptyClipboard)?;

        let target = absolutize(target);
        match classify(&target) {
            EntryKind::Directory => {}
            EntryKind::File => return Err(FsError::NotADirectory { path: target }),
            EntryKind::Missing => return Err(FsError::NotFound { path: target }),
        }

        let name = entry.source.file_name().ok_or_else(|| {
            FsError::io(
                &entry.source,
                io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;
        let destination = target.join(name);
        if fs::symlink_metadata(&destination).is_ok() {
            tracing::warn!(destination = %destination.display(), "paste refused, target exists");
            return Err(FsError::AlreadyExists { path: destination });
        }

        Ok(PastePlan {
            source: entry.source.clone(),
            mode: entry.mode,
            destination,
        })
    }

    /// Settle the clipboard once a planned paste has run.
    ///
    /// Success clears the slot if it still holds the plan's source. Failure
    /// leaves it untouched so the paste can be retried.
    pub fn finish_paste<T>(&mut self, plan: &PastePlan, result: FsResult<T>) -> FsResult<T> {
        match &result {
            Ok(_) => {
                if self.clipboard.holds(&plan.source) {
                    self.clipboard.clear();
                }
                tracing::info!(destination = %plan.destination.display(), "pasted");
            }
            Err(e) => {
                tracing::warn!(source = %plan.source.display(), error = %e, "paste failed");
            }
        }
        result
    }

    /// Paste the clipboard entry into `target`, returning the final path.
    pub fn paste_into(&mut self, target: &Path) -> FsResult<PathBuf> {
        let plan = self.plan_paste(target)?;
        let result = plan.request().execute(&self.engine);
        self.finish_paste(&plan, result)?;
        Ok(plan.destination)
    }

    /// The transfer for dropping `source` onto `drop_target`.
    ///
    /// The fallback folder is only looked up if the target turns out to be a file.
    pub fn drop_request(&self, source: &Path, drop_target: &Path) -> TransferRequest {
        TransferRequest::Drop {
            source: absolutize(source),
            target: absolutize(drop_target),
            fallback: self.drop_fallback.clone(),
        }
    }

    /// Update the levels after a drop of `source` completed.
    pub fn finish_drop(&mut self, source: &Path, outcome: &DropOutcome) {
        if outcome.action == DropAction::Moved {
            self.forget(&absolutize(source));
        }
    }

    /// Drop `source` onto `drop_target`.
    pub fn drop_onto(&mut self, source: &Path, drop_target: &Path) -> FsResult<DropOutcome> {
        let source = absolutize(source);

        let outcome = self
            .engine
            .drop_onto_target(&source, &absolutize(drop_target), self.drop_fallback.as_deref())
            .inspect_err(|e| tracing::warn!(source = %source.display(), error = %e, "drop failed"))?;
        self.finish_drop(&source, &outcome);
        Ok(outcome)
    }

    /// Drop every reference to a path that no longer exists at `gone`.
    fn forget(&mut self, gone: &Path) {
        for level in [Level::Top, Level::Middle, Level::Inner] {
            let slot = &self.levels[level.index()];
            if slot.root().is_some_and(|root| root.starts_with(gone)) {
                tracing::debug!(level = %level, "level root moved away, clearing");
                self.clear_from(level);
                return;
            }
            let slot = &mut self.levels[level.index()];
            if slot.selection().is_some_and(|sel| sel.starts_with(gone)) {
                slot.selection = None;
                if let Some(next) = level.next() {
                    self.clear_from(next);
                }
                return;
            }
        }
    }

    /// Clear any level whose root is no longer a directory.
    pub fn revalidate(&mut self) {
        for level in [Level::Top, Level::Middle, Level::Inner] {
            let stale = self
                .level(level)
                .root()
                .is_some_and(|root| !classify(root).is_dir());
            if stale {
                tracing::debug!(level = %level, "level root vanished, clearing");
                self.clear_from(level);
                return;
            }
        }
    }
}

impl<L: Launcher> std::fmt::Debug for NavigationState<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationState")
            .field("levels", &self.levels)
            .field("clipboard", &self.clipboard)
            .field("launcher", &self.launcher.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order() {
        assert_eq!(Level::Top.next(), Some(Level::Middle));
        assert_eq!(Level::Inner.next(), None);
        assert_eq!(Level::Top.prev(), None);
        assert_eq!(Level::Inner.prev(), Some(Level::Middle));
        assert_eq!(Level::Middle.index(), 1);
    }

    #[test]
    fn test_level_contains_excludes_root() {
        let level = NavigationLevel::rooted_at(PathBuf::from("/a/b"));
        assert!(level.contains(Path::new("/a/b/c")));
        assert!(!level.contains(Path::new("/a/b")));
        assert!(!level.contains(Path::new("/a/bc")));
        assert!(!NavigationLevel::default().contains(Path::new("/a")));
    }

    #[test]
    fn test_paste_plan_request() {
        let plan = PastePlan {
            source: PathBuf::from("/a/Photos"),
            mode: ClipMode::Folder,
            destination: PathBuf::from("/b/Photos"),
        };
        assert!(matches!(plan.request(), TransferRequest::CopyTree { .. }));
    }
}

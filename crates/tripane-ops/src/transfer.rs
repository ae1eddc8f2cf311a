//! Conflict-checked copy and move operations.
//!
//! None of these operations overwrite anything: if the destination exists
//! the call fails with `AlreadyExists` before touching the filesystem.
//! Recursive copies are not atomic. A failure or cancellation part way
//! through leaves whatever was already copied in place.
//!
//! Symlinks inside a copied tree are recreated as links rather than
//! followed, so a link back to an ancestor cannot recurse.

use std::fs::{self, File, FileTimes, Metadata};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use tripane_core::{EntryKind, FsError, FsResult, absolutize, classify};

use crate::progress::{TransferKind, TransferProgress, TransferReport};

type ProgressCallback = Arc<dyn Fn(&TransferProgress) + Send + Sync>;

/// Options for transfer operations.
#[derive(Debug, Clone, Copy)]
pub struct TransferOptions {
    /// Whether to preserve access and modification times.
    pub preserve_metadata: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            preserve_metadata: true,
        }
    }
}

/// Performs file-system transfers with optional progress and cancellation.
#[derive(Clone, Default)]
pub struct TransferEngine {
    options: TransferOptions,
    cancel: Option<CancellationToken>,
    on_progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for TransferEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferEngine")
            .field("options", &self.options)
            .field("cancellable", &self.cancel.is_some())
            .field("reports_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl TransferEngine {
    /// Create an engine with the given options.
    pub fn new(options: TransferOptions) -> Self {
        Self {
            options,
            cancel: None,
            on_progress: None,
        }
    }

    /// Stop between entries once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Report progress after every copied file.
    pub fn with_progress(
        mut self,
        callback: impl Fn(&TransferProgress) + Send + Sync + 'static,
    ) -> Self {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// Copy a single file to `dst`.
    pub fn copy_file(&self, src: &Path, dst: &Path) -> FsResult<TransferReport> {
        ensure_absent(dst)?;
        match classify(src) {
            EntryKind::Missing => return Err(not_found(src)),
            EntryKind::Directory => {
                return Err(FsError::io(
                    src,
                    io::Error::new(io::ErrorKind::IsADirectory, "source is a directory"),
                ));
            }
            EntryKind::File => {}
        }

        let mut progress = TransferProgress::new(TransferKind::Copy);
        self.copy_file_inner(src, dst, &mut progress)?;

        tracing::info!(src = %src.display(), dst = %dst.display(), "copied file");
        Ok(TransferReport::from_progress(
            &progress,
            src.to_path_buf(),
            dst.to_path_buf(),
        ))
    }

    /// Recursively copy the directory `src` to `dst`.
    pub fn copy_tree(&self, src: &Path, dst: &Path) -> FsResult<TransferReport> {
        ensure_absent(dst)?;
        match classify(src) {
            EntryKind::Missing => return Err(not_found(src)),
            EntryKind::File => {
                return Err(FsError::NotADirectory {
                    path: src.to_path_buf(),
                });
            }
            EntryKind::Directory => {}
        }
        ensure_outside(src, dst)?;

        let mut progress = TransferProgress::new(TransferKind::Copy);
        self.copy_dir_recursive(src, dst, &mut progress)?;

        tracing::info!(
            src = %src.display(),
            dst = %dst.display(),
            files = progress.files_completed,
            "copied directory tree"
        );
        Ok(TransferReport::from_progress(
            &progress,
            src.to_path_buf(),
            dst.to_path_buf(),
        ))
    }

    /// Move `src` to `dst`.
    ///
    /// Tries a rename first; when source and destination are on different
    /// volumes, falls back to copy-then-delete.
    pub fn move_path(&self, src: &Path, dst: &Path) -> FsResult<TransferReport> {
        let kind = classify(src);
        if kind.is_missing() {
            return Err(not_found(src));
        }
        ensure_absent(dst)?;
        // Renaming a link moves the link, wherever it points.
        let is_link = is_symlink(src);
        if !is_link {
            ensure_outside(src, dst)?;
        }
        self.checkpoint()?;

        let mut progress = TransferProgress::new(TransferKind::Move);
        progress.set_current_file(Some(src.to_path_buf()));

        match fs::rename(src, dst) {
            Ok(()) => {
                let bytes = fs::metadata(dst)
                    .ok()
                    .filter(|m| m.is_file())
                    .map(|m| m.len())
                    .unwrap_or(0);
                progress.complete_file(bytes);
                self.report(&progress);
            }
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                tracing::debug!(src = %src.display(), "rename crosses devices, copying");
                if is_link {
                    self.copy_link_inner(src, dst, &mut progress)?;
                    fs::remove_file(src).map_err(|e| FsError::io(src, e))?;
                } else if kind.is_dir() {
                    self.copy_dir_recursive(src, dst, &mut progress)?;
                    fs::remove_dir_all(src).map_err(|e| FsError::io(src, e))?;
                } else {
                    self.copy_file_inner(src, dst, &mut progress)?;
                    fs::remove_file(src).map_err(|e| FsError::io(src, e))?;
                }
            }
            Err(e) => return Err(FsError::io(src, e)),
        }

        tracing::info!(src = %src.display(), dst = %dst.display(), "moved");
        Ok(TransferReport::from_progress(
            &progress,
            src.to_path_buf(),
            dst.to_path_buf(),
        ))
    }

    /// Copy `src` to `dst`, picking a file or tree copy from its kind.
    pub fn copy_any(&self, src: &Path, dst: &Path) -> FsResult<TransferReport> {
        match classify(src) {
            EntryKind::Directory => self.copy_tree(src, dst),
            EntryKind::File => self.copy_file(src, dst),
            EntryKind::Missing => Err(not_found(src)),
        }
    }

    fn copy_file_inner(
        &self,
        src: &Path,
        dst: &Path,
        progress: &mut TransferProgress,
    ) -> FsResult<()> {
        self.checkpoint()?;
        progress.set_current_file(Some(src.to_path_buf()));

        let metadata = fs::metadata(src).map_err(|e| FsError::io(src, e))?;
        let bytes = fs::copy(src, dst).map_err(|e| copy_error(src, dst, e))?;

        if self.options.preserve_metadata {
            open_for_times(dst)
                .and_then(|file| file.set_times(file_times(&metadata)))
                .map_err(|e| FsError::io(dst, e))?;
        }

        progress.complete_file(bytes);
        self.report(progress);
        Ok(())
    }

    fn copy_dir_recursive(
        &self,
        src: &Path,
        dst: &Path,
        progress: &mut TransferProgress,
    ) -> FsResult<()> {
        self.checkpoint()?;
        let metadata = fs::metadata(src).map_err(|e| FsError::io(src, e))?;
        fs::create_dir(dst).map_err(|e| FsError::io(dst, e))?;

        let entries = fs::read_dir(src).map_err(|e| FsError::io(src, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| FsError::io(src, e))?;
            let path = entry.path();
            let target = dst.join(entry.file_name());

            let file_type = entry.file_type().map_err(|e| FsError::io(&path, e))?;
            if file_type.is_symlink() {
                self.copy_link_inner(&path, &target, progress)?;
            } else if file_type.is_dir() {
                self.copy_dir_recursive(&path, &target, progress)?;
            } else {
                self.copy_file_inner(&path, &target, progress)?;
            }
        }

        // Directory times change as children are written, so apply them last.
        if self.options.preserve_metadata {
            if let Err(e) = open_for_times(dst).and_then(|d| d.set_times(file_times(&metadata))) {
                tracing::debug!(dir = %dst.display(), error = %e, "could not preserve directory times");
            }
        }
        Ok(())
    }

    fn copy_link_inner(
        &self,
        src: &Path,
        dst: &Path,
        progress: &mut TransferProgress,
    ) -> FsResult<()> {
        self.checkpoint()?;
        progress.set_current_file(Some(src.to_path_buf()));
        copy_link(src, dst).map_err(|e| copy_error(src, dst, e))?;
        progress.complete_file(0);
        self.report(progress);
        Ok(())
    }

    fn checkpoint(&self) -> FsResult<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(FsError::Cancelled),
            _ => Ok(()),
        }
    }

    fn report(&self, progress: &TransferProgress) {
        if let Some(callback) = &self.on_progress {
            callback(progress);
        }
    }
}

/// Open a handle that may update timestamps, even on a read-only copy.
fn open_for_times(path: &Path) -> io::Result<File> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        // FILE_WRITE_ATTRIBUTES, with FILE_FLAG_BACKUP_SEMANTICS so directories open too.
        File::options()
            .access_mode(0x100)
            .custom_flags(0x0200_0000)
            .open(path)
    }
    #[cfg(not(windows))]
    {
        File::open(path)
    }
}

/// Recreate the symlink `src` at `dst` without following it.
fn copy_link(src: &Path, dst: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&target, dst)
    }
    #[cfg(windows)]
    {
        if fs::metadata(src).is_ok_and(|m| m.is_dir()) {
            std::os::windows::fs::symlink_dir(&target, dst)
        } else {
            std::os::windows::fs::symlink_file(&target, dst)
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = (target, dst);
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "symlinks are not supported on this platform",
        ))
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

fn file_times(metadata: &Metadata) -> FileTimes {
    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    times
}

fn not_found(path: &Path) -> FsError {
    FsError::NotFound {
        path: path.to_path_buf(),
    }
}

/// Refuse to write over anything, including a dangling symlink.
fn ensure_absent(dst: &Path) -> FsResult<()> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(FsError::AlreadyExists {
            path: dst.to_path_buf(),
        });
    }
    Ok(())
}

/// Refuse a destination nested inside the directory `src` resolves to.
fn ensure_outside(src: &Path, dst: &Path) -> FsResult<()> {
    let src_real = match fs::canonicalize(src) {
        Ok(real) if !real.is_dir() => return Ok(()),
        Ok(real) => real,
        Err(_) => absolutize(src),
    };
    let dst_real = match (dst.parent(), dst.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or_else(|_| absolutize(dst)),
        _ => absolutize(dst),
    };

    if dst_real.starts_with(&src_real) {
        return Err(FsError::SourceIsAncestor {
            source_dir: src.to_path_buf(),
            destination: dst.to_path_buf(),
        });
    }
    Ok(())
}

/// Attribute a copy failure to whichever side is at fault.
fn copy_error(src: &Path, dst: &Path, e: io::Error) -> FsError {
    if src.exists() {
        FsError::io(dst, e)
    } else {
        FsError::io(src, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ensure_absent(&dir.path().join("free")).is_ok());
        assert!(matches!(
            ensure_absent(dir.path()),
            Err(FsError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_ensure_outside() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();

        assert!(ensure_outside(&src, &dir.path().join("other")).is_ok());
        assert!(ensure_outside(&src, &src.join("nested")).is_err());
        // Sibling with a shared name prefix is not nested.
        assert!(ensure_outside(&src, &dir.path().join("src-copy")).is_ok());
    }

    #[test]
    fn test_ensure_outside_ignores_file_sources() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"a").unwrap();

        assert!(ensure_outside(&src, &src.join("b.txt")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_link_keeps_target() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("missing-target", &link).unwrap();

        copy_link(&link, &dir.path().join("copy")).unwrap();
        assert!(is_symlink(&dir.path().join("copy")));
        assert_eq!(
            fs::read_link(dir.path().join("copy")).unwrap(),
            Path::new("missing-target")
        );
    }

    #[test]
    fn test_cancelled_engine_stops() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"data").unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let engine = TransferEngine::default().with_cancel(token);

        let err = engine.copy_file(&src, &dir.path().join("b.txt")).unwrap_err();
        assert!(matches!(err, FsError::Cancelled));
        assert!(!dir.path().join("b.txt").exists());
    }
}

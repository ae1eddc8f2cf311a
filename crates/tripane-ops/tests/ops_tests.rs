use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tripane_core::FsError;
use tripane_ops::{
    CancellationToken, DropAction, JobOutcome, Launcher, SystemLauncher, TransferEngine,
    TransferEvent, TransferKind, TransferOptions, TransferRequest, start_transfer,
};

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_copy_file_preserves_content() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("report.txt");
    let dst_dir = temp.path().join("B");
    write(&src, "abc");
    fs::create_dir(&dst_dir).unwrap();

    let engine = TransferEngine::default();
    let report = engine.copy_file(&src, &dst_dir.join("report.txt")).unwrap();

    assert_eq!(fs::read_to_string(dst_dir.join("report.txt")).unwrap(), "abc");
    assert!(src.exists());
    assert_eq!(report.kind, TransferKind::Copy);
    assert_eq!(report.files, 1);
    assert_eq!(report.bytes, 3);
}

#[test]
fn test_copy_file_keeps_modified_time() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("a.txt");
    write(&src, "x");
    let old = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
    fs::File::options()
        .write(true)
        .open(&src)
        .unwrap()
        .set_modified(old)
        .unwrap();

    let dst = temp.path().join("b.txt");
    TransferEngine::default().copy_file(&src, &dst).unwrap();

    assert_eq!(fs::metadata(&dst).unwrap().modified().unwrap(), old);
}

#[test]
fn test_copy_file_refuses_existing_target() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("report.txt");
    let dst = temp.path().join("B/report.txt");
    write(&src, "new");
    write(&dst, "old");

    let err = TransferEngine::default().copy_file(&src, &dst).unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "old");
}

#[test]
fn test_copy_missing_source() {
    let temp = TempDir::new().unwrap();
    let err = TransferEngine::default()
        .copy_file(&temp.path().join("gone.txt"), &temp.path().join("x.txt"))
        .unwrap_err();
    assert!(matches!(err, FsError::NotFound { .. }));
}

#[test]
fn test_copy_tree_recursive() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("Photos");
    write(&src.join("a.jpg"), "1");
    write(&src.join("sub/b.jpg"), "22");
    fs::create_dir(src.join("empty")).unwrap();
    let dst = temp.path().join("Backup/Photos");
    fs::create_dir(temp.path().join("Backup")).unwrap();

    let report = TransferEngine::default().copy_tree(&src, &dst).unwrap();

    assert_eq!(fs::read_to_string(dst.join("a.jpg")).unwrap(), "1");
    assert_eq!(fs::read_to_string(dst.join("sub/b.jpg")).unwrap(), "22");
    assert!(dst.join("empty").is_dir());
    assert!(src.join("sub/b.jpg").exists());
    assert_eq!(report.files, 2);
    assert_eq!(report.bytes, 3);
}

#[test]
fn test_copy_tree_into_itself() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("Photos");
    write(&src.join("a.jpg"), "1");

    let err = TransferEngine::default()
        .copy_tree(&src, &src.join("Photos"))
        .unwrap_err();

    assert!(matches!(err, FsError::SourceIsAncestor { .. }));
    assert!(!src.join("Photos").exists());
}

#[test]
fn test_copy_tree_reports_progress() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    for i in 0..4 {
        write(&src.join(format!("f{i}.txt")), "data");
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let engine = TransferEngine::default().with_progress(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    engine.copy_tree(&src, &temp.path().join("dst")).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_move_file() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("notes.txt");
    write(&src, "hello");
    let dst = temp.path().join("Archive/notes.txt");
    fs::create_dir(temp.path().join("Archive")).unwrap();

    let report = TransferEngine::default().move_path(&src, &dst).unwrap();

    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");
    assert_eq!(report.kind, TransferKind::Move);
}

#[test]
fn test_move_refuses_existing_target() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("notes.txt");
    let dst = temp.path().join("other.txt");
    write(&src, "a");
    write(&dst, "b");

    let err = TransferEngine::default().move_path(&src, &dst).unwrap_err();

    assert!(err.is_conflict());
    assert!(src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "b");
}

#[test]
fn test_drop_onto_directory_moves() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("notes.txt");
    let archive = temp.path().join("Archive");
    let fallback = temp.path().join("Desktop");
    write(&src, "hello");
    fs::create_dir(&archive).unwrap();
    fs::create_dir(&fallback).unwrap();

    let outcome = TransferEngine::default()
        .drop_onto_target(&src, &archive, Some(&fallback))
        .unwrap();

    assert_eq!(outcome.action, DropAction::Moved);
    assert!(!src.exists());
    assert!(archive.join("notes.txt").exists());
    assert!(!fallback.join("notes.txt").exists());
}

#[test]
fn test_drop_onto_directory_ignores_fallback() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("notes.txt");
    let archive = temp.path().join("Archive");
    let missing = temp.path().join("no-such-folder");
    write(&src, "hello");
    fs::create_dir(&archive).unwrap();

    let outcome = TransferEngine::default()
        .drop_onto_target(&src, &archive, Some(&missing))
        .unwrap();
    assert_eq!(outcome.action, DropAction::Moved);
    assert!(archive.join("notes.txt").exists());

    // The same fallback is rejected once it is actually needed.
    let target = temp.path().join("readme.md");
    write(&target, "readme");
    let err = TransferEngine::default()
        .drop_onto_target(&archive.join("notes.txt"), &target, Some(&missing))
        .unwrap_err();
    assert!(matches!(err, FsError::NotFound { path } if path == missing));
}

#[test]
fn test_drop_onto_file_copies_to_fallback() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("notes.txt");
    let target = temp.path().join("readme.md");
    let fallback = temp.path().join("Desktop");
    write(&src, "hello");
    write(&target, "readme");
    fs::create_dir(&fallback).unwrap();

    let outcome = TransferEngine::default()
        .drop_onto_target(&src, &target, Some(&fallback))
        .unwrap();

    assert_eq!(outcome.action, DropAction::CopiedToFallback);
    assert!(src.exists());
    assert_eq!(fs::read_to_string(fallback.join("notes.txt")).unwrap(), "hello");
    assert_eq!(fs::read_to_string(&target).unwrap(), "readme");
}

#[test]
fn test_drop_directory_onto_file_copies_tree() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("Photos");
    let target = temp.path().join("readme.md");
    let fallback = temp.path().join("Desktop");
    write(&src.join("a.jpg"), "1");
    write(&target, "readme");
    fs::create_dir(&fallback).unwrap();

    TransferEngine::default()
        .drop_onto_target(&src, &target, Some(&fallback))
        .unwrap();

    assert!(src.join("a.jpg").exists());
    assert!(fallback.join("Photos/a.jpg").exists());
}

#[test]
fn test_drop_conflict_leaves_source() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("notes.txt");
    let archive = temp.path().join("Archive");
    write(&src, "new");
    write(&archive.join("notes.txt"), "old");

    let err = TransferEngine::default()
        .drop_onto_target(&src, &archive, Some(temp.path()))
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(src.exists());
    assert_eq!(fs::read_to_string(archive.join("notes.txt")).unwrap(), "old");
}

#[test]
fn test_drop_onto_missing_target() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("notes.txt");
    write(&src, "x");

    let err = TransferEngine::default()
        .drop_onto_target(&src, &temp.path().join("gone"), Some(temp.path()))
        .unwrap_err();

    assert!(matches!(err, FsError::NotFound { .. }));
    assert!(src.exists());
}

#[test]
fn test_drop_directory_into_itself() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("Photos");
    fs::create_dir_all(src.join("2024")).unwrap();

    let err = TransferEngine::default()
        .drop_onto_target(&src, &src.join("2024"), Some(temp.path()))
        .unwrap_err();

    assert!(matches!(err, FsError::SourceIsAncestor { .. }));
    assert!(src.join("2024").is_dir());
}

#[test]
fn test_cancelled_tree_copy_stops() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    write(&src.join("a.txt"), "a");

    let token = CancellationToken::new();
    token.cancel();
    let err = TransferEngine::new(TransferOptions::default())
        .with_cancel(token)
        .copy_tree(&src, &temp.path().join("dst"))
        .unwrap_err();

    assert!(matches!(err, FsError::Cancelled));
}

#[test]
fn test_tree_copy_cancelled_midway_keeps_partial_copy() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    for name in ["a.txt", "b.txt", "c.txt"] {
        write(&src.join(name), name);
    }

    let token = CancellationToken::new();
    let cancel = token.clone();
    let err = TransferEngine::new(TransferOptions::default())
        .with_cancel(token)
        .with_progress(move |_| cancel.cancel())
        .copy_tree(&src, &dst)
        .unwrap_err();

    assert!(matches!(err, FsError::Cancelled));
    // No rollback: the first file stays, nothing after it was written.
    let copied: Vec<_> = fs::read_dir(&dst).unwrap().collect();
    assert_eq!(copied.len(), 1);
    assert_eq!(fs::read_dir(&src).unwrap().count(), 3);
}

#[tokio::test]
async fn test_start_transfer_completes() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    write(&src.join("a.txt"), "a");
    write(&src.join("b.txt"), "bb");
    let dst = temp.path().join("dst");

    let mut rx = start_transfer(
        TransferRequest::CopyTree {
            source: src.clone(),
            destination: dst.clone(),
        },
        TransferOptions::default(),
        CancellationToken::new(),
    );

    let mut result = None;
    while let Some(event) = rx.recv().await {
        if let TransferEvent::Complete(r) = event {
            result = Some(r);
        }
    }

    let outcome = result.expect("no completion event").unwrap();
    assert!(matches!(outcome, JobOutcome::Transfer(_)));
    assert_eq!(outcome.report().files, 2);
    assert!(dst.join("b.txt").exists());
}

#[tokio::test]
async fn test_start_transfer_reports_conflict() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("a.txt");
    let dst = temp.path().join("b.txt");
    write(&src, "a");
    write(&dst, "b");

    let mut rx = start_transfer(
        TransferRequest::CopyFile {
            source: src,
            destination: dst,
        },
        TransferOptions::default(),
        CancellationToken::new(),
    );

    let mut conflict = false;
    while let Some(event) = rx.recv().await {
        if let TransferEvent::Complete(Err(e)) = event {
            conflict = e.is_conflict();
        }
    }
    assert!(conflict);
}

#[cfg(unix)]
#[test]
fn test_custom_launcher_exit_status() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("a.txt");
    write(&file, "x");

    assert!(SystemLauncher::Custom("true".into()).open(&file).is_ok());

    let err = SystemLauncher::Custom("false".into()).open(&file).unwrap_err();
    assert!(matches!(err, FsError::LaunchFailure { .. }));

    let err = SystemLauncher::Custom("tripane-no-such-opener".into())
        .open(&file)
        .unwrap_err();
    assert!(matches!(err, FsError::LaunchFailure { .. }));
}

#[cfg(unix)]
#[test]
fn test_move_symlink_into_its_target() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("D");
    let link = temp.path().join("L");
    fs::create_dir(&dir).unwrap();
    std::os::unix::fs::symlink(&dir, &link).unwrap();

    TransferEngine::default()
        .move_path(&link, &dir.join("L"))
        .unwrap();

    assert!(fs::symlink_metadata(&link).is_err());
    let moved = fs::symlink_metadata(dir.join("L")).unwrap();
    assert!(moved.file_type().is_symlink());
}

#[cfg(unix)]
#[test]
fn test_copy_tree_keeps_symlinks_as_links() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    write(&src.join("sub/a.txt"), "a");
    // Points back at the tree root; following it would never end.
    std::os::unix::fs::symlink("..", src.join("sub/up")).unwrap();

    TransferEngine::default().copy_tree(&src, &dst).unwrap();

    assert_eq!(fs::read_to_string(dst.join("sub/a.txt")).unwrap(), "a");
    let link = dst.join("sub/up");
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&link).unwrap(), Path::new(".."));
}

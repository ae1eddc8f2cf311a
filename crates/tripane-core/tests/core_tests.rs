use std::fs;

use tripane_core::{
    EntryKind, FilterView, ListingOptions, PathEntry, apply_filter, classify, read_listing,
};

#[test]
fn test_listing_orders_directories_first() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), b"bb").unwrap();
    fs::write(dir.path().join("A.txt"), b"a").unwrap();
    fs::create_dir(dir.path().join("zeta")).unwrap();
    fs::create_dir(dir.path().join("Alpha")).unwrap();

    let listing = read_listing(dir.path(), ListingOptions::default()).unwrap();
    let names: Vec<&str> = listing.iter().map(|e| e.name.as_str()).collect();

    assert_eq!(names, vec!["Alpha", "zeta", "A.txt", "b.txt"]);
    assert_eq!(listing[0].kind, EntryKind::Directory);
    assert_eq!(listing[3].size, 2);
}

#[test]
fn test_listing_hidden_entries() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".secret"), b"").unwrap();
    fs::write(dir.path().join("visible"), b"").unwrap();

    let listing = read_listing(dir.path(), ListingOptions::default()).unwrap();
    assert_eq!(listing.len(), 1);

    let listing = read_listing(dir.path(), ListingOptions { show_hidden: true }).unwrap();
    assert_eq!(listing.len(), 2);
    assert!(listing.iter().any(|e| e.hidden));
}

#[test]
fn test_filter_over_listing() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["Invoice.pdf", "report.txt", "INVOICE_2.pdf"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    let listing = read_listing(dir.path(), ListingOptions::default()).unwrap();
    let view = FilterView::new("invoice");
    let visible: Vec<&str> = view
        .visible(&listing)
        .into_iter()
        .map(|i| listing[i].name.as_str())
        .collect();

    assert_eq!(visible, vec!["Invoice.pdf", "INVOICE_2.pdf"]);
    // The listing itself is untouched.
    assert_eq!(listing.len(), 3);
}

#[test]
fn test_filter_rows_in_given_order() {
    let rows = ["Invoice.pdf", "report.txt", "INVOICE_2.pdf"];
    assert_eq!(apply_filter(&rows, "invoice"), vec![true, false, true]);
    assert_eq!(apply_filter(&rows, ""), vec![true, true, true]);
    assert_eq!(apply_filter(&rows, "REPORT"), vec![false, true, false]);
}

#[test]
fn test_path_entry_tracks_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");

    let mut entry = PathEntry::resolve(&sub);
    assert!(entry.kind.is_missing());

    fs::create_dir(&sub).unwrap();
    assert_eq!(entry.refresh(), EntryKind::Directory);
    assert_eq!(classify(&sub), EntryKind::Directory);
}

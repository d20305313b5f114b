//! Unit and router tests for MediaShelf.
//!
//! - **classify_tests**: byte formatting and extension classification
//! - **scanner_tests**: category and file enumeration, denylist handling
//! - **search_tests**: flat listing and search predicates
//! - **content_tests**: path resolution, containment and streaming
//! - **api_tests**: HTTP endpoints through the full router
//! - **error_tests**: status code mapping
//! - **config_tests**: defaults and validation

pub mod api_tests;

use std::fs;

use tempfile::TempDir;

use crate::library::{Denylist, Library};

/// Builds the reference tree:
///
/// ```text
/// photos/a.jpg        2048 bytes
/// photos/b.txt          10 bytes
/// photos/.DS_Store     (denylisted)
/// photos/debug.log     (denylisted by glob)
/// photos/raw/          (subdirectory, not a file)
/// clips/c.mp4    5_000_000 bytes (sparse)
/// .git/HEAD            (denylisted category)
/// node_modules/x.js    (denylisted category)
/// README.md            (file at root, not a category)
/// ```
pub(crate) fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("photos/raw")).unwrap();
    fs::create_dir_all(root.join("clips")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("node_modules")).unwrap();

    fs::write(root.join("photos/a.jpg"), vec![0xFFu8; 2048]).unwrap();
    fs::write(root.join("photos/b.txt"), b"0123456789").unwrap();
    fs::write(root.join("photos/.DS_Store"), b"meta").unwrap();
    fs::write(root.join("photos/debug.log"), b"log").unwrap();
    fs::write(root.join("photos/raw/unlisted.jpg"), b"x").unwrap();
    let clip = fs::File::create(root.join("clips/c.mp4")).unwrap();
    clip.set_len(5_000_000).unwrap();
    fs::write(root.join(".git/HEAD"), b"ref: refs/heads/main").unwrap();
    fs::write(root.join("node_modules/x.js"), b"module.exports = 1;").unwrap();
    fs::write(root.join("README.md"), b"# media").unwrap();

    dir
}

pub(crate) fn sample_library() -> (TempDir, Library) {
    let dir = sample_tree();
    let library = Library::new(dir.path(), Denylist::default());
    (dir, library)
}

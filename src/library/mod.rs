//! Filesystem-backed media library.
//!
//! Every operation re-reads the directory tree on call. The [`Library`] value
//! carries the storage root and the [`Denylist`]; nothing else is shared and
//! nothing is cached between calls.
//!
//! - [`classify`]: extension → file type / content type, byte formatting
//! - [`denylist`]: names excluded from every enumeration
//! - [`scanner`]: categories and the files inside one category
//! - [`search`]: flat listing and filtered search across all categories
//! - [`content`]: path resolution and chunked file streaming

pub mod classify;
pub mod content;
pub mod denylist;
pub mod scanner;
pub mod search;

use std::path::{Path, PathBuf};

pub use denylist::Denylist;

/// Errors produced by library operations.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// A category or file does not exist (or is hidden by the denylist).
    #[error("{0}")]
    NotFound(String),
    /// The request itself is malformed: missing search parameters,
    /// an unknown type filter or a path escaping the root.
    #[error("{0}")]
    InvalidArgument(String),
    /// The filesystem refused a read, stat or open.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl LibraryError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        LibraryError::Io { context: context.into(), source }
    }
}

pub type LibraryResult<T> = Result<T, LibraryError>;

/// A storage root plus the denylist applied to it.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
    denylist: Denylist,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>, denylist: Denylist) -> Self {
        Self { root: root.into(), denylist }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }
}

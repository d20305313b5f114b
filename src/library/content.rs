//! Resolution of `(category, filename)` pairs and chunked file streaming.

use std::{fs, io::ErrorKind, path::PathBuf};

use tokio_util::io::ReaderStream;

use super::{
    classify::{content_type_of, extension_of},
    scanner::{normalize_relative, sanitize_for_logging},
    Library, LibraryError, LibraryResult,
};

/// A file inside the library that exists and may be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub filename: String,
    pub content_type: &'static str,
    pub size: u64,
}

/// How the client should present the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

impl Disposition {
    /// `Content-Disposition` value with an ASCII `filename` and an RFC 5987
    /// `filename*` carrying the exact UTF-8 name.
    pub fn header_value(self, filename: &str) -> String {
        let kind = match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        };
        let ascii: String = filename
            .chars()
            .map(|c| if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' { c } else { '_' })
            .collect();
        if ascii == filename {
            format!("{}; filename=\"{}\"", kind, ascii)
        } else {
            format!(
                "{}; filename=\"{}\"; filename*=UTF-8''{}",
                kind,
                ascii,
                urlencoding::encode(filename)
            )
        }
    }
}

impl Library {
    /// Resolves `root/category/filename` to an existing regular file.
    ///
    /// `filename` may contain `.` and `..` segments as long as the result
    /// stays inside the category directory; otherwise the call fails with
    /// `InvalidArgument` before the filesystem is touched. The same error is
    /// returned when a symlink on the way leads outside the root. Denylisted
    /// names anywhere on the path are reported as `NotFound`.
    pub fn resolve_for_stream(&self, category: &str, filename: &str) -> LibraryResult<ResolvedFile> {
        let dir = self.category_dir(category)?;
        let rel = normalize_relative(&[filename])?;
        let not_found = || {
            LibraryError::NotFound(format!(
                "File '{}' not found in category '{}'",
                sanitize_for_logging(filename),
                sanitize_for_logging(category)
            ))
        };

        let mut name = None;
        for comp in rel.iter() {
            let part = comp.to_string_lossy();
            if self.denylist.contains(&part) {
                return Err(not_found());
            }
            name = Some(part.into_owned());
        }
        let name = name.ok_or_else(|| {
            LibraryError::InvalidArgument("file name must not be empty".to_string())
        })?;

        let path = dir.join(&rel);
        let md = match fs::metadata(&path) {
            Ok(md) => md,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(LibraryError::io(format!("failed to stat {}", path.display()), e)),
        };
        if !md.is_file() {
            return Err(not_found());
        }
        let root_real = self.canonical_root()?;
        self.ensure_within_root(&root_real, &path)?;

        let content_type = content_type_of(&extension_of(&name));
        tracing::debug!("resolved {} ({}, {} bytes)", path.display(), content_type, md.len());
        Ok(ResolvedFile { path, filename: name, content_type, size: md.len() })
    }
}

/// Opens the file for sequential reading in chunks of `buffer_size` bytes.
///
/// The stream is lazy and pulls the next chunk only when polled; dropping it
/// closes the file.
pub async fn open_stream(
    file: &ResolvedFile,
    buffer_size: usize,
) -> LibraryResult<ReaderStream<tokio::fs::File>> {
    let handle = tokio::fs::File::open(&file.path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            LibraryError::NotFound(format!("File '{}' not found", sanitize_for_logging(&file.filename)))
        } else {
            LibraryError::io(format!("failed to open {}", file.path.display()), e)
        }
    })?;
    Ok(ReaderStream::with_capacity(handle, buffer_size.max(1)))
}

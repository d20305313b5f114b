use std::{
    fs,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use super::{
    classify::{classify_extension, extension_of, format_bytes},
    Library, LibraryError, LibraryResult,
};
use crate::types::{download_url, file_url, Category, FileEntry};

impl Library {
    /// Immediate subdirectories of the root that are not denylisted.
    ///
    /// Order is whatever the filesystem yields. Any unreadable entry aborts
    /// the whole listing.
    pub fn list_categories(&self) -> LibraryResult<Vec<Category>> {
        let rd = fs::read_dir(&self.root)
            .map_err(|e| LibraryError::io(format!("failed to read {}", self.root.display()), e))?;
        let root_real = self.canonical_root()?;
        let mut out = Vec::new();
        for entry in rd {
            let entry = entry.map_err(|e| LibraryError::io("failed to read directory entry", e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.denylist.contains(&name) {
                continue;
            }
            let path = entry.path();
            // follows symlinks, a linked directory counts as a category
            let md = fs::metadata(&path)
                .map_err(|e| LibraryError::io(format!("failed to stat {}", path.display()), e))?;
            if md.is_dir() && !escapes_root(&root_real, &entry, &path)? {
                out.push(Category::new(name));
            }
        }
        tracing::debug!("listed {} categories under {}", out.len(), self.root.display());
        Ok(out)
    }

    /// Regular files directly inside `category`.
    pub fn list_files(&self, category: &str) -> LibraryResult<Vec<FileEntry>> {
        let dir = self.category_dir(category)?;
        match fs::metadata(&dir) {
            Ok(md) if md.is_dir() => {}
            Ok(_) => return Err(not_found_category(category)),
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found_category(category)),
            Err(e) => return Err(LibraryError::io(format!("failed to stat {}", dir.display()), e)),
        }
        let root_real = self.canonical_root()?;
        self.ensure_within_root(&root_real, &dir)?;

        // The directory may vanish between the probe above and this read;
        // that surfaces as an I/O error, not as NotFound.
        let rd = fs::read_dir(&dir)
            .map_err(|e| LibraryError::io(format!("failed to read {}", dir.display()), e))?;
        let mut out = Vec::new();
        for entry in rd {
            let entry = entry.map_err(|e| LibraryError::io("failed to read directory entry", e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.denylist.contains(&name) {
                continue;
            }
            let path = entry.path();
            let md = fs::metadata(&path)
                .map_err(|e| LibraryError::io(format!("failed to stat {}", path.display()), e))?;
            if !md.is_file() || escapes_root(&root_real, &entry, &path)? {
                continue;
            }
            out.push(file_entry(category, name, md.len()));
        }
        tracing::debug!("listed {} files in category '{}'", out.len(), category);
        Ok(out)
    }

    /// Resolves a category name to its directory, rejecting anything that is
    /// not a single plain path segment.
    pub(crate) fn category_dir(&self, category: &str) -> LibraryResult<PathBuf> {
        let rel = normalize_relative(&[category])?;
        let mut parts = rel.components();
        let name = match (parts.next(), parts.next()) {
            (Some(Component::Normal(name)), None) => name.to_string_lossy(),
            _ => {
                return Err(LibraryError::InvalidArgument(format!(
                    "invalid category name: {}",
                    sanitize_for_logging(category)
                )))
            }
        };
        if self.denylist.contains(&name) {
            return Err(not_found_category(category));
        }
        Ok(self.root.join(&rel))
    }

    pub(crate) fn canonical_root(&self) -> LibraryResult<PathBuf> {
        fs::canonicalize(&self.root)
            .map_err(|e| LibraryError::io(format!("failed to resolve {}", self.root.display()), e))
    }

    /// Fails with `InvalidArgument` when an existing `path` lies outside the
    /// root once symlinks are resolved.
    pub(crate) fn ensure_within_root(&self, root_real: &Path, path: &Path) -> LibraryResult<()> {
        let real = fs::canonicalize(path)
            .map_err(|e| LibraryError::io(format!("failed to resolve {}", path.display()), e))?;
        if !real.starts_with(root_real) {
            tracing::warn!("rejected symlink leaving the library root: {}", path.display());
            return Err(LibraryError::InvalidArgument("path escapes the library root".to_string()));
        }
        Ok(())
    }
}

/// Symlinked entries pointing outside the root are hidden from listings.
fn escapes_root(root_real: &Path, entry: &fs::DirEntry, path: &Path) -> LibraryResult<bool> {
    let is_link = entry
        .file_type()
        .map_err(|e| LibraryError::io(format!("failed to stat {}", path.display()), e))?
        .is_symlink();
    if !is_link {
        return Ok(false);
    }
    let real = fs::canonicalize(path)
        .map_err(|e| LibraryError::io(format!("failed to resolve {}", path.display()), e))?;
    if real.starts_with(root_real) {
        return Ok(false);
    }
    tracing::debug!("skipping {}: symlink target outside the library root", path.display());
    Ok(true)
}

fn file_entry(category: &str, name: String, size: u64) -> FileEntry {
    let extension = extension_of(&name);
    let file_type = classify_extension(&extension);
    FileEntry {
        url: file_url(category, &name),
        download_url: download_url(category, &name),
        size,
        size_formatted: format_bytes(size),
        extension,
        file_type,
        name,
    }
}

fn not_found_category(category: &str) -> LibraryError {
    LibraryError::NotFound(format!("Category '{}' not found", sanitize_for_logging(category)))
}

/// Joins `segments` into one relative path, resolving `.` and `..` lexically.
///
/// Fails with `InvalidArgument` when the result would leave the root: a `..`
/// that climbs above it, an absolute segment or a drive prefix.
pub(crate) fn normalize_relative(segments: &[&str]) -> LibraryResult<PathBuf> {
    let mut out = PathBuf::new();
    let mut depth = 0usize;
    for seg in segments {
        if seg.contains('\0') {
            return Err(LibraryError::InvalidArgument("path contains null characters".into()));
        }
        for comp in Path::new(seg).components() {
            match comp {
                Component::Normal(part) => {
                    out.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir if depth > 0 => {
                    out.pop();
                    depth -= 1;
                }
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    tracing::warn!("rejected path escaping the library root: {}", sanitize_for_logging(seg));
                    return Err(LibraryError::InvalidArgument(
                        "path escapes the library root".to_string(),
                    ));
                }
            }
        }
    }
    Ok(out)
}

/// Strips control characters so user-supplied names cannot forge log lines.
pub(crate) fn sanitize_for_logging(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).take(256).collect()
}

use super::{Library, LibraryError, LibraryResult};
use crate::types::{FileType, SearchResult};

impl Library {
    /// Every file of every category, tagged with its category name.
    pub fn list_all_files(&self) -> LibraryResult<Vec<SearchResult>> {
        let mut out = Vec::new();
        for category in self.list_categories()? {
            for file in self.list_files(&category.name)? {
                out.push(SearchResult { category: category.name.clone(), file });
            }
        }
        Ok(out)
    }

    /// Linear scan over [`Library::list_all_files`].
    ///
    /// A file matches when the query (if any) is a case-insensitive substring
    /// of its name or of its category name, and the type filter (if any)
    /// equals its classified type. At least one of the two must be given;
    /// an empty query counts as absent. Whitespace is matched literally.
    pub fn search(
        &self,
        query: Option<&str>,
        file_type: Option<FileType>,
    ) -> LibraryResult<Vec<SearchResult>> {
        let needle = query.filter(|q| !q.is_empty()).map(str::to_lowercase);
        if needle.is_none() && file_type.is_none() {
            return Err(LibraryError::InvalidArgument(
                "Search query or type parameter is required".to_string(),
            ));
        }

        let mut results = self.list_all_files()?;
        results.retain(|r| {
            let query_ok = needle.as_deref().map_or(true, |n| {
                r.file.name.to_lowercase().contains(n) || r.category.to_lowercase().contains(n)
            });
            let type_ok = file_type.map_or(true, |t| r.file.file_type == t);
            query_ok && type_ok
        });
        tracing::debug!(
            "search query={:?} type={:?} matched {} files",
            needle,
            file_type,
            results.len()
        );
        Ok(results)
    }
}

/// Parses a `type` filter value. Only `image` and `video` are searchable.
pub fn parse_type_filter(raw: &str) -> LibraryResult<Option<FileType>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "image" => Ok(Some(FileType::Image)),
        "video" => Ok(Some(FileType::Video)),
        other => Err(LibraryError::InvalidArgument(format!(
            "Invalid type '{}', expected 'image' or 'video'",
            super::scanner::sanitize_for_logging(other)
        ))),
    }
}

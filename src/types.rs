use serde::{Deserialize, Serialize};

/// Semantic type of a file, derived only from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Video,
    Other,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Other => "other",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Locator helpers; every segment is percent-encoded
pub fn category_url(category: &str) -> String {
    format!("/api/categories/{}", urlencoding::encode(category))
}

pub fn category_files_url(category: &str) -> String {
    format!("/api/categories/{}/files", urlencoding::encode(category))
}

pub fn file_url(category: &str, name: &str) -> String {
    format!("/api/files/{}/{}", urlencoding::encode(category), urlencoding::encode(name))
}

pub fn download_url(category: &str, name: &str) -> String {
    format!("/api/download/{}/{}", urlencoding::encode(category), urlencoding::encode(name))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub path: String,
    pub files_url: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self { path: category_url(&name), files_url: category_files_url(&name), name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub size_formatted: String,
    pub extension: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub url: String,
    pub download_url: String,
}

/// A [`FileEntry`] together with the category it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub category: String,
    #[serde(flatten)]
    pub file: FileEntry,
}

// Response envelopes

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilesResponse {
    pub category: String,
    pub files: Vec<FileEntry>,
    pub count: usize,
    pub total_size: String,
    pub total_bytes: u64,
}

#[derive(Debug, Serialize)]
pub struct AllFilesResponse {
    pub files: Vec<SearchResult>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub count: usize,
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub file_type: Option<FileType>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

//! Pure helpers mapping extensions to file types and content types.

use std::path::Path;

use crate::types::FileType;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"];
const VIDEO_EXTENSIONS: &[&str] = &[".mov", ".mp4", ".avi", ".mkv", ".webm"];

const CONTENT_TYPES: &[(&str, &str)] = &[
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".png", "image/png"),
    (".gif", "image/gif"),
    (".webp", "image/webp"),
    (".bmp", "image/bmp"),
    (".mov", "video/quicktime"),
    (".mp4", "video/mp4"),
    (".avi", "video/x-msvideo"),
    (".mkv", "video/x-matroska"),
    (".webm", "video/webm"),
];

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count, e.g. `1536` → `"1.5 KB"`.
///
/// The largest unit is GB, so anything from 1 TiB upwards is still reported
/// in GB with a magnitude above 1024.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    // floor(log1024(bytes)), clamped to the unit table
    let mut unit = 0usize;
    while unit + 1 < UNITS.len() && bytes >= 1u64 << (10 * (unit + 1)) {
        unit += 1;
    }
    let value = bytes as f64 / (1u64 << (10 * unit)) as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

/// Classifies an already lowercased extension (with leading dot).
pub fn classify_extension(ext: &str) -> FileType {
    if IMAGE_EXTENSIONS.contains(&ext) {
        FileType::Image
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        FileType::Video
    } else {
        FileType::Other
    }
}

pub fn content_type_of(ext: &str) -> &'static str {
    CONTENT_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, ct)| *ct)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

/// Lowercased extension including the leading dot, or `""`.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

use std::ffi::OsStr;

pub fn file_ext(path: impl AsRef<OsStr>) -> Option<String> {
    std::path::Path::new(path.as_ref())
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

/// Title as stored - surrounding whitespace removed, `None` when nothing is left
pub fn normalize_title(title: &str) -> Option<String> {
    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

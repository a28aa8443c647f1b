//! Path helpers
//!
//! Deliberately shallow: prefix checks, segment extraction and joins. No
//! canonicalization, no `..` folding.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Render a location as a generic URI-style path: '/' separators and a
/// leading '/' (so `C:\x` becomes `/C:/x`).
pub fn uri_path(path: &Path) -> String {
    let normalized = normalize_path(path);
    if normalized.is_empty() || normalized.starts_with('/') {
        normalized
    } else {
        format!("/{}", normalized)
    }
}

/// True when the string starts with a path separator
pub fn starts_with_separator(path: &str) -> bool {
    path.starts_with('/') || path.starts_with('\\')
}

/// Join a root with a '/'-separated relative path. Leading separators are
/// dropped so the result always stays under `root`; an empty relative path
/// yields the root itself rather than the root with a trailing separator.
pub fn join_root(root: &Path, relative: &str) -> PathBuf {
    let relative = relative.trim_start_matches(['/', '\\']);
    if relative.is_empty() {
        return root.to_path_buf();
    }
    root.join(relative.replace('/', std::path::MAIN_SEPARATOR_STR))
}

/// First non-empty segment of a '/' or '\' separated path
pub fn leading_segment(path: &str) -> Option<&str> {
    path.split(['/', '\\']).find(|segment| !segment.is_empty())
}

/// Final folder-name segment of a location
pub fn final_segment(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("src/main.rs");
        assert_eq!(normalize_path(path), "src/main.rs");
    }

    #[test]
    fn test_uri_path_keeps_unix_paths() {
        assert_eq!(uri_path(Path::new("/project/a.txt")), "/project/a.txt");
    }

    #[test]
    fn test_uri_path_prefixes_drive_paths() {
        assert_eq!(uri_path(Path::new("C:\\work\\a.txt")), "/C:/work/a.txt");
    }

    #[test]
    fn test_uri_path_empty() {
        assert_eq!(uri_path(Path::new("")), "");
    }

    #[test]
    fn test_starts_with_separator() {
        assert!(starts_with_separator("/etc"));
        assert!(starts_with_separator("\\share"));
        assert!(!starts_with_separator("etc"));
        assert!(!starts_with_separator(""));
    }

    #[test]
    fn test_join_root() {
        let root = Path::new("/project");
        assert_eq!(join_root(root, "src/main.rs"), PathBuf::from("/project/src/main.rs"));
        assert_eq!(join_root(root, ""), PathBuf::from("/project"));
    }

    #[test]
    fn test_join_root_keeps_absolute_relative_under_root() {
        let root = Path::new("/project");
        assert_eq!(join_root(root, "/data"), PathBuf::from("/project/data"));
        assert_eq!(join_root(root, "//data/x"), PathBuf::from("/project/data/x"));
        assert_eq!(join_root(root, "/"), PathBuf::from("/project"));
    }

    #[test]
    fn test_leading_segment() {
        assert_eq!(leading_segment("web/src"), Some("web"));
        assert_eq!(leading_segment("./web"), Some("."));
        assert_eq!(leading_segment("\\api\\x"), Some("api"));
        assert_eq!(leading_segment(""), None);
    }

    #[test]
    fn test_final_segment() {
        assert_eq!(final_segment(Path::new("/w/api")), Some("api".to_string()));
        assert_eq!(final_segment(Path::new("/")), None);
    }
}

//! Output formatting
//!
//! Renders each selected location as a native path (`fsPath`) or a generic
//! URI-style path, then joins them with the configured separator.

use std::path::{Path, PathBuf};

use crate::core::model::OutputOptions;
use crate::core::paths::uri_path;

/// Render one location
pub fn render_location(path: &Path, fs_path: bool) -> String {
    if fs_path {
        path.to_string_lossy().into_owned()
    } else {
        uri_path(path)
    }
}

/// Join a selection into the final value; `None` when there is nothing to
/// join, leaving fallback policy to the caller
pub fn format_selection(selection: Option<&[PathBuf]>, output: &OutputOptions) -> Option<String> {
    let selection = selection.filter(|s| !s.is_empty())?;
    Some(
        selection
            .iter()
            .map(|path| render_location(path, output.fs_path))
            .collect::<Vec<_>>()
            .join(&output.join),
    )
}

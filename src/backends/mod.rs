//! Backends module - Host capabilities the pick flow talks to
//!
//! Provides:
//! - fs: one-level directory listing with walkdir
//! - prompt: terminal quick-select list
//! - dialog: native browse dialog (rfd, `native-dialog` feature) or typed path entry

use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::core::model::{DirectoryEntry, PickOptions};

pub mod dialog;
pub mod fs;
pub mod prompt;

/// Lists the entries of one directory
pub trait DirectoryReader {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirectoryEntry>>;
}

/// One line of a quick-select list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickPickItem {
    pub label: String,
    pub is_dir: bool,
}

/// Presentation options for a quick-select prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptOptions {
    pub title: Option<String>,
    /// Shown above the list, typically the directory being browsed
    pub placeholder: Option<String>,
    pub can_pick_many: bool,
}

/// Quick-select list prompt
pub trait Prompter {
    /// `Ok(None)` means the user cancelled; otherwise the chosen item indices.
    fn prompt(
        &mut self,
        items: &[QuickPickItem],
        options: &PromptOptions,
    ) -> Result<Option<Vec<usize>>>;
}

/// Options forwarded to a native browse dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogOptions {
    pub title: Option<String>,
    pub can_select_files: bool,
    pub can_select_folders: bool,
    pub can_select_many: bool,
    pub filter_ext: Option<String>,
}

impl From<&PickOptions> for DialogOptions {
    fn from(options: &PickOptions) -> Self {
        Self {
            title: options.title.clone(),
            can_select_files: options.can_select_files,
            can_select_folders: options.can_select_folders,
            can_select_many: options.can_select_many,
            filter_ext: options.filter_ext.clone(),
        }
    }
}

/// Native browse dialog
pub trait NativeBrowser {
    /// `Ok(None)` means the user cancelled; otherwise absolute locations.
    fn browse(
        &mut self,
        root: Option<&Path>,
        options: &DialogOptions,
    ) -> Result<Option<Vec<PathBuf>>>;
}

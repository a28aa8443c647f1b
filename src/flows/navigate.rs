//! Quick-select navigation
//!
//! Two states: browsing a directory, or done with a (possibly cancelled)
//! selection. Descent is an explicit loop carrying the current directory, so
//! depth does not grow the stack.
//!
//! Listing rules for a directory:
//! - `..` is offered when folders can be changed, `.` when folders can be
//!   selected, in that order and ahead of real entries
//! - directories are kept only when folders can be selected or changed
//! - files are kept only when files can be selected and they pass the
//!   regex and extension filters (directories are never filtered by name)

use regex::Regex;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::backends::{DirectoryReader, PromptOptions, Prompter, QuickPickItem};
use crate::core::error::{PickError, Result};
use crate::core::model::{DirectoryEntry, PickOptions};

/// Pseudo-entry for the parent directory
pub const PARENT_ENTRY: &str = "..";

/// Pseudo-entry for the directory being browsed
pub const CURRENT_ENTRY: &str = ".";

/// Navigation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    Browsing(PathBuf),
    /// `None` is a cancel
    Terminal(Option<Vec<PathBuf>>),
}

/// Decides which real entries are listed
#[derive(Debug, Clone)]
pub struct EntryFilter {
    regexp: Option<Regex>,
    ext: Option<String>,
    files: bool,
    folders: bool,
}

impl EntryFilter {
    pub fn new(options: &PickOptions) -> Result<Self> {
        let regexp = options
            .filter_regexp
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| PickError::InvalidFilter {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            regexp,
            ext: options.filter_ext.clone(),
            files: options.can_select_files,
            folders: options.can_select_folders || options.can_change_folder,
        })
    }

    pub fn accepts(&self, entry: &DirectoryEntry) -> bool {
        if entry.is_dir() {
            return self.folders;
        }
        if !self.files {
            return false;
        }
        if let Some(re) = &self.regexp {
            if !re.is_match(&entry.name) {
                return false;
            }
        }
        match &self.ext {
            Some(ext) => entry.name.ends_with(ext.as_str()),
            None => true,
        }
    }
}

/// A listed entry together with the location it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub entry: DirectoryEntry,
    pub location: PathBuf,
    pub label: String,
}

impl Choice {
    fn new(entry: DirectoryEntry, location: PathBuf) -> Self {
        let label = if entry.is_dir() {
            format!("{}{}", entry.name, MAIN_SEPARATOR)
        } else {
            entry.name.clone()
        };
        Self {
            entry,
            location,
            label,
        }
    }

    fn to_item(&self) -> QuickPickItem {
        QuickPickItem {
            label: self.label.clone(),
            is_dir: self.entry.is_dir(),
        }
    }
}

/// Drives quick-select browsing for one pick
pub struct Navigator<'a> {
    options: &'a PickOptions,
    filter: EntryFilter,
    reader: &'a dyn DirectoryReader,
}

impl<'a> Navigator<'a> {
    /// Fails only when `filterRegExp` does not compile
    pub fn new(options: &'a PickOptions, reader: &'a dyn DirectoryReader) -> Result<Self> {
        Ok(Self {
            options,
            filter: EntryFilter::new(options)?,
            reader,
        })
    }

    /// Entries offered while browsing `dir`. An empty location (no resolved
    /// root) lists nothing; an unreadable directory lists only pseudo-entries.
    pub fn choices(&self, dir: &Path) -> Vec<Choice> {
        if dir.as_os_str().is_empty() {
            return Vec::new();
        }

        let mut choices = Vec::new();
        if self.options.can_change_folder {
            let parent = dir
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(dir);
            choices.push(Choice::new(
                DirectoryEntry::directory(PARENT_ENTRY),
                parent.to_path_buf(),
            ));
        }
        if self.options.can_select_folders {
            choices.push(Choice::new(
                DirectoryEntry::directory(CURRENT_ENTRY),
                dir.to_path_buf(),
            ));
        }

        let entries = match self.reader.read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot list directory");
                Vec::new()
            }
        };

        choices.extend(
            entries
                .into_iter()
                .filter(|entry| self.filter.accepts(entry))
                .map(|entry| {
                    let location = dir.join(&entry.name);
                    Choice::new(entry, location)
                }),
        );
        choices
    }

    /// Browse from `start` until the user picks something or cancels
    pub fn run(&self, start: PathBuf, prompter: &mut dyn Prompter) -> Result<Option<Vec<PathBuf>>> {
        let mut state = NavState::Browsing(start);
        loop {
            state = match state {
                NavState::Browsing(dir) => self.step(dir, prompter)?,
                NavState::Terminal(selection) => return Ok(selection),
            };
        }
    }

    /// One prompt round trip
    pub fn step(&self, dir: PathBuf, prompter: &mut dyn Prompter) -> Result<NavState> {
        let choices = self.choices(&dir);
        let items: Vec<QuickPickItem> = choices.iter().map(Choice::to_item).collect();
        let prompt_options = PromptOptions {
            title: self.options.title.clone(),
            placeholder: Some(dir.display().to_string()),
            can_pick_many: self.options.can_select_many,
        };

        let Some(picked) = prompter.prompt(&items, &prompt_options)? else {
            tracing::debug!(dir = %dir.display(), "selection cancelled");
            return Ok(NavState::Terminal(None));
        };

        let selected: Vec<&Choice> = picked.iter().filter_map(|&i| choices.get(i)).collect();

        if let [only] = selected.as_slice() {
            if only.entry.is_dir() && self.options.can_change_folder && only.location != dir {
                tracing::debug!(to = %only.location.display(), "descending");
                return Ok(NavState::Browsing(only.location.clone()));
            }
        }

        Ok(NavState::Terminal(Some(
            selected.into_iter().map(|c| c.location.clone()).collect(),
        )))
    }
}

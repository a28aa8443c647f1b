//! Native browse dialog
//!
//! With the `native-dialog` feature the OS file dialog is opened through rfd.
//! Without it, [`PathEntryDialog`] stands in: the user types paths relative
//! to the starting location and each one is checked against the dialog
//! options before it is accepted.

use colored::Colorize;
use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};
use std::path::{Path, PathBuf};

use crate::backends::{DialogOptions, NativeBrowser};
use crate::core::error::Result;
use crate::core::paths::{join_root, starts_with_separator};

/// Browser used by the CLI
#[cfg(feature = "native-dialog")]
pub fn default_browser() -> Box<dyn NativeBrowser> {
    Box::new(RfdDialog)
}

/// Browser used by the CLI
#[cfg(not(feature = "native-dialog"))]
pub fn default_browser() -> Box<dyn NativeBrowser> {
    Box::new(PathEntryDialog::stdio())
}

/// OS file dialog
#[cfg(feature = "native-dialog")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RfdDialog;

#[cfg(feature = "native-dialog")]
impl NativeBrowser for RfdDialog {
    fn browse(
        &mut self,
        root: Option<&Path>,
        options: &DialogOptions,
    ) -> Result<Option<Vec<PathBuf>>> {
        tracing::debug!("Open rfd::FileDialog");
        let mut dialog = rfd::FileDialog::new();
        if let Some(root) = root {
            dialog = dialog.set_directory(root);
        }
        if let Some(title) = &options.title {
            dialog = dialog.set_title(title.as_str());
        }
        if let Some(ext) = &options.filter_ext {
            let ext = ext.trim_start_matches('.');
            dialog = dialog.add_filter(ext, &[ext]);
        }

        // rfd cannot mix files and folders in one dialog
        let folders_only = options.can_select_folders && !options.can_select_files;
        let picked = match (folders_only, options.can_select_many) {
            (true, true) => dialog.pick_folders(),
            (true, false) => dialog.pick_folder().map(|p| vec![p]),
            (false, true) => dialog.pick_files(),
            (false, false) => dialog.pick_file().map(|p| vec![p]),
        };
        tracing::debug!("rfd::FileDialog closed");
        Ok(picked)
    }
}

/// Typed path entry on a terminal
pub struct PathEntryDialog<R, W> {
    input: R,
    output: W,
}

impl PathEntryDialog<BufReader<Stdin>, Stderr> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> PathEntryDialog<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Next line without its terminator; `None` at end of input
    fn read_entry(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Absolute location of a typed entry
fn locate(entry: &str, root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) if !starts_with_separator(entry) => join_root(root, entry),
        _ => PathBuf::from(entry),
    }
}

/// Why a location cannot be picked, if it cannot
fn rejection(location: &Path, options: &DialogOptions) -> Option<String> {
    if location.is_dir() {
        if !options.can_select_folders {
            return Some(format!("{} is a folder", location.display()));
        }
        return None;
    }
    if !location.is_file() {
        return Some(format!("{} does not exist", location.display()));
    }
    if !options.can_select_files {
        return Some(format!("{} is a file", location.display()));
    }
    if let Some(ext) = &options.filter_ext {
        if !location.to_string_lossy().ends_with(ext.as_str()) {
            return Some(format!("{} does not end with {}", location.display(), ext));
        }
    }
    None
}

impl<R: BufRead, W: Write> NativeBrowser for PathEntryDialog<R, W> {
    fn browse(
        &mut self,
        root: Option<&Path>,
        options: &DialogOptions,
    ) -> Result<Option<Vec<PathBuf>>> {
        if let Some(title) = &options.title {
            writeln!(self.output, "{}", title.bold())?;
        }
        let base = root
            .map(|r| r.display().to_string())
            .unwrap_or_else(|| "the current directory".to_string());

        let mut picked = Vec::new();
        loop {
            if options.can_select_many {
                write!(
                    self.output,
                    "Path relative to {} (blank line to finish): ",
                    base
                )?;
            } else {
                write!(self.output, "Path relative to {} (blank to cancel): ", base)?;
            }
            self.output.flush()?;

            let entry = match self.read_entry()? {
                Some(entry) if !entry.is_empty() => entry,
                _ => break,
            };

            let location = locate(&entry, root);
            if let Some(reason) = rejection(&location, options) {
                writeln!(self.output, "{}", reason.red())?;
                continue;
            }

            picked.push(location);
            if !options.can_select_many {
                break;
            }
        }

        if picked.is_empty() {
            return Ok(None);
        }
        Ok(Some(picked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn dialog(input: &str) -> PathEntryDialog<Cursor<Vec<u8>>, Vec<u8>> {
        PathEntryDialog::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn files_only() -> DialogOptions {
        DialogOptions {
            can_select_files: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_relative_file() {
        let temp = tempdir().unwrap();
        File::create(temp.path().join("a.txt")).unwrap();

        let picked = dialog("a.txt\n")
            .browse(Some(temp.path()), &files_only())
            .unwrap();
        assert_eq!(picked, Some(vec![temp.path().join("a.txt")]));
    }

    #[test]
    fn test_blank_line_cancels() {
        let temp = tempdir().unwrap();
        let picked = dialog("\n").browse(Some(temp.path()), &files_only()).unwrap();
        assert_eq!(picked, None);
    }

    #[test]
    fn test_rejects_folder_then_accepts_file() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        File::create(temp.path().join("a.txt")).unwrap();

        let mut d = dialog("sub\na.txt\n");
        let picked = d.browse(Some(temp.path()), &files_only()).unwrap();
        assert_eq!(picked, Some(vec![temp.path().join("a.txt")]));

        let shown = String::from_utf8(d.into_output()).unwrap();
        assert!(shown.contains("is a folder"));
    }

    #[test]
    fn test_many_until_blank_line() {
        let temp = tempdir().unwrap();
        File::create(temp.path().join("a.env")).unwrap();
        File::create(temp.path().join("b.txt")).unwrap();
        File::create(temp.path().join("c.env")).unwrap();
        let options = DialogOptions {
            can_select_files: true,
            can_select_many: true,
            filter_ext: Some(".env".to_string()),
            ..Default::default()
        };

        let picked = dialog("a.env\nb.txt\nc.env\n\n")
            .browse(Some(temp.path()), &options)
            .unwrap();
        assert_eq!(
            picked,
            Some(vec![temp.path().join("a.env"), temp.path().join("c.env")])
        );
    }

    #[test]
    fn test_absolute_entry_ignores_root() {
        let temp = tempdir().unwrap();
        let other = tempdir().unwrap();
        let options = DialogOptions {
            can_select_folders: true,
            ..Default::default()
        };
        let input = format!("{}\n", other.path().display());

        let picked = dialog(&input).browse(Some(temp.path()), &options).unwrap();
        assert_eq!(picked, Some(vec![other.path().to_path_buf()]));
    }

    #[test]
    fn test_missing_entry_rejected() {
        let temp = tempdir().unwrap();
        let picked = dialog("nope.txt\n")
            .browse(Some(temp.path()), &files_only())
            .unwrap();
        assert_eq!(picked, None);
    }
}

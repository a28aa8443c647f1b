//! Directory listing backend
//!
//! Reads exactly one level with walkdir. Entries come back sorted by file
//! name so listings are stable.

use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::backends::DirectoryReader;
use crate::core::model::DirectoryEntry;

/// Lists directories on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryReader;

impl DirectoryReader for FsDirectoryReader {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                // The directory itself could not be opened
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(_) => continue,
            };

            let name = entry.file_name().to_string_lossy().into_owned();

            // Symlinks count as whatever they point at
            let is_dir = if entry.path_is_symlink() {
                entry.path().is_dir()
            } else {
                entry.file_type().is_dir()
            };

            entries.push(if is_dir {
                DirectoryEntry::directory(name)
            } else {
                DirectoryEntry::file(name)
            });
        }

        Ok(entries)
    }
}

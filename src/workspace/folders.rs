//! Workspace root folders

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::paths::final_segment;

/// A top-level folder of the open project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFolder {
    /// Display name, used to match `defaultWorkspace`
    pub name: String,
    /// Absolute location of the folder
    pub path: PathBuf,
}

impl WorkspaceFolder {
    /// Folder named after its final path segment
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = final_segment(&path).unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path }
    }

    pub fn named(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Make the location absolute against `cwd` when it is relative
    pub fn absolutize(mut self, cwd: &Path) -> Self {
        if self.path.is_relative() {
            self.path = cwd.join(&self.path);
        }
        self
    }
}

/// Parses `NAME=DIR` or a plain `DIR`
impl FromStr for WorkspaceFolder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, dir)) => {
                let (name, dir) = (name.trim(), dir.trim());
                if name.is_empty() || dir.is_empty() {
                    return Err(format!("Invalid workspace spec: {}", s));
                }
                Ok(WorkspaceFolder::named(name, dir))
            }
            None if s.trim().is_empty() => Err("Empty workspace path".to_string()),
            None => Ok(WorkspaceFolder::new(s.trim())),
        }
    }
}

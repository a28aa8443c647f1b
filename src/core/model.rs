//! Pick configuration model
//!
//! Users hand us either a bare path string or a partial structured object.
//! Everything downstream works on a fully-populated [`PickConfiguration`];
//! [`PickArgs::normalize`] is the only place defaults are applied.

use serde::{Deserialize, Serialize};

/// Default separator used to join multiple selections
pub const DEFAULT_JOIN: &str = ",";

/// Raw arguments as supplied by the caller
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PickArgs {
    /// A bare string, treated as `options.path`
    Path(String),
    /// A structured object with optional `options` / `output`
    Structured(PartialConfiguration),
}

impl Default for PickArgs {
    fn default() -> Self {
        PickArgs::Structured(PartialConfiguration::default())
    }
}

/// Structured arguments before defaults are applied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialConfiguration {
    #[serde(default)]
    pub options: Option<PartialPickOptions>,
    #[serde(default)]
    pub output: Option<PartialOutputOptions>,
}

/// User-supplied dialog options; every field may be missing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialPickOptions {
    pub native: Option<bool>,
    pub path: Option<String>,
    pub can_select_files: Option<bool>,
    pub can_select_folders: Option<bool>,
    pub can_select_many: Option<bool>,
    pub can_change_folder: Option<bool>,
    pub title: Option<String>,
    #[serde(rename = "filterRegExp")]
    pub filter_regexp: Option<String>,
    pub filter_ext: Option<String>,
}

/// User-supplied output options; every field may be missing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOutputOptions {
    pub join: Option<String>,
    pub fs_path: Option<bool>,
    pub default_path: Option<String>,
    #[serde(rename = "default")]
    pub default_value: Option<String>,
}

/// Fully-populated dialog options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOptions {
    /// Use the native browse dialog instead of the quick-select list
    pub native: bool,
    /// Starting path; `None` means "first workspace root"
    pub path: Option<String>,
    pub can_select_files: bool,
    pub can_select_folders: bool,
    pub can_select_many: bool,
    pub can_change_folder: bool,
    pub title: Option<String>,
    pub filter_regexp: Option<String>,
    pub filter_ext: Option<String>,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            native: false,
            path: None,
            can_select_files: true,
            can_select_folders: false,
            can_select_many: false,
            can_change_folder: false,
            title: None,
            filter_regexp: None,
            filter_ext: None,
        }
    }
}

/// Fully-populated output options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Separator placed between multiple selections
    pub join: String,
    /// Render platform-native paths (`true`) or generic URI-style paths
    pub fs_path: bool,
    /// Path to resolve and return when nothing was picked
    pub default_path: Option<String>,
    /// Literal string to return when nothing was picked
    pub default_value: Option<String>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            join: DEFAULT_JOIN.to_string(),
            fs_path: true,
            default_path: None,
            default_value: None,
        }
    }
}

/// Configuration with every optional field defaulted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickConfiguration {
    pub options: PickOptions,
    pub output: OutputOptions,
}

impl PickArgs {
    /// Interpret a command-line argument: JSON when it looks like JSON,
    /// otherwise a bare path.
    pub fn from_cli_arg(raw: &str) -> Result<Self, serde_json::Error> {
        let trimmed = raw.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('"') {
            serde_json::from_str(trimmed)
        } else {
            Ok(PickArgs::Path(raw.to_string()))
        }
    }

    /// Apply defaults field by field; user values always win.
    pub fn normalize(self) -> PickConfiguration {
        let (options, output) = match self {
            PickArgs::Path(path) => (
                PartialPickOptions {
                    path: Some(path),
                    ..Default::default()
                },
                PartialOutputOptions::default(),
            ),
            PickArgs::Structured(partial) => (
                partial.options.unwrap_or_default(),
                partial.output.unwrap_or_default(),
            ),
        };

        let base = PickConfiguration::default();
        PickConfiguration {
            options: PickOptions {
                native: options.native.unwrap_or(base.options.native),
                path: options.path.or(base.options.path),
                can_select_files: options
                    .can_select_files
                    .unwrap_or(base.options.can_select_files),
                can_select_folders: options
                    .can_select_folders
                    .unwrap_or(base.options.can_select_folders),
                can_select_many: options
                    .can_select_many
                    .unwrap_or(base.options.can_select_many),
                can_change_folder: options
                    .can_change_folder
                    .unwrap_or(base.options.can_change_folder),
                title: options.title.or(base.options.title),
                filter_regexp: options.filter_regexp.or(base.options.filter_regexp),
                filter_ext: options.filter_ext.or(base.options.filter_ext),
            },
            output: OutputOptions {
                join: output.join.unwrap_or(base.output.join),
                fs_path: output.fs_path.unwrap_or(base.output.fs_path),
                default_path: output.default_path.or(base.output.default_path),
                default_value: output.default_value.or(base.output.default_value),
            },
        }
    }
}

/// Type of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Where the final value of a pick came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeSource {
    Selection,
    Default,
    DefaultPath,
    None,
}

/// Result of the pick operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickOutcome {
    /// `None` tells the host to substitute an empty string
    pub value: Option<String>,
    pub source: OutcomeSource,
}

impl PickOutcome {
    pub fn new(value: impl Into<String>, source: OutcomeSource) -> Self {
        Self {
            value: Some(value.into()),
            source,
        }
    }

    pub fn nothing() -> Self {
        Self {
            value: None,
            source: OutcomeSource::None,
        }
    }
}

/// Result of resolving a path without picking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootReport {
    pub input: Option<String>,
    /// `None` when the path could not be resolved
    pub root: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_string_becomes_path() {
        let config = PickArgs::Path("src".to_string()).normalize();
        assert_eq!(config.options.path.as_deref(), Some("src"));
        assert!(config.options.can_select_files);
        assert_eq!(config.output, OutputOptions::default());
    }

    #[test]
    fn test_empty_object_gets_all_defaults() {
        let args: PickArgs = serde_json::from_str("{}").unwrap();
        assert_eq!(args.normalize(), PickConfiguration::default());
    }

    #[test]
    fn test_defaults_match_schema() {
        let config = PickConfiguration::default();
        assert!(!config.options.native);
        assert!(config.options.can_select_files);
        assert!(!config.options.can_select_folders);
        assert!(!config.options.can_change_folder);
        assert!(!config.options.can_select_many);
        assert_eq!(config.output.join, ",");
        assert!(config.output.fs_path);
    }

    #[test]
    fn test_user_fields_win_per_field() {
        let args: PickArgs = serde_json::from_str(
            r#"{"options":{"canSelectFolders":true,"filterRegExp":"^a"},"output":{"join":";"}}"#,
        )
        .unwrap();
        let config = args.normalize();

        assert!(config.options.can_select_folders);
        assert!(config.options.can_select_files);
        assert_eq!(config.options.filter_regexp.as_deref(), Some("^a"));
        assert_eq!(config.output.join, ";");
        assert!(config.output.fs_path);
    }

    #[test]
    fn test_output_default_key() {
        let args: PickArgs =
            serde_json::from_str(r#"{"output":{"default":"X","defaultPath":"d/e","fsPath":false}}"#)
                .unwrap();
        let config = args.normalize();
        assert_eq!(config.output.default_value.as_deref(), Some("X"));
        assert_eq!(config.output.default_path.as_deref(), Some("d/e"));
        assert!(!config.output.fs_path);
    }

    #[test]
    fn test_from_cli_arg() {
        assert!(matches!(
            PickArgs::from_cli_arg("a/b").unwrap(),
            PickArgs::Path(p) if p == "a/b"
        ));
        assert!(matches!(
            PickArgs::from_cli_arg(r#""quoted""#).unwrap(),
            PickArgs::Path(p) if p == "quoted"
        ));
        assert!(matches!(
            PickArgs::from_cli_arg(r#"{"options":{}}"#).unwrap(),
            PickArgs::Structured(_)
        ));
        assert!(PickArgs::from_cli_arg(r#"{"options":{"native":"yes"}}"#).is_err());
    }

    #[test]
    fn test_outcome_serializes_camel_case_source() {
        let outcome = PickOutcome::new("/r/d/e", OutcomeSource::DefaultPath);
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"value":"/r/d/e","source":"defaultPath"}"#);
        let none = serde_json::to_string(&PickOutcome::nothing()).unwrap();
        assert_eq!(none, r#"{"value":null,"source":"none"}"#);
    }
}

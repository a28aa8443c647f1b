//! Root resolution
//!
//! Turns a raw, possibly relative, possibly `${env:...}`-laden path into the
//! location browsing starts from. Rules, first match wins:
//!
//! 1. no path: first workspace root (or nothing when there are no roots)
//! 2. substituted path starting with a separator: used as-is
//! 3. empty substituted path: replaced by the configured default input path,
//!    which is always joined to a root even if it starts with a separator
//! 4. exactly one root: `root/path`
//! 5. several roots: the root whose folder name equals the path's leading
//!    segment (the segment must be followed by a separator), else the root
//!    named by `defaultWorkspace`
//! 6. otherwise unresolved

use anyhow::Result;
use std::path::PathBuf;

use crate::core::model::RootReport;
use crate::core::paths::{final_segment, join_root, leading_segment, starts_with_separator};
use crate::core::render::{RenderConfig, Renderer};
use crate::env::parse::{parse_env, read_env_file, EnvMap};
use crate::env::substitute::{has_placeholders, substitute_env, EnvSource, ProcessEnv};
use crate::workspace::folders::WorkspaceFolder;

/// Host-level resolver settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Workspace name used when several roots exist and the path gives no hint
    pub default_workspace: Option<String>,
    /// Path used when the substituted input path is empty
    pub default_input_path: Option<String>,
    /// Env file consulted before the process environment
    pub default_env_file: Option<String>,
}

/// Resolves paths against the current workspace roots
pub struct RootResolver<'a> {
    folders: &'a [WorkspaceFolder],
    settings: &'a ResolverSettings,
    env: &'a dyn EnvSource,
}

impl<'a> RootResolver<'a> {
    pub fn new(
        folders: &'a [WorkspaceFolder],
        settings: &'a ResolverSettings,
        env: &'a dyn EnvSource,
    ) -> Self {
        Self {
            folders,
            settings,
            env,
        }
    }

    /// Resolve `path` to an absolute location, or `None` if unresolvable
    pub fn resolve(&self, path: Option<&str>) -> Option<PathBuf> {
        self.resolve_with(path, true)
    }

    /// Replace `${env:...}` placeholders, reading the env file fresh
    pub fn substitute(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        if !has_placeholders(path) {
            return path.to_string();
        }

        let vars = self.load_env_file();
        substitute_env(path, vars.as_ref(), self.env)
    }

    /// Locate the configured env file (its own path is not substituted)
    pub fn env_file_location(&self) -> Option<PathBuf> {
        let file = self.settings.default_env_file.as_deref()?;
        self.resolve_with(Some(file), false)
    }

    fn load_env_file(&self) -> Option<EnvMap> {
        let location = self.env_file_location()?;
        tracing::debug!(env_file = %location.display(), "loading env file");
        Some(parse_env(&read_env_file(&location)))
    }

    fn resolve_with(&self, path: Option<&str>, substitute: bool) -> Option<PathBuf> {
        let Some(raw) = path else {
            let first = self.folders.first().map(|folder| folder.path.clone());
            tracing::debug!(root = ?first, "no path given, using first workspace root");
            return first;
        };

        let expand = |p: &str| {
            if substitute {
                self.substitute(p)
            } else {
                p.to_string()
            }
        };

        let mut path = expand(raw);
        if starts_with_separator(&path) {
            tracing::debug!(path = %path, "absolute path");
            return Some(PathBuf::from(path));
        }

        if path.is_empty() {
            if let Some(default) = &self.settings.default_input_path {
                path = expand(default);
            }
        }

        match self.folders {
            [] => {
                tracing::debug!(path = %path, "no workspace roots, path unresolved");
                None
            }
            [only] => Some(join_root(&only.path, &path)),
            folders => {
                if let Some(folder) = self.folder_for_leading_segment(&path) {
                    tracing::debug!(folder = %folder.name, "matched workspace by leading segment");
                    return Some(join_root(&folder.path, &path));
                }

                let name = self.settings.default_workspace.as_deref()?;
                match folders.iter().find(|folder| folder.name == name) {
                    Some(folder) => {
                        tracing::debug!(folder = %folder.name, "using default workspace");
                        Some(join_root(&folder.path, &path))
                    }
                    None => {
                        tracing::debug!(workspace = name, "default workspace not open");
                        None
                    }
                }
            }
        }
    }

    /// Root whose folder name is the path's leading segment, which must be
    /// followed by a separator
    fn folder_for_leading_segment(&self, path: &str) -> Option<&'a WorkspaceFolder> {
        let normalized = path.replace('\\', "/");
        let lead = leading_segment(&normalized)?;
        if !normalized.starts_with(&format!("{}/", lead)) {
            return None;
        }

        self.folders
            .iter()
            .find(|folder| final_segment(&folder.path).as_deref() == Some(lead))
    }
}

/// Run the resolve command
pub fn run_resolve(
    folders: &[WorkspaceFolder],
    settings: &ResolverSettings,
    path: Option<&str>,
    config: RenderConfig,
) -> Result<()> {
    let resolver = RootResolver::new(folders, settings, &ProcessEnv);
    let report = RootReport {
        input: path.map(str::to_string),
        root: resolver
            .resolve(path)
            .map(|root| root.to_string_lossy().into_owned()),
    };

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&report));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    fn multi_root() -> Vec<WorkspaceFolder> {
        vec![
            WorkspaceFolder::new("/w/web"),
            WorkspaceFolder::named("backend", "/w/api"),
        ]
    }

    #[test]
    fn test_absent_path_uses_first_root() {
        let folders = multi_root();
        let settings = ResolverSettings::default();
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(resolver.resolve(None), Some(PathBuf::from("/w/web")));
    }

    #[test]
    fn test_absent_path_without_roots_is_unresolved() {
        let settings = ResolverSettings::default();
        let env = no_env();
        let resolver = RootResolver::new(&[], &settings, &env);
        assert_eq!(resolver.resolve(None), None);
    }

    #[test]
    fn test_absolute_path_is_returned_unchanged() {
        let settings = ResolverSettings {
            default_workspace: Some("backend".to_string()),
            ..Default::default()
        };
        let env = no_env();
        for folders in [vec![], vec![WorkspaceFolder::new("/r")], multi_root()] {
            let resolver = RootResolver::new(&folders, &settings, &env);
            assert_eq!(
                resolver.resolve(Some("/etc/app")),
                Some(PathBuf::from("/etc/app"))
            );
        }
    }

    #[test]
    fn test_single_root_joins_relative_path() {
        let folders = vec![WorkspaceFolder::new("/r")];
        let settings = ResolverSettings::default();
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(resolver.resolve(Some("a/b")), Some(PathBuf::from("/r/a/b")));
    }

    #[test]
    fn test_relative_path_without_roots_is_unresolved() {
        let settings = ResolverSettings::default();
        let env = no_env();
        let resolver = RootResolver::new(&[], &settings, &env);
        assert_eq!(resolver.resolve(Some("a")), None);
    }

    #[test]
    fn test_empty_path_uses_default_input_path() {
        let folders = vec![WorkspaceFolder::new("/r")];
        let settings = ResolverSettings {
            default_input_path: Some("inputs".to_string()),
            ..Default::default()
        };
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(resolver.resolve(Some("")), Some(PathBuf::from("/r/inputs")));
    }

    #[test]
    fn test_absolute_default_input_path_is_joined_to_root() {
        let folders = vec![WorkspaceFolder::new("/r")];
        let settings = ResolverSettings {
            default_input_path: Some("/data".to_string()),
            ..Default::default()
        };
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(resolver.resolve(Some("")), Some(PathBuf::from("/r/data")));
    }

    #[test]
    fn test_absolute_default_input_path_joins_default_workspace() {
        let folders = multi_root();
        let settings = ResolverSettings {
            default_workspace: Some("backend".to_string()),
            default_input_path: Some("/data/x".to_string()),
            ..Default::default()
        };
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(
            resolver.resolve(Some("")),
            Some(PathBuf::from("/w/api/data/x"))
        );
    }

    #[test]
    fn test_empty_path_without_default_is_root() {
        let folders = vec![WorkspaceFolder::new("/r")];
        let settings = ResolverSettings::default();
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(resolver.resolve(Some("")), Some(PathBuf::from("/r")));
    }

    #[test]
    fn test_placeholder_expanding_to_empty_uses_default_input_path() {
        let folders = vec![WorkspaceFolder::new("/r")];
        let settings = ResolverSettings {
            default_input_path: Some("fallback".to_string()),
            ..Default::default()
        };
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(
            resolver.resolve(Some("${env:UNSET_VAR}")),
            Some(PathBuf::from("/r/fallback"))
        );
    }

    #[test]
    fn test_multi_root_matches_leading_segment() {
        let folders = multi_root();
        let settings = ResolverSettings::default();
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(
            resolver.resolve(Some("api/src")),
            Some(PathBuf::from("/w/api/api/src"))
        );
    }

    #[test]
    fn test_multi_root_leading_segment_needs_separator() {
        let folders = multi_root();
        let settings = ResolverSettings::default();
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(resolver.resolve(Some("api")), None);
    }

    #[test]
    fn test_multi_root_falls_back_to_default_workspace() {
        let folders = multi_root();
        let settings = ResolverSettings {
            default_workspace: Some("backend".to_string()),
            ..Default::default()
        };
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(
            resolver.resolve(Some("src/main.rs")),
            Some(PathBuf::from("/w/api/src/main.rs"))
        );
    }

    #[test]
    fn test_multi_root_without_hint_is_unresolved() {
        let folders = multi_root();
        let settings = ResolverSettings {
            default_workspace: Some("missing".to_string()),
            ..Default::default()
        };
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(resolver.resolve(Some("src")), None);
    }

    #[test]
    fn test_substitution_from_env_file_and_process() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join(".env"), "DATA=\"datasets\"\n").unwrap();

        let folders = vec![WorkspaceFolder::new(temp.path())];
        let settings = ResolverSettings {
            default_env_file: Some(".env".to_string()),
            ..Default::default()
        };
        let mut env = no_env();
        env.insert("SUB".to_string(), "train".to_string());
        let resolver = RootResolver::new(&folders, &settings, &env);

        assert_eq!(
            resolver.resolve(Some("${env:DATA}/${env:SUB}")),
            Some(temp.path().join("datasets").join("train"))
        );
    }

    #[test]
    fn test_substitution_to_absolute_path() {
        let folders = vec![WorkspaceFolder::new("/r")];
        let settings = ResolverSettings::default();
        let mut env = no_env();
        env.insert("HOME".to_string(), "/home/u".to_string());
        let resolver = RootResolver::new(&folders, &settings, &env);

        assert_eq!(
            resolver.resolve(Some("${env:HOME}/cfg")),
            Some(PathBuf::from("/home/u/cfg"))
        );
    }

    #[test]
    fn test_missing_env_file_degrades_to_process_env() {
        let folders = vec![WorkspaceFolder::new("/nonexistent-root")];
        let settings = ResolverSettings {
            default_env_file: Some("missing.env".to_string()),
            ..Default::default()
        };
        let mut env = no_env();
        env.insert("X".to_string(), "x".to_string());
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(resolver.substitute("${env:X}/${env:Y}"), "x/");
    }

    #[test]
    fn test_env_file_location_is_workspace_relative() {
        let folders = vec![WorkspaceFolder::new("/r")];
        let settings = ResolverSettings {
            default_env_file: Some("conf/.env".to_string()),
            ..Default::default()
        };
        let env = no_env();
        let resolver = RootResolver::new(&folders, &settings, &env);
        assert_eq!(
            resolver.env_file_location(),
            Some(PathBuf::from("/r/conf/.env"))
        );
    }
}

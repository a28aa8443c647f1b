//! Env API - inspect an env file the way path resolution sees it

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::core::render::{RenderConfig, Renderer};
use crate::env::parse::{parse_env, read_env_file, EnvMap};
use crate::env::substitute::ProcessEnv;
use crate::workspace::folders::WorkspaceFolder;
use crate::workspace::root::{ResolverSettings, RootResolver};

/// Locate and parse an env file. `file` overrides the configured env file.
pub fn load_env(
    folders: &[WorkspaceFolder],
    settings: &ResolverSettings,
    file: Option<&str>,
) -> Result<(PathBuf, EnvMap)> {
    let settings = ResolverSettings {
        default_env_file: file
            .map(str::to_string)
            .or_else(|| settings.default_env_file.clone()),
        ..settings.clone()
    };

    let resolver = RootResolver::new(folders, &settings, &ProcessEnv);
    let location = resolver
        .env_file_location()
        .context("No env file could be located (pass FILE or --env-file)")?;

    let map = parse_env(&read_env_file(&location));
    Ok((location, map))
}

/// Run the env command
pub fn run_env(
    folders: &[WorkspaceFolder],
    settings: &ResolverSettings,
    file: Option<&str>,
    config: RenderConfig,
) -> Result<()> {
    let (location, map) = load_env(folders, settings, file)?;
    tracing::debug!(env_file = %location.display(), keys = map.len(), "parsed env file");

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&map));

    Ok(())
}

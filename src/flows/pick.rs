//! Pick flow - End-to-end pick operation
//!
//! Steps:
//! 1. Normalize arguments
//! 2. Resolve the starting root
//! 3. Native dialog or quick-select navigation from that root
//! 4. Format the selection, or fall back to `output.default`, then to
//!    `output.defaultPath` (re-resolved, raw string if that fails)

use anyhow::Result;
use std::path::PathBuf;

use crate::backends::dialog::default_browser;
use crate::backends::fs::FsDirectoryReader;
use crate::backends::prompt::TerminalPrompter;
use crate::backends::{DialogOptions, DirectoryReader, NativeBrowser, Prompter};
use crate::core::error;
use crate::core::model::{OutcomeSource, PickArgs, PickOutcome};
use crate::core::render::{RenderConfig, Renderer};
use crate::env::substitute::{EnvSource, ProcessEnv};
use crate::flows::navigate::Navigator;
use crate::flows::output::format_selection;
use crate::workspace::folders::WorkspaceFolder;
use crate::workspace::root::{ResolverSettings, RootResolver};

/// Everything the pick flow needs from its host
pub struct Host<'a> {
    pub folders: &'a [WorkspaceFolder],
    pub settings: &'a ResolverSettings,
    pub env: &'a dyn EnvSource,
    pub reader: &'a dyn DirectoryReader,
    pub prompter: &'a mut dyn Prompter,
    pub browser: &'a mut dyn NativeBrowser,
}

/// Run one pick
pub fn pick(args: PickArgs, host: &mut Host<'_>) -> error::Result<PickOutcome> {
    let config = args.normalize();
    let resolver = RootResolver::new(host.folders, host.settings, host.env);
    let root = resolver.resolve(config.options.path.as_deref());
    tracing::debug!(root = ?root, native = config.options.native, "starting pick");

    let selection: Option<Vec<PathBuf>> = if config.options.native {
        let dialog_options = DialogOptions::from(&config.options);
        host.browser.browse(root.as_deref(), &dialog_options)?
    } else {
        let navigator = Navigator::new(&config.options, host.reader)?;
        navigator.run(root.unwrap_or_default(), &mut *host.prompter)?
    };

    if let Some(value) = format_selection(selection.as_deref(), &config.output) {
        return Ok(PickOutcome::new(value, OutcomeSource::Selection));
    }

    if let Some(default) = config.output.default_value {
        tracing::debug!("nothing picked, using output.default");
        return Ok(PickOutcome::new(default, OutcomeSource::Default));
    }

    if let Some(default_path) = &config.output.default_path {
        tracing::debug!(default_path = %default_path, "nothing picked, using output.defaultPath");
        let resolved = resolver.resolve(Some(default_path));
        let value = format_selection(resolved.as_ref().map(std::slice::from_ref), &config.output)
            .unwrap_or_else(|| default_path.clone());
        return Ok(PickOutcome::new(value, OutcomeSource::DefaultPath));
    }

    Ok(PickOutcome::nothing())
}

/// Run the pick command on the terminal and print the value
pub fn run_pick(
    folders: &[WorkspaceFolder],
    settings: &ResolverSettings,
    args: PickArgs,
    config: RenderConfig,
) -> Result<()> {
    let reader = FsDirectoryReader;
    let mut prompter = TerminalPrompter::stdio();
    let mut browser = default_browser();

    let mut host = Host {
        folders,
        settings,
        env: &ProcessEnv,
        reader: &reader,
        prompter: &mut prompter,
        browser: browser.as_mut(),
    };

    let outcome = pick(args, &mut host)?;
    tracing::debug!(source = ?outcome.source, "pick finished");

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&outcome));

    Ok(())
}

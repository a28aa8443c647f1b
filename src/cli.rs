//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::model::PickArgs;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::workspace::folders::WorkspaceFolder;
use crate::workspace::root::ResolverSettings;

/// pathpick - pick files and folders for task and launch configurations.
#[derive(Parser, Debug)]
#[command(name = "pathpick")]
#[command(
    author,
    version,
    about,
    long_about = r#"pathpick resolves a file or folder pick into a path string, ready to be
substituted into a configuration field.

The picked value is printed on stdout. Prompts, lists and diagnostics go to
stderr, so the output can be captured directly.

Paths may contain ${env:NAME} placeholders. They are resolved from --env-file
first, then from the process environment, then replaced by an empty string.

Examples:
    pathpick pick
    pathpick pick 'data/${env:DATASET}'
    pathpick pick '{"options":{"canChangeFolder":true,"filterExt":".env"}}'
    pathpick --workspace web=../web --workspace api=../api resolve api/src
    pathpick --env-file .env env
"#
)]
pub struct Cli {
    /// Workspace root folder ([NAME=]DIR), repeatable.
    #[arg(
        long = "workspace",
        global = true,
        value_name = "[NAME=]DIR",
        env = "PATHPICK_WORKSPACE",
        value_delimiter = ',',
        long_help = "Workspace root folder, repeatable. The first one is the default root.\n\n\
NAME defaults to the folder's final path segment and is what --default-workspace\n\
matches against. Relative DIRs are taken from the current directory.\n\n\
If omitted, the current directory is the only workspace root."
    )]
    pub workspaces: Vec<WorkspaceFolder>,

    /// Run without any workspace root.
    #[arg(
        long,
        global = true,
        long_help = "Run without any workspace root. Relative paths then cannot be resolved\n\
and only absolute paths (or placeholders expanding to them) are browsable.\n\n\
Overrides --workspace and PATHPICK_WORKSPACE."
    )]
    pub no_workspace: bool,

    /// Workspace used when several roots exist and the path gives no hint.
    #[arg(
        long,
        global = true,
        value_name = "NAME",
        env = "PATHPICK_DEFAULT_WORKSPACE"
    )]
    pub default_workspace: Option<String>,

    /// Path used when the (substituted) input path is empty.
    #[arg(
        long = "default-path",
        global = true,
        value_name = "PATH",
        env = "PATHPICK_DEFAULT_PATH"
    )]
    pub default_input_path: Option<String>,

    /// Env file consulted for ${env:NAME} before the process environment.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "PATHPICK_ENV_FILE",
        long_help = "Env file (KEY=VALUE lines, # comments, optional quotes) consulted for\n\
${env:NAME} placeholders before the process environment.\n\n\
Relative paths are resolved against the workspace roots. A missing file is\n\
not an error: placeholders fall back to the process environment."
    )]
    pub env_file: Option<String>,

    /// Output format (text/json).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default): the bare value\n\
- json: a JSON object describing the result"
    )]
    pub format: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG, when set, takes precedence."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick files or folders and print the resulting path string.
    #[command(
        long_about = r#"Pick files or folders and print the resulting path string.

ARGS is either a bare path (the starting folder) or a JSON object:

  {
    "options": {
      "native": false,            open the native dialog instead of the list
      "path": "...",              starting folder (default: first workspace root)
      "canSelectFiles": true,
      "canSelectFolders": false,
      "canSelectMany": false,
      "canChangeFolder": false,   allow browsing into sub/parent folders
      "title": "...",
      "filterRegExp": "...",      file names must match
      "filterExt": "..."          file names must end with this
    },
    "output": {
      "join": ",",                separator between multiple picks
      "fsPath": true,             native path (true) or URI-style path (false)
      "defaultPath": "...",       resolved and returned when nothing is picked
      "default": "..."            returned verbatim when nothing is picked
    }
  }

Examples:
    pathpick pick src
    pathpick pick '{"options":{"canSelectFolders":true,"canChangeFolder":true}}'
    pathpick pick --args-file .vscode/pick-dataset.json
"#
    )]
    Pick {
        /// Bare path or JSON configuration.
        #[arg(value_name = "ARGS")]
        args: Option<String>,

        /// Read the JSON configuration from a file.
        #[arg(long, value_name = "FILE", conflicts_with = "args")]
        args_file: Option<PathBuf>,
    },

    /// Resolve a path to its starting location without prompting.
    #[command(
        long_about = "Resolve PATH the same way pick resolves its starting folder and print the\n\
location. Nothing is printed when the path cannot be resolved.\n\n\
Examples:\n\
  pathpick resolve\n\
  pathpick resolve 'out/${env:TARGET}'\n\
  pathpick --workspace a --workspace b --default-workspace b resolve src\n"
    )]
    Resolve {
        /// Path to resolve (default: first workspace root).
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },

    /// Parse an env file and print its entries.
    #[command(
        long_about = "Locate an env file (FILE or --env-file, resolved against the workspace\n\
roots) and print its KEY=VALUE entries sorted by key, exactly as placeholder\n\
substitution sees them.\n\n\
Example:\n\
  pathpick env .env\n"
    )]
    Env {
        /// Env file (default: --env-file).
        #[arg(value_name = "FILE")]
        file: Option<String>,
    },
}

impl Cli {
    /// Workspace roots in the order given
    pub fn workspace_folders(&self, cwd: &Path) -> Vec<WorkspaceFolder> {
        if self.no_workspace {
            return Vec::new();
        }
        if self.workspaces.is_empty() {
            return vec![WorkspaceFolder::new(cwd)];
        }
        self.workspaces
            .iter()
            .cloned()
            .map(|folder| folder.absolutize(cwd))
            .collect()
    }

    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            default_workspace: self.default_workspace.clone(),
            default_input_path: self.default_input_path.clone(),
            default_env_file: self.env_file.clone(),
        }
    }

    /// Default log filter for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Load pick arguments from the positional ARGS or --args-file
fn load_pick_args(args: Option<String>, args_file: Option<PathBuf>) -> Result<PickArgs> {
    if let Some(file) = args_file {
        let content = fs::read_to_string(&file)
            .with_context(|| format!("Failed to read args file: {:?}", file))?;
        return serde_json::from_str(&content)
            .with_context(|| format!("Invalid pick configuration in {:?}", file));
    }

    match args {
        Some(raw) => PickArgs::from_cli_arg(&raw).context("Invalid pick configuration"),
        None => Ok(PickArgs::default()),
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let folders = cli.workspace_folders(&cwd);
    let settings = cli.resolver_settings();
    tracing::debug!(roots = folders.len(), ?settings, "workspace ready");

    match cli.command {
        Commands::Pick { args, args_file } => {
            let args = load_pick_args(args, args_file)?;
            crate::flows::pick::run_pick(&folders, &settings, args, render_config)
        }

        Commands::Resolve { path } => crate::workspace::root::run_resolve(
            &folders,
            &settings,
            path.as_deref(),
            render_config,
        ),

        Commands::Env { file } => {
            crate::env::api::run_env(&folders, &settings, file.as_deref(), render_config)
        }
    }
}

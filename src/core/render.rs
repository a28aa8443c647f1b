//! Renderer module
//!
//! Renders command results to stdout formats: text, json

use serde::Serialize;

use crate::core::model::{PickOutcome, RootReport};
use crate::env::parse::EnvMap;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The bare value, ready for substitution
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Anything a command prints
pub trait Render: Serialize {
    /// Plain-text form
    fn to_text(&self) -> String;
}

impl Render for PickOutcome {
    fn to_text(&self) -> String {
        self.value.clone().unwrap_or_default()
    }
}

impl Render for RootReport {
    fn to_text(&self) -> String {
        self.root.clone().unwrap_or_default()
    }
}

impl Render for EnvMap {
    fn to_text(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renderer for command results
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a value to a string
    pub fn render<T: Render>(&self, value: &T) -> String {
        match self.config.format {
            OutputFormat::Text => value.to_text(),
            OutputFormat::Json => self.render_json(value),
        }
    }

    fn render_json<T: Render>(&self, value: &T) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| "null".to_string())
    }
}

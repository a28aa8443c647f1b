//! Env-file parsing
//!
//! Format:
//! ```text
//! # comment
//! KEY=value
//! QUOTED="value with = signs"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Key/value pairs read from one env file
pub type EnvMap = BTreeMap<String, String>;

/// Parse env-file content. Later duplicates overwrite earlier ones.
pub fn parse_env(content: &str) -> EnvMap {
    let mut map = EnvMap::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };

        map.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }

    map
}

/// Strip one layer of matching single or double quotes
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Read an env file as text. Missing or unreadable files yield an empty
/// string; invalid UTF-8 is replaced lossily.
pub fn read_env_file(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "env file not readable");
            String::new()
        }
    }
}

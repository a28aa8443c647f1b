//! `${env:NAME}` substitution
//!
//! Lookup order per placeholder: env file, then process environment, then
//! the empty string. The process environment is injected as an
//! [`EnvSource`] so substitution stays pure.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, HashMap};

use crate::env::parse::EnvMap;

/// Static regex for `${env:NAME}` placeholders
/// Whitespace is allowed between the colon and the name; names are ASCII
/// letters, digits and underscores.
pub static ENV_PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{env:\s*([A-Za-z0-9_]+)\}").expect("Invalid ENV_PLACEHOLDER_RE regex")
});

/// Read-only key/value lookup
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Replace every `${env:NAME}` in `path`.
pub fn substitute_env(path: &str, file_vars: Option<&EnvMap>, process: &dyn EnvSource) -> String {
    if path.is_empty() {
        return String::new();
    }

    ENV_PLACEHOLDER_RE
        .replace_all(path, |caps: &Captures| {
            let key = &caps[1];
            file_vars
                .and_then(|vars| vars.get(key).cloned())
                .or_else(|| process.var(key))
                .unwrap_or_default()
        })
        .into_owned()
}

/// True when `path` contains at least one placeholder
pub fn has_placeholders(path: &str) -> bool {
    ENV_PLACEHOLDER_RE.is_match(path)
}

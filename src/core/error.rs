//! Error type for the pick engine
//!
//! Only failures that cannot be degraded locally live here. Missing env files,
//! unreadable directories and unresolved roots are absorbed where they happen.

use std::io;

/// Errors that can abort a pick
#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("invalid filterRegExp `{pattern}`: {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("prompt I/O failed: {0}")]
    Prompt(#[from] io::Error),
}

/// Result type alias for pick operations
pub type Result<T> = std::result::Result<T, PickError>;

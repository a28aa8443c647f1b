//! Env module - `${env:NAME}` placeholder support
//!
//! Provides:
//! - parse: KEY=VALUE env-file parsing
//! - substitute: placeholder replacement with env-file / process fallback
//! - api: the env command

pub mod api;
pub mod parse;
pub mod substitute;

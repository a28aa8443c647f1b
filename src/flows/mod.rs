//! Flows module - The pick operation and its stages
//!
//! Provides:
//! - navigate: quick-select directory browsing state machine
//! - output: turning selections into the final string
//! - pick: end-to-end orchestration with default fallbacks

pub mod navigate;
pub mod output;
pub mod pick;

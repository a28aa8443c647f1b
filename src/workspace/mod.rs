//! Workspace module - roots and root resolution
//!
//! Provides:
//! - folders: workspace root folders (name + location)
//! - root: resolving a loosely specified path to a starting location

pub mod folders;
pub mod root;

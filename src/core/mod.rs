//! Core module - Shared data structures and utilities
//!
//! This module provides:
//! - Pick configuration model and argument normalization
//! - Error type for the pick engine
//! - Path helpers
//! - Rendering of command results

pub mod error;
pub mod model;
pub mod paths;
pub mod render;

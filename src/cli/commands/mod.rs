//! CLI command implementations

pub mod bom;
pub mod catalog;
pub mod completions;
pub mod config;
pub mod validate;

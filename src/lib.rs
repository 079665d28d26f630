//! ebom: Enclosure BOM configurator
//!
//! Resolves a parametric enclosure module (width, height, finish) against a
//! static parts catalog and produces a deduplicated bill of materials.

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
pub mod yaml;

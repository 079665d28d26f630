//! Shared helper functions for CLI commands

use clap::ValueEnum;
use miette::Result;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{load_catalog_or_default, Catalog, Config};
use crate::entities::catalog_item::DimensionConstraint;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an optional dimension constraint for table output
pub fn format_dimension(constraint: Option<&DimensionConstraint>) -> String {
    constraint.map_or_else(|| "-".to_string(), |c| c.to_string())
}

/// Pick the effective output format: flag, then configured default, then `fallback`
pub fn effective_format(global: &GlobalOpts, config: &Config, fallback: OutputFormat) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    config
        .default_format
        .as_deref()
        .and_then(|f| OutputFormat::from_str(f, true).ok())
        .filter(|f| *f != OutputFormat::Auto)
        .unwrap_or(fallback)
}

/// Load the catalog named by `--catalog`, the config, or the built-in one
pub fn load_catalog(global: &GlobalOpts, config: &Config) -> Result<Catalog> {
    let path = global.catalog.as_deref().or(config.catalog.as_deref());
    Ok(load_catalog_or_default(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(format: OutputFormat) -> GlobalOpts {
        GlobalOpts {
            format,
            quiet: false,
            verbose: false,
            catalog: None,
        }
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_format_dimension() {
        assert_eq!(format_dimension(None), "-");
        assert_eq!(format_dimension(Some(&DimensionConstraint::Exact(100.0))), "100");
        assert_eq!(
            format_dimension(Some(&DimensionConstraint::Range {
                min: 400.0,
                max: 699.9
            })),
            "400..=699.9"
        );
    }

    #[test]
    fn test_effective_format() {
        let config = Config {
            default_format: Some("JSON".to_string()),
            ..Config::default()
        };
        assert_eq!(
            effective_format(&global(OutputFormat::Auto), &config, OutputFormat::Tsv),
            OutputFormat::Json
        );
        assert_eq!(
            effective_format(&global(OutputFormat::Csv), &config, OutputFormat::Tsv),
            OutputFormat::Csv
        );
        assert_eq!(
            effective_format(&global(OutputFormat::Auto), &Config::default(), OutputFormat::Tsv),
            OutputFormat::Tsv
        );
    }
}

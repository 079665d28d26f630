//! `ebom validate` command - Check a catalog for authoring defects

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::loader::{default_catalog_source, read_catalog_source, CatalogFormat, DEFAULT_CATALOG};
use crate::core::Config;
use crate::schema::validator::{CatalogValidator, ValidationIssue};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Catalog file to validate (default: configured catalog, then the built-in one)
    #[arg()]
    pub path: Option<PathBuf>,

    /// Strict mode - warnings become errors
    #[arg(long)]
    pub strict: bool,

    /// Show summary only, don't show individual issues
    #[arg(long)]
    pub summary: bool,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let path = args
        .path
        .clone()
        .or_else(|| global.catalog.clone())
        .or_else(|| config.catalog.clone());

    let (content, format, name) = match &path {
        Some(p) => (
            read_catalog_source(p)?,
            CatalogFormat::from_path(p),
            p.display().to_string(),
        ),
        None => (
            default_catalog_source()?,
            CatalogFormat::Yaml,
            format!("{} (built-in)", DEFAULT_CATALOG),
        ),
    };

    if !global.quiet {
        println!("{} Validating {}...\n", style("→").blue(), name);
    }

    let validator = CatalogValidator::new();
    let result = validator.validate_source(&content, format, &name)?;

    if !args.summary {
        for issue in &result.errors {
            print_issue(&style("✗").red().to_string(), issue);
        }
        for issue in &result.warnings {
            print_issue(&style("!").yellow().to_string(), issue);
        }
        if result.has_issues() {
            println!();
        }
    }

    let passed = result.passes(args.strict);
    if !global.quiet {
        println!("{}", style("─".repeat(60)).dim());
        println!(
            "{} {} error(s), {} warning(s){}",
            if passed {
                style("✓").green()
            } else {
                style("✗").red()
            },
            result.errors.len(),
            result.warnings.len(),
            if args.strict { " (strict)" } else { "" }
        );
    }

    if passed {
        Ok(())
    } else {
        Err(miette::miette!(
            "Catalog validation failed: {} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        ))
    }
}

fn print_issue(marker: &str, issue: &ValidationIssue) {
    println!("{} {} {}", marker, style(&issue.path).dim(), issue.message);
    if let Some(suggestion) = &issue.suggestion {
        println!("    {}", style(suggestion).yellow());
    }
}

//! `ebom config` command - Inspect layered configuration

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::LOCAL_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show,

    /// Show where configuration files are read from
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let mut config = Config::load();
    if global.catalog.is_some() {
        config.catalog = global.catalog.clone();
    }

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config).into_diagnostic()?);
        }
        _ => {
            let yaml = serde_yml::to_string(&config).into_diagnostic()?;
            print!("{}", yaml);
            if !global.quiet {
                let params = config.default_params();
                println!(
                    "# effective defaults: {} x {} mm, {}",
                    params.width, params.height, params.finish
                );
            }
        }
    }
    Ok(())
}

fn run_path() -> Result<()> {
    match Config::global_config_path() {
        Some(path) => {
            let marker = if path.exists() {
                style("✓").green()
            } else {
                style("-").dim()
            };
            println!("{} global: {}", marker, path.display());
        }
        None => println!("{} global: (no config directory)", style("-").dim()),
    }

    let local = std::path::Path::new(LOCAL_CONFIG_FILE);
    let marker = if local.exists() {
        style("✓").green()
    } else {
        style("-").dim()
    };
    println!("{} local:  {}", marker, local.display());
    Ok(())
}

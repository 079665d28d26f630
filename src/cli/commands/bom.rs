//! `ebom bom` command - Resolve module parameters to a bill of materials

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::args::CliFinish;
use crate::cli::helpers::{effective_format, load_catalog};
use crate::cli::output::{render_bom, write_output};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::resolver::{resolve_detailed, Resolution};
use crate::core::Config;
use crate::entities::params::ParamsPatch;

#[derive(clap::Args, Debug)]
pub struct BomArgs {
    /// Module width in millimeters (default: 500 or configured)
    #[arg(long, short = 'W')]
    pub width: Option<f64>,

    /// Module height in millimeters (default: 500 or configured)
    #[arg(long, short = 'H')]
    pub height: Option<f64>,

    /// Surface finish (default: metal or configured)
    #[arg(long)]
    pub finish: Option<CliFinish>,

    /// Report which role resolved to which part on stderr
    #[arg(long)]
    pub explain: bool,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl BomArgs {
    fn patch(&self) -> ParamsPatch {
        ParamsPatch {
            width: self.width,
            height: self.height,
            finish: self.finish.map(Into::into),
        }
    }
}

pub fn run(args: BomArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let params = config.default_params().apply(&args.patch());
    params.validate()?;

    let catalog = load_catalog(global, &config)?;
    let resolution = resolve_detailed(&catalog, &params);

    if args.explain && !global.quiet {
        explain(&resolution);
    }

    let format = effective_format(global, &config, OutputFormat::Tsv);
    let color = args.output.is_none() && console::colors_enabled();
    let rendered = render_bom(&resolution.bom, format, color)?;
    write_output(&rendered, args.output.as_deref(), global.quiet)?;

    if !global.quiet && format == OutputFormat::Tsv {
        let skipped = resolution.unresolved().count();
        if skipped > 0 {
            eprintln!(
                "{} {} role(s) had no catalog match for {}x{} mm {}",
                style("!").yellow(),
                skipped,
                params.width,
                params.height,
                params.finish
            );
        }
    }

    Ok(())
}

fn explain(resolution: &Resolution) {
    eprintln!("{}", style("Role resolution").bold());
    for r in &resolution.roles {
        let (marker, part) = match &r.part_id {
            Some(id) => (style("✓").green(), id.clone()),
            None => (style("✗").red(), "(no match)".to_string()),
        };
        eprintln!(
            "  {} {:<20} {:<12} {:<12} x{:<3} {}",
            marker,
            r.role.name,
            r.role.category,
            r.role.part_id_pattern,
            r.role.quantity,
            part
        );
    }
    eprintln!();
}

//! `ebom catalog` command - Browse and query the parts catalog

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::{CliCategory, CliFinish};
use crate::cli::helpers::{effective_format, format_dimension, load_catalog, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, PartQuery};
use crate::entities::catalog_item::{Finish, PartCategory, ProductCatalogItem};

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List catalog items with filtering
    List(ListArgs),

    /// Show a catalog item's details
    Show(ShowArgs),

    /// Run a catalog query and show every match in catalog order
    Find(FindArgs),
}

/// Category filter for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryFilter {
    Panel,
    Edge,
    Connector,
    Hardware,
    All,
}

impl CategoryFilter {
    fn accepts(self, category: PartCategory) -> bool {
        match self {
            CategoryFilter::Panel => category == PartCategory::Panel,
            CategoryFilter::Edge => category == PartCategory::Edge,
            CategoryFilter::Connector => category == PartCategory::Connector,
            CategoryFilter::Hardware => category == PartCategory::Hardware,
            CategoryFilter::All => true,
        }
    }
}

/// Finish filter for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FinishFilter {
    Metal,
    Wood,
    All,
}

impl FinishFilter {
    fn accepts(self, finish: Finish) -> bool {
        match self {
            FinishFilter::Metal => finish == Finish::Metal,
            FinishFilter::Wood => finish == Finish::Wood,
            FinishFilter::All => true,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by category
    #[arg(long, short = 'c', default_value = "all")]
    pub category: CategoryFilter,

    /// Filter by finish
    #[arg(long, default_value = "all")]
    pub finish: FinishFilter,

    /// Search in part number and description
    #[arg(long)]
    pub search: Option<String>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Part number
    pub part_id: String,
}

#[derive(clap::Args, Debug)]
pub struct FindArgs {
    /// Part category
    #[arg(long, short = 'c')]
    pub category: CliCategory,

    /// Surface finish
    #[arg(long)]
    pub finish: CliFinish,

    /// Substring the part number must contain
    #[arg(long, short = 'p')]
    pub pattern: Option<String>,

    /// Requested width in millimeters
    #[arg(long, short = 'W')]
    pub width: Option<f64>,

    /// Requested height in millimeters
    #[arg(long, short = 'H')]
    pub height: Option<f64>,
}

pub fn run(cmd: CatalogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CatalogCommands::List(args) => run_list(args, global),
        CatalogCommands::Show(args) => run_show(args, global),
        CatalogCommands::Find(args) => run_find(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;

    let search = args.search.as_deref().map(str::to_lowercase);
    let items: Vec<&ProductCatalogItem> = catalog
        .iter()
        .filter(|item| args.category.accepts(item.category))
        .filter(|item| args.finish.accepts(item.finish))
        .filter(|item| match &search {
            Some(s) => {
                item.part_id.to_lowercase().contains(s)
                    || item.description.to_lowercase().contains(s)
            }
            None => true,
        })
        .collect();

    if args.count {
        println!("{}", items.len());
        return Ok(());
    }

    if items.is_empty() {
        if !global.quiet {
            println!("No catalog items found.");
        }
        return Ok(());
    }

    let format = effective_format(global, &config, OutputFormat::Tsv);
    output_items(&items, format, global.quiet)
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;

    let item = catalog
        .get(&args.part_id)
        .ok_or_else(|| miette::miette!("No catalog item found with partId: {}", args.part_id))?;

    match effective_format(global, &config, OutputFormat::Yaml) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Id => println!("{}", item.part_id),
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(item).into_diagnostic()?;
            print!("{}", yaml);
        }
        format => output_items(&[item], format, global.quiet)?,
    }
    Ok(())
}

fn run_find(args: FindArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;

    let mut query = PartQuery::new(args.category.into(), args.finish.into());
    if let Some(pattern) = args.pattern.as_deref() {
        query = query.pattern(pattern);
    }
    if let Some(width) = args.width {
        query = query.width(width);
    }
    if let Some(height) = args.height {
        query = query.height(height);
    }

    let matches = catalog.find_all(&query);
    if matches.is_empty() {
        if !global.quiet {
            println!("No catalog item matches this query.");
        }
        return Ok(());
    }

    let format = effective_format(global, &config, OutputFormat::Tsv);
    output_items(&matches, format, true)?;

    if !global.quiet && matches!(format, OutputFormat::Tsv) {
        println!();
        println!(
            "{} Selected: {}",
            style("→").blue(),
            style(&matches[0].part_id).cyan()
        );
        if matches.len() > 1 {
            println!(
                "{} {} other item(s) also match; the first in catalog order wins",
                style("!").yellow(),
                matches.len() - 1
            );
        }
    }
    Ok(())
}

fn output_items(items: &[&ProductCatalogItem], format: OutputFormat, quiet: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&items).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer
                .write_record(["part_id", "category", "finish", "width", "height", "depth", "description"])
                .into_diagnostic()?;
            for item in items {
                writer
                    .write_record([
                        item.part_id.clone(),
                        item.category.to_string(),
                        item.finish.to_string(),
                        format_dimension(item.dimensions.width.as_ref()),
                        format_dimension(item.dimensions.height.as_ref()),
                        format_dimension(item.dimensions.depth.as_ref()),
                        item.description.clone(),
                    ])
                    .into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        OutputFormat::Id => {
            for item in items {
                println!("{}", item.part_id);
            }
        }
        OutputFormat::Md => {
            println!("| Part ID | Category | Finish | Width | Height | Depth | Description |");
            println!("|---|---|---|---|---|---|---|");
            for item in items {
                println!(
                    "| {} | {} | {} | {} | {} | {} | {} |",
                    item.part_id,
                    item.category,
                    item.finish,
                    format_dimension(item.dimensions.width.as_ref()),
                    format_dimension(item.dimensions.height.as_ref()),
                    format_dimension(item.dimensions.depth.as_ref()),
                    item.description
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<24} {:<10} {:<6} {:<14} {:<14} {:<8} {}",
                style("PART ID").bold(),
                style("CATEGORY").bold(),
                style("FINISH").bold(),
                style("WIDTH").bold(),
                style("HEIGHT").bold(),
                style("DEPTH").bold(),
                style("DESCRIPTION").bold()
            );
            println!("{}", "-".repeat(110));
            for item in items {
                println!(
                    "{:<24} {:<10} {:<6} {:<14} {:<14} {:<8} {}",
                    style(truncate_str(&item.part_id, 24)).cyan(),
                    item.category,
                    item.finish,
                    format_dimension(item.dimensions.width.as_ref()),
                    format_dimension(item.dimensions.height.as_ref()),
                    format_dimension(item.dimensions.depth.as_ref()),
                    truncate_str(&item.description, 40)
                );
            }
            if !quiet {
                println!();
                println!("{} catalog item(s) found.", style(items.len()).cyan());
            }
        }
    }
    Ok(())
}

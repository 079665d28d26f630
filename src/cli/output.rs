//! Rendering of BOMs for the terminal, files and the clipboard

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;
use crate::entities::bom::Bom;

/// Render a BOM in the given format.
///
/// `color` enables terminal styling for the tsv layout only.
pub fn render_bom(bom: &Bom, format: OutputFormat, color: bool) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            out.push_str(&serde_json::to_string_pretty(bom).into_diagnostic()?);
            out.push('\n');
        }
        OutputFormat::Yaml => {
            out.push_str(&serde_yml::to_string(bom).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(["part_id", "quantity", "description"])
                .into_diagnostic()?;
            for item in bom {
                let quantity = item.quantity.to_string();
                writer
                    .write_record([
                        item.part_id.as_str(),
                        quantity.as_str(),
                        item.description.as_deref().unwrap_or(""),
                    ])
                    .into_diagnostic()?;
            }
            let bytes = writer.into_inner().into_diagnostic()?;
            out.push_str(&String::from_utf8(bytes).into_diagnostic()?);
        }
        OutputFormat::Md => {
            let mut table = Builder::default();
            table.push_record(["Part ID", "Qty", "Description"]);
            for item in bom {
                table.push_record([
                    item.part_id.clone(),
                    item.quantity.to_string(),
                    item.description.clone().unwrap_or_default(),
                ]);
            }
            out.push_str(&table.build().with(Style::markdown()).to_string());
            out.push_str(&format!(
                "\n\n**Total parts:** {} ({} line(s))\n",
                bom.total_quantity(),
                bom.len()
            ));
        }
        OutputFormat::Id => {
            for item in bom {
                out.push_str(&item.part_id);
                out.push('\n');
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if bom.is_empty() {
                out.push_str("No parts resolved for these parameters.\n");
                return Ok(out);
            }
            let header = format!("{:<24} {:>5}  {}", "PART ID", "QTY", "DESCRIPTION");
            if color {
                out.push_str(&style(header).bold().to_string());
            } else {
                out.push_str(&header);
            }
            out.push('\n');
            out.push_str(&"-".repeat(80));
            out.push('\n');
            for item in bom {
                out.push_str(&format!(
                    "{:<24} {:>5}  {}\n",
                    truncate_str(&item.part_id, 24),
                    item.quantity,
                    truncate_str(item.description.as_deref().unwrap_or(""), 48)
                ));
            }
            out.push('\n');
            let total = if color {
                style(bom.total_quantity()).cyan().to_string()
            } else {
                bom.total_quantity().to_string()
            };
            out.push_str(&format!("{} line(s), {} part(s) total\n", bom.len(), total));
        }
    }
    Ok(out)
}

/// Write rendered output to a file, or stdout when no path is given
pub fn write_output(content: &str, output_path: Option<&Path>, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            if !quiet {
                eprintln!("{} BOM written to {}", style("✓").green(), path.display());
            }
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{resolve, Catalog};
    use crate::entities::catalog_item::{Finish, PartCategory, ProductCatalogItem};
    use crate::entities::params::ModuleParams;

    fn sample_bom() -> Bom {
        let catalog = Catalog::new(vec![
            ProductCatalogItem::new("PNL-TOP-M", "Top panel, metal", Finish::Metal, PartCategory::Panel),
            ProductCatalogItem::new(
                "HW-SCREW-M",
                "Screw M4x12, zinc plated",
                Finish::Metal,
                PartCategory::Hardware,
            ),
        ]);
        resolve(&catalog, &ModuleParams::default())
    }

    #[test]
    fn test_render_json_is_array() {
        let out = render_bom(&sample_bom(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["partId"], "PNL-TOP-M");
        assert_eq!(arr[1]["quantity"], 24);
    }

    #[test]
    fn test_render_csv_quotes_commas() {
        let out = render_bom(&sample_bom(), OutputFormat::Csv, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "part_id,quantity,description");
        assert_eq!(lines[1], "PNL-TOP-M,1,\"Top panel, metal\"");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_render_ids() {
        let out = render_bom(&sample_bom(), OutputFormat::Id, false).unwrap();
        assert_eq!(out, "PNL-TOP-M\nHW-SCREW-M\n");
    }

    #[test]
    fn test_render_tsv_total() {
        let out = render_bom(&sample_bom(), OutputFormat::Tsv, false).unwrap();
        assert!(out.starts_with("PART ID"));
        assert!(out.contains("2 line(s), 25 part(s) total"));
    }

    #[test]
    fn test_render_md_table() {
        let out = render_bom(&sample_bom(), OutputFormat::Md, false).unwrap();
        assert!(out.contains("| Part ID"));
        assert!(out.contains("**Total parts:** 25"));
    }

    #[test]
    fn test_render_empty_tsv() {
        let out = render_bom(&Bom::default(), OutputFormat::Tsv, false).unwrap();
        assert!(out.contains("No parts resolved"));
    }
}

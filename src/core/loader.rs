//! Catalog loading
//!
//! Catalogs are YAML or JSON documents holding a sequence of catalog items.
//! A default catalog ships inside the binary; a file on disk replaces it.

use miette::Diagnostic;
use rust_embed::Embed;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::catalog::Catalog;
use crate::entities::catalog_item::ProductCatalogItem;
use crate::yaml::diagnostics::YamlSyntaxError;

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedData;

/// Name of the built-in catalog inside the embedded data folder
pub const DEFAULT_CATALOG: &str = "catalog.yaml";

/// Failure to produce a catalog from its source document
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("Could not read catalog {path}")]
    #[diagnostic(code(ebom::catalog::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlSyntaxError),

    #[error("Invalid JSON in catalog {path}: {message}")]
    #[diagnostic(code(ebom::catalog::json))]
    Json { path: PathBuf, message: String },

    #[error("Built-in catalog '{0}' is missing from the binary")]
    #[diagnostic(code(ebom::catalog::embedded))]
    MissingEmbedded(String),
}

/// Document format of a catalog source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// Pick a format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Yaml,
        }
    }
}

/// Parse catalog items from a document's text
pub fn parse_items(
    content: &str,
    format: CatalogFormat,
    source_name: &str,
) -> Result<Vec<ProductCatalogItem>, CatalogError> {
    match format {
        CatalogFormat::Yaml => serde_yml::from_str(content).map_err(|e| {
            CatalogError::Yaml(YamlSyntaxError::from_serde_error(&e, content, source_name))
        }),
        CatalogFormat::Json => serde_json::from_str(content).map_err(|e| CatalogError::Json {
            path: PathBuf::from(source_name),
            message: e.to_string(),
        }),
    }
}

/// Read the raw text of a catalog file
pub fn read_catalog_source(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a catalog from a file on disk
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = read_catalog_source(path)?;
    let items = parse_items(
        &content,
        CatalogFormat::from_path(path),
        &path.display().to_string(),
    )?;
    debug!(path = %path.display(), items = items.len(), "loaded catalog");
    Ok(Catalog::new(items))
}

/// Text of the catalog built into the binary
pub fn default_catalog_source() -> Result<String, CatalogError> {
    let file = EmbeddedData::get(DEFAULT_CATALOG)
        .ok_or_else(|| CatalogError::MissingEmbedded(DEFAULT_CATALOG.to_string()))?;
    Ok(String::from_utf8_lossy(&file.data).into_owned())
}

/// Load the catalog built into the binary
pub fn load_default_catalog() -> Result<Catalog, CatalogError> {
    let content = default_catalog_source()?;
    let items = parse_items(&content, CatalogFormat::Yaml, DEFAULT_CATALOG)?;
    debug!(items = items.len(), "loaded built-in catalog");
    Ok(Catalog::new(items))
}

/// Load from `path` when given, otherwise the built-in catalog
pub fn load_catalog_or_default(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => load_catalog(path),
        None => load_default_catalog(),
    }
}

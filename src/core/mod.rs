//! Core module - catalog store, resolver and supporting services

pub mod catalog;
pub mod config;
pub mod loader;
pub mod resolver;
pub mod session;

pub use catalog::{Catalog, PartQuery};
pub use config::Config;
pub use loader::{load_catalog, load_catalog_or_default, load_default_catalog, CatalogError};
pub use resolver::{resolve, resolve_detailed, Resolution, Role, RoleResolution, ROLES};
pub use session::Configurator;

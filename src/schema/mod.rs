//! Catalog schema and validation

pub mod validator;

pub use validator::{check_items, CatalogValidator, ValidationIssue, ValidationResult};

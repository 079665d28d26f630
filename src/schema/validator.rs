//! Catalog validation with detailed issue reporting
//!
//! Runs in two passes. The document is first checked against the embedded
//! JSON Schema; if it is structurally sound, the parsed items are checked
//! for authoring defects the resolver never looks for: duplicate part
//! numbers, inverted ranges, non-positive dimensions, entries no role can
//! reach, entries shadowed by an earlier one, and gaps between size bands.

use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use rust_embed::Embed;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::core::loader::{parse_items, CatalogError, CatalogFormat};
use crate::core::resolver::{Axis, ROLES};
use crate::entities::catalog_item::{
    constraints_overlap, DimensionConstraint, Finish, ProductCatalogItem,
};
use crate::entities::params::MODULE_DEPTH;
use crate::yaml::diagnostics::YamlSyntaxError;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

pub const CATALOG_SCHEMA: &str = "catalog.schema.json";

/// A validation issue (error or warning)
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// JSON pointer into the catalog document
    pub path: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Result of validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Valid, and in strict mode also free of warnings
    pub fn passes(&self, strict: bool) -> bool {
        self.is_valid() && (!strict || self.warnings.is_empty())
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }
}

/// Catalog validator with the compiled catalog schema
pub struct CatalogValidator {
    schema: Option<JsonValidator>,
}

impl Default for CatalogValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogValidator {
    /// Compile the embedded catalog schema
    ///
    /// A schema that fails to load disables the structural pass only.
    pub fn new() -> Self {
        let schema = EmbeddedSchemas::get(CATALOG_SCHEMA)
            .and_then(|file| serde_json::from_slice::<JsonValue>(&file.data).ok())
            .and_then(|json| validator_for(&json).ok());
        if schema.is_none() {
            tracing::warn!("catalog schema unavailable, skipping structural checks");
        }
        Self { schema }
    }

    /// Validate catalog document text
    ///
    /// Returns `Err` only when the text is not well-formed YAML/JSON at all.
    pub fn validate_source(
        &self,
        content: &str,
        format: CatalogFormat,
        source_name: &str,
    ) -> Result<ValidationResult, CatalogError> {
        let document = to_json_value(content, format, source_name)?;

        let mut result = ValidationResult::success();
        if let Some(schema) = &self.schema {
            result.errors.extend(schema.iter_errors(&document).map(|e| schema_issue(&e)));
        }
        if !result.is_valid() {
            return Ok(result);
        }

        let items = parse_items(content, format, source_name)?;
        let semantic = check_items(&items);
        result.errors.extend(semantic.errors);
        result.warnings.extend(semantic.warnings);
        Ok(result)
    }
}

fn to_json_value(
    content: &str,
    format: CatalogFormat,
    source_name: &str,
) -> Result<JsonValue, CatalogError> {
    match format {
        CatalogFormat::Json => serde_json::from_str(content).map_err(|e| CatalogError::Json {
            path: source_name.into(),
            message: e.to_string(),
        }),
        CatalogFormat::Yaml => {
            let yaml: serde_yml::Value = serde_yml::from_str(content).map_err(|e| {
                CatalogError::Yaml(YamlSyntaxError::from_serde_error(&e, content, source_name))
            })?;
            serde_json::to_value(&yaml).map_err(|e| CatalogError::Json {
                path: source_name.into(),
                message: e.to_string(),
            })
        }
    }
}

/// Convert a JSON Schema validation error to an issue
fn schema_issue(error: &JsonSchemaError) -> ValidationIssue {
    use jsonschema::error::ValidationErrorKind as Kind;

    let path = error.instance_path.to_string();
    let at = if path.is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", path)
    };

    match &error.kind {
        Kind::Required { property } => {
            let prop = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            ValidationIssue::new(&path, format!("Missing required field: {} at {}", prop, at))
                .with_suggestion(format!("Add the '{}' field to the item", prop))
        }
        Kind::Enum { options } => {
            let opts = format_enum_options(options);
            ValidationIssue::new(&path, format!("Invalid value at {}: must be one of: {}", at, opts))
                .with_suggestion(format!("Valid values: {}", opts))
        }
        Kind::Type { kind } => {
            ValidationIssue::new(&path, format!("Wrong type at {}: expected {:?}", at, kind))
        }
        Kind::MinLength { .. } => ValidationIssue::new(&path, format!("Empty value at {}", at)),
        Kind::AdditionalProperties { unexpected } => ValidationIssue::new(
            &path,
            format!("Unknown field(s) at {}: {}", at, unexpected.join(", ")),
        )
        .with_suggestion("Remove unknown fields or check spelling"),
        _ => ValidationIssue::new(&path, format!("Validation error at {}: {}", at, error)),
    }
}

fn format_enum_options(options: &JsonValue) -> String {
    if let Some(arr) = options.as_array() {
        arr.iter()
            .map(|v| v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        options.to_string()
    }
}

/// Check parsed catalog items for authoring defects
pub fn check_items(items: &[ProductCatalogItem]) -> ValidationResult {
    let mut result = ValidationResult::success();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (i, item) in items.iter().enumerate() {
        if item.part_id.trim().is_empty() {
            result
                .errors
                .push(ValidationIssue::new(format!("/{}/partId", i), "Empty partId"));
        }

        if let Some(&prev) = first_seen.get(item.part_id.as_str()) {
            result.errors.push(
                ValidationIssue::new(
                    format!("/{}/partId", i),
                    format!("Duplicate partId '{}' (first declared at /{})", item.part_id, prev),
                )
                .with_suggestion("Each catalog item needs a unique part number"),
            );
        } else {
            first_seen.insert(&item.part_id, i);
        }

        let axes = [
            ("width", item.dimensions.width.as_ref()),
            ("height", item.dimensions.height.as_ref()),
            ("depth", item.dimensions.depth.as_ref()),
        ];
        for (axis, constraint) in axes {
            if let Some(c) = constraint {
                check_constraint(&mut result, &format!("/{}/dimensions/{}", i, axis), c);
            }
        }

        if let Some(depth) = &item.dimensions.depth {
            if !depth.matches(MODULE_DEPTH) {
                result.warnings.push(ValidationIssue::new(
                    format!("/{}/dimensions/depth", i),
                    format!(
                        "'{}' depth {} excludes the module depth of {} mm",
                        item.part_id, depth, MODULE_DEPTH
                    ),
                ));
            }
        }

        let reachable = ROLES
            .iter()
            .any(|role| role.category == item.category && item.part_id.contains(role.part_id_pattern));
        if !reachable {
            let patterns: Vec<&str> = ROLES
                .iter()
                .filter(|role| role.category == item.category)
                .map(|role| role.part_id_pattern)
                .collect();
            result.warnings.push(
                ValidationIssue::new(
                    format!("/{}/partId", i),
                    format!("'{}' is not reachable by any {} role", item.part_id, item.category),
                )
                .with_suggestion(format!("Include one of: {}", patterns.join(", "))),
            );
        }
    }

    check_shadowing(items, &mut result);
    check_coverage_gaps(items, &mut result);
    result
}

fn check_constraint(result: &mut ValidationResult, path: &str, constraint: &DimensionConstraint) {
    match *constraint {
        DimensionConstraint::Exact(v) => {
            if !v.is_finite() || v <= 0.0 {
                result.errors.push(ValidationIssue::new(
                    path,
                    format!("Dimension must be a positive number, got {}", v),
                ));
            }
        }
        DimensionConstraint::Range { min, max } => {
            if !min.is_finite() || !max.is_finite() || max <= 0.0 || min < 0.0 {
                result.errors.push(ValidationIssue::new(
                    path,
                    format!("Range bounds must be non-negative with a positive max, got {}..={}", min, max),
                ));
            }
            if min > max {
                result.errors.push(
                    ValidationIssue::new(path, format!("Range min {} is greater than max {}", min, max))
                        .with_suggestion("Swap min and max"),
                );
            }
        }
    }
}

/// Warn about items an earlier item wins over for some role query
fn check_shadowing(items: &[ProductCatalogItem], result: &mut ValidationResult) {
    for (j, later) in items.iter().enumerate() {
        for (i, earlier) in items.iter().enumerate().take(j) {
            if earlier.category != later.category || earlier.finish != later.finish {
                continue;
            }
            if earlier.part_id == later.part_id {
                continue;
            }
            for role in ROLES.iter().filter(|r| r.category == later.category) {
                if !earlier.part_id.contains(role.part_id_pattern)
                    || !later.part_id.contains(role.part_id_pattern)
                {
                    continue;
                }
                let overlap = role.axes().into_iter().all(|axis| {
                    constraints_overlap(axis_constraint(earlier, axis), axis_constraint(later, axis))
                });
                if overlap {
                    result.warnings.push(
                        ValidationIssue::new(
                            format!("/{}", j),
                            format!(
                                "'{}' is shadowed by '{}' for {} where their dimensions overlap",
                                later.part_id, earlier.part_id, role.name
                            ),
                        )
                        .with_suggestion(format!(
                            "The first match wins; narrow the ranges or move '{}' above /{}",
                            later.part_id, i
                        )),
                    );
                }
            }
        }
    }
}

/// Warn where a role's size bands leave values between them unmatched
fn check_coverage_gaps(items: &[ProductCatalogItem], result: &mut ValidationResult) {
    for role in ROLES.iter() {
        for finish in [Finish::Metal, Finish::Wood] {
            let candidates: Vec<(usize, &ProductCatalogItem)> = items
                .iter()
                .enumerate()
                .filter(|(_, item)| {
                    item.category == role.category
                        && item.finish == finish
                        && item.part_id.contains(role.part_id_pattern)
                })
                .collect();

            for axis in role.axes() {
                // An entry without a constraint on this axis covers every value
                if candidates.iter().any(|(_, item)| axis_constraint(item, axis).is_none()) {
                    continue;
                }
                let mut bands: Vec<(f64, f64, usize)> = candidates
                    .iter()
                    .filter_map(|&(i, item)| match axis_constraint(item, axis) {
                        Some(&DimensionConstraint::Range { min, max }) if min <= max => {
                            Some((min, max, i))
                        }
                        _ => None,
                    })
                    .collect();
                if bands.len() < 2 {
                    continue;
                }
                bands.sort_by(|a, b| a.0.total_cmp(&b.0));

                let mut reach = bands[0].1;
                for &(min, max, i) in &bands[1..] {
                    if min > reach {
                        result.warnings.push(
                            ValidationIssue::new(
                                format!("/{}/dimensions/{}", i, axis),
                                format!(
                                    "{} ({}) has no part for {} between {} and {} mm",
                                    role.name, finish, axis, reach, min
                                ),
                            )
                            .with_suggestion(format!(
                                "Extend the lower band to max: {} so the bands share a boundary",
                                min
                            )),
                        );
                    }
                    reach = reach.max(max);
                }
            }
        }
    }
}

fn axis_constraint(item: &ProductCatalogItem, axis: Axis) -> Option<&DimensionConstraint> {
    match axis {
        Axis::Width => item.dimensions.width.as_ref(),
        Axis::Height => item.dimensions.height.as_ref(),
    }
}

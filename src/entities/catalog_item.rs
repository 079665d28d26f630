//! Catalog item entity type - Purchasable or manufacturable enclosure parts

use serde::{Deserialize, Serialize};

/// Slack applied when comparing a requested dimension against an exact
/// catalog dimension (millimeters). Absorbs rounding noise only.
pub const DIMENSION_TOLERANCE_MM: f64 = 1.0;

/// Surface finish of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finish {
    Metal,
    Wood,
}

impl Default for Finish {
    fn default() -> Self {
        Finish::Metal
    }
}

impl std::fmt::Display for Finish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finish::Metal => write!(f, "metal"),
            Finish::Wood => write!(f, "wood"),
        }
    }
}

impl std::str::FromStr for Finish {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metal" => Ok(Finish::Metal),
            "wood" => Ok(Finish::Wood),
            _ => Err(format!("Invalid finish: {}. Use 'metal' or 'wood'", s)),
        }
    }
}

/// Part category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartCategory {
    Panel,
    Edge,
    Connector,
    Hardware,
}

impl std::fmt::Display for PartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartCategory::Panel => write!(f, "panel"),
            PartCategory::Edge => write!(f, "edge"),
            PartCategory::Connector => write!(f, "connector"),
            PartCategory::Hardware => write!(f, "hardware"),
        }
    }
}

impl std::str::FromStr for PartCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "panel" => Ok(PartCategory::Panel),
            "edge" => Ok(PartCategory::Edge),
            "connector" => Ok(PartCategory::Connector),
            "hardware" => Ok(PartCategory::Hardware),
            _ => Err(format!(
                "Invalid category: {}. Use panel, edge, connector, or hardware",
                s
            )),
        }
    }
}

/// Constraint a catalog item places on one axis.
///
/// On disk an exact value is a bare number and a range is `{min, max}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionConstraint {
    /// Must match within [`DIMENSION_TOLERANCE_MM`]
    Exact(f64),
    /// Inclusive on both ends
    Range { min: f64, max: f64 },
}

impl DimensionConstraint {
    /// Check whether a requested value satisfies this constraint
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            DimensionConstraint::Exact(target) => (target - value).abs() < DIMENSION_TOLERANCE_MM,
            DimensionConstraint::Range { min, max } => min <= value && value <= max,
        }
    }

    /// Interval of values this constraint can match
    ///
    /// Exact constraints use the tolerance band, whose ends are open.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            DimensionConstraint::Exact(target) => (
                target - DIMENSION_TOLERANCE_MM,
                target + DIMENSION_TOLERANCE_MM,
            ),
            DimensionConstraint::Range { min, max } => (min, max),
        }
    }

    /// Whether the constraints share more than a boundary point
    ///
    /// Ranges that only touch (`max` of one equal to `min` of the other) are
    /// adjacent bands, not overlapping ones. A single-value range still
    /// overlaps any range containing it.
    pub fn overlaps(&self, other: &DimensionConstraint) -> bool {
        let (a_lo, a_hi) = self.bounds();
        let (b_lo, b_hi) = other.bounds();
        let lo = a_lo.max(b_lo);
        let hi = a_hi.min(b_hi);
        lo < hi || (lo == hi && (a_lo == a_hi || b_lo == b_hi))
    }
}

impl std::fmt::Display for DimensionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimensionConstraint::Exact(v) => write!(f, "{}", v),
            DimensionConstraint::Range { min, max } => write!(f, "{}..={}", min, max),
        }
    }
}

/// Check a requested value against an optional constraint.
///
/// An absent constraint leaves the axis unconstrained and always matches.
pub fn matches_dimension(constraint: Option<&DimensionConstraint>, value: f64) -> bool {
    constraint.map_or(true, |c| c.matches(value))
}

/// Whether two optional constraints can both be satisfied by some value
pub fn constraints_overlap(a: Option<&DimensionConstraint>, b: Option<&DimensionConstraint>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => true,
    }
}

/// Per-axis constraints of a catalog item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<DimensionConstraint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<DimensionConstraint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<DimensionConstraint>,
}

/// A catalog entry - one orderable part and the dimensions it fits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCatalogItem {
    /// Unique part number
    pub part_id: String,

    /// Human-readable description
    pub description: String,

    /// Axis constraints
    #[serde(default)]
    pub dimensions: Dimensions,

    pub finish: Finish,

    pub category: PartCategory,
}

impl ProductCatalogItem {
    /// Create a catalog item with no dimension constraints
    pub fn new(
        part_id: impl Into<String>,
        description: impl Into<String>,
        finish: Finish,
        category: PartCategory,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            description: description.into(),
            dimensions: Dimensions::default(),
            finish,
            category,
        }
    }

    pub fn with_width(mut self, constraint: DimensionConstraint) -> Self {
        self.dimensions.width = Some(constraint);
        self
    }

    pub fn with_height(mut self, constraint: DimensionConstraint) -> Self {
        self.dimensions.height = Some(constraint);
        self
    }

    pub fn with_depth(mut self, constraint: DimensionConstraint) -> Self {
        self.dimensions.depth = Some(constraint);
        self
    }
}

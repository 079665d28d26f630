//! BOM resolver - maps module parameters to catalog parts and quantities
//!
//! Each structural role of the enclosure issues one catalog query. Matched
//! parts are accumulated by part number in first-seen order, so two roles
//! that resolve to the same part produce a single line with the summed
//! quantity. A role with no match contributes nothing.

use std::collections::HashMap;
use tracing::debug;

use crate::core::catalog::{Catalog, PartQuery};
use crate::entities::bom::{Bom, BomItem};
use crate::entities::catalog_item::PartCategory;
use crate::entities::params::ModuleParams;

/// Which module dimension feeds a role's query axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// One structural position of the enclosure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub name: &'static str,
    pub category: PartCategory,
    pub part_id_pattern: &'static str,
    pub query_width: bool,
    pub query_height: bool,
    pub quantity: u32,
}

impl Role {
    /// Build the catalog query this role issues for the given parameters
    pub fn query(&self, params: &ModuleParams) -> PartQuery<'static> {
        PartQuery {
            category: self.category,
            finish: params.finish,
            part_id_pattern: Some(self.part_id_pattern),
            width: self.query_width.then_some(params.width),
            height: self.query_height.then_some(params.height),
        }
    }

    /// Axes this role constrains, in query order
    pub fn axes(&self) -> Vec<Axis> {
        let mut axes = Vec::with_capacity(2);
        if self.query_width {
            axes.push(Axis::Width);
        }
        if self.query_height {
            axes.push(Axis::Height);
        }
        axes
    }
}

/// Structural roles, evaluated in this order
pub static ROLES: [Role; 8] = [
    Role {
        name: "Top panel",
        category: PartCategory::Panel,
        part_id_pattern: "TOP",
        query_width: true,
        query_height: true,
        quantity: 1,
    },
    Role {
        name: "Bottom panel",
        category: PartCategory::Panel,
        part_id_pattern: "BOTTOM",
        query_width: true,
        query_height: true,
        quantity: 1,
    },
    Role {
        name: "Front+Back panels",
        category: PartCategory::Panel,
        part_id_pattern: "SIDE-HEIGHT",
        query_width: true,
        query_height: true,
        quantity: 2,
    },
    // Left/right panels span height x depth; depth is fixed
    Role {
        name: "Left+Right panels",
        category: PartCategory::Panel,
        part_id_pattern: "SIDE-WIDTH",
        query_width: false,
        query_height: true,
        quantity: 2,
    },
    // 4 on top, 4 on bottom
    Role {
        name: "Horizontal edges",
        category: PartCategory::Edge,
        part_id_pattern: "HORIZONTAL",
        query_width: true,
        query_height: false,
        quantity: 8,
    },
    Role {
        name: "Vertical edges",
        category: PartCategory::Edge,
        part_id_pattern: "VERTICAL",
        query_width: false,
        query_height: true,
        quantity: 4,
    },
    Role {
        name: "Corner connectors",
        category: PartCategory::Connector,
        part_id_pattern: "CORNER",
        query_width: false,
        query_height: false,
        quantity: 4,
    },
    // 4 per panel, 6 panels
    Role {
        name: "Fasteners",
        category: PartCategory::Hardware,
        part_id_pattern: "SCREW",
        query_width: false,
        query_height: false,
        quantity: 24,
    },
];

/// Outcome of one role's lookup
#[derive(Debug, Clone, PartialEq)]
pub struct RoleResolution {
    pub role: &'static Role,
    /// Matched part, or `None` if the catalog has nothing for this role
    pub part_id: Option<String>,
}

impl RoleResolution {
    pub fn is_resolved(&self) -> bool {
        self.part_id.is_some()
    }
}

/// A BOM together with the per-role trace that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub bom: Bom,
    pub roles: Vec<RoleResolution>,
}

impl Resolution {
    /// Roles whose query matched nothing
    pub fn unresolved(&self) -> impl Iterator<Item = &RoleResolution> {
        self.roles.iter().filter(|r| !r.is_resolved())
    }
}

/// Order-preserving accumulator keyed by part number
#[derive(Debug, Default)]
struct BomAccumulator {
    items: Vec<BomItem>,
    index: HashMap<String, usize>,
}

impl BomAccumulator {
    fn add(&mut self, part_id: &str, quantity: u32, description: &str) {
        match self.index.get(part_id) {
            Some(&pos) => self.items[pos].quantity += quantity,
            None => {
                self.index.insert(part_id.to_string(), self.items.len());
                self.items.push(BomItem {
                    part_id: part_id.to_string(),
                    quantity,
                    description: Some(description.to_string()),
                });
            }
        }
    }

    fn finish(self) -> Bom {
        Bom::from_items(self.items)
    }
}

/// Resolve module parameters to a BOM.
///
/// Assumes `params` has already been validated.
pub fn resolve(catalog: &Catalog, params: &ModuleParams) -> Bom {
    resolve_detailed(catalog, params).bom
}

/// Resolve module parameters, keeping the per-role outcome
pub fn resolve_detailed(catalog: &Catalog, params: &ModuleParams) -> Resolution {
    let mut acc = BomAccumulator::default();
    let mut roles = Vec::with_capacity(ROLES.len());

    for role in ROLES.iter() {
        let part = catalog.find_part(&role.query(params));
        match part {
            Some(item) => {
                debug!(role = role.name, part_id = %item.part_id, quantity = role.quantity, "role resolved");
                acc.add(&item.part_id, role.quantity, &item.description);
            }
            None => {
                debug!(role = role.name, finish = %params.finish, "no catalog match, skipping role");
            }
        }
        roles.push(RoleResolution {
            role,
            part_id: part.map(|item| item.part_id.clone()),
        });
    }

    Resolution {
        bom: acc.finish(),
        roles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::catalog_item::{DimensionConstraint, Finish, ProductCatalogItem};
    use std::collections::HashSet;

    fn item(id: &str, category: PartCategory, finish: Finish) -> ProductCatalogItem {
        ProductCatalogItem::new(id, format!("{} part", id), finish, category)
    }

    /// One entry per role for both finishes, except no wood connector
    fn test_catalog() -> Catalog {
        let mut items = Vec::new();
        for (finish, suffix) in [(Finish::Metal, "M"), (Finish::Wood, "W")] {
            let range = DimensionConstraint::Range {
                min: 200.0,
                max: 800.0,
            };
            items.push(
                item(&format!("PNL-TOP-{}", suffix), PartCategory::Panel, finish)
                    .with_width(range)
                    .with_height(range),
            );
            items.push(
                item(&format!("PNL-BOTTOM-{}", suffix), PartCategory::Panel, finish)
                    .with_width(range)
                    .with_height(range),
            );
            items.push(
                item(&format!("PNL-SIDE-HEIGHT-{}", suffix), PartCategory::Panel, finish)
                    .with_width(range)
                    .with_height(range),
            );
            items.push(
                item(&format!("PNL-SIDE-WIDTH-{}", suffix), PartCategory::Panel, finish)
                    .with_height(range)
                    .with_depth(DimensionConstraint::Exact(100.0)),
            );
            items.push(
                item(&format!("EDG-HORIZONTAL-{}", suffix), PartCategory::Edge, finish)
                    .with_width(range),
            );
            items.push(
                item(&format!("EDG-VERTICAL-{}", suffix), PartCategory::Edge, finish)
                    .with_height(range),
            );
            if finish == Finish::Metal {
                items.push(item("CON-CORNER-M", PartCategory::Connector, finish));
            }
            items.push(item(
                &format!("HW-SCREW-{}", suffix),
                PartCategory::Hardware,
                finish,
            ));
        }
        Catalog::new(items)
    }

    #[test]
    fn test_end_to_end_default_params() {
        let bom = resolve(&test_catalog(), &ModuleParams::default());

        let quantities: Vec<u32> = bom.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![1, 1, 2, 2, 8, 4, 4, 24]);
        assert_eq!(bom.total_quantity(), 46);

        let ids: Vec<&str> = bom.iter().map(|i| i.part_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "PNL-TOP-M",
                "PNL-BOTTOM-M",
                "PNL-SIDE-HEIGHT-M",
                "PNL-SIDE-WIDTH-M",
                "EDG-HORIZONTAL-M",
                "EDG-VERTICAL-M",
                "CON-CORNER-M",
                "HW-SCREW-M",
            ]
        );
        assert_eq!(
            bom.get("PNL-TOP-M").unwrap().description.as_deref(),
            Some("PNL-TOP-M part")
        );
    }

    #[test]
    fn test_determinism() {
        let catalog = test_catalog();
        let params = ModuleParams::new(437.25, 612.5, Finish::Wood).unwrap();
        assert_eq!(resolve(&catalog, &params), resolve(&catalog, &params));
    }

    #[test]
    fn test_missing_wood_connector_is_skipped() {
        let params = ModuleParams::default().apply(&crate::entities::ParamsPatch::finish(Finish::Wood));
        let resolution = resolve_detailed(&test_catalog(), &params);

        assert_eq!(resolution.bom.len(), 7);
        assert!(resolution.bom.iter().all(|i| !i.part_id.contains("CORNER")));
        assert_eq!(resolution.bom.total_quantity(), 46 - 4);

        let unresolved: Vec<&str> = resolution.unresolved().map(|r| r.role.name).collect();
        assert_eq!(unresolved, vec!["Corner connectors"]);
    }

    #[test]
    fn test_out_of_range_drops_dimensioned_roles() {
        let params = ModuleParams::new(1000.0, 500.0, Finish::Metal).unwrap();
        let bom = resolve(&test_catalog(), &params);

        // Width-dependent roles fall out; height-only and undimensioned remain
        let ids: Vec<&str> = bom.iter().map(|i| i.part_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["PNL-SIDE-WIDTH-M", "EDG-VERTICAL-M", "CON-CORNER-M", "HW-SCREW-M"]
        );
        assert_eq!(bom.total_quantity(), 2 + 4 + 4 + 24);
    }

    #[test]
    fn test_shared_part_is_merged() {
        let shared = "HW-CORNER-SCREW";
        let catalog = Catalog::new(vec![
            item("PNL-TOP", PartCategory::Panel, Finish::Metal),
            item(shared, PartCategory::Connector, Finish::Metal),
            item(shared, PartCategory::Hardware, Finish::Metal),
        ]);
        let bom = resolve(&catalog, &ModuleParams::default());

        let ids: Vec<&str> = bom.iter().map(|i| i.part_id.as_str()).collect();
        assert_eq!(ids, vec!["PNL-TOP", shared]);
        assert_eq!(bom.get(shared).unwrap().quantity, 28);
    }

    #[test]
    fn test_no_duplicate_part_ids() {
        // Same generic panel satisfies every panel role
        let catalog = Catalog::new(vec![item(
            "PNL-TOP-BOTTOM-SIDE-HEIGHT-SIDE-WIDTH",
            PartCategory::Panel,
            Finish::Metal,
        )]);
        let bom = resolve(&catalog, &ModuleParams::default());

        let unique: HashSet<&str> = bom.iter().map(|i| i.part_id.as_str()).collect();
        assert_eq!(unique.len(), bom.len());
        assert_eq!(bom.len(), 1);
        assert_eq!(bom.total_quantity(), 1 + 1 + 2 + 2);
    }

    #[test]
    fn test_quantity_conservation() {
        let catalog = test_catalog();
        for (w, h, finish) in [
            (500.0, 500.0, Finish::Metal),
            (150.0, 500.0, Finish::Metal),
            (500.0, 900.0, Finish::Wood),
            (200.0, 800.0, Finish::Wood),
        ] {
            let params = ModuleParams::new(w, h, finish).unwrap();
            let resolution = resolve_detailed(&catalog, &params);
            let expected: u32 = resolution
                .roles
                .iter()
                .filter(|r| r.is_resolved())
                .map(|r| r.role.quantity)
                .sum();
            assert_eq!(resolution.bom.total_quantity(), expected);
        }
    }

    #[test]
    fn test_empty_catalog_yields_empty_bom() {
        let resolution = resolve_detailed(&Catalog::default(), &ModuleParams::default());
        assert!(resolution.bom.is_empty());
        assert_eq!(resolution.unresolved().count(), ROLES.len());
    }

    #[test]
    fn test_role_queries() {
        let params = ModuleParams::new(320.0, 640.0, Finish::Wood).unwrap();

        let side = ROLES[3].query(&params);
        assert_eq!(side.part_id_pattern, Some("SIDE-WIDTH"));
        assert_eq!(side.width, None);
        assert_eq!(side.height, Some(640.0));
        assert_eq!(side.finish, Finish::Wood);

        let horizontal = ROLES[4].query(&params);
        assert_eq!(horizontal.width, Some(320.0));
        assert_eq!(horizontal.height, None);
        assert_eq!(ROLES[4].axes(), vec![Axis::Width]);

        let total: u32 = ROLES.iter().map(|r| r.quantity).sum();
        assert_eq!(total, 46);
    }
}

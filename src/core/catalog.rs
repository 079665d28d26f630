//! Catalog store - the immutable parts table and its matching queries

use tracing::trace;

use crate::entities::catalog_item::{matches_dimension, Finish, PartCategory, ProductCatalogItem};

/// Parameters of a single catalog lookup
#[derive(Debug, Clone, PartialEq)]
pub struct PartQuery<'a> {
    pub category: PartCategory,
    pub finish: Finish,
    /// Substring the part number must contain
    pub part_id_pattern: Option<&'a str>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl<'a> PartQuery<'a> {
    pub fn new(category: PartCategory, finish: Finish) -> Self {
        Self {
            category,
            finish,
            part_id_pattern: None,
            width: None,
            height: None,
        }
    }

    pub fn pattern(mut self, pattern: &'a str) -> Self {
        self.part_id_pattern = Some(pattern);
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Evaluate the predicate against one item.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// category, finish, part number pattern, width, height.
    pub fn matches(&self, item: &ProductCatalogItem) -> bool {
        if item.category != self.category || item.finish != self.finish {
            return false;
        }
        if let Some(pattern) = self.part_id_pattern {
            if !item.part_id.contains(pattern) {
                return false;
            }
        }
        if let Some(width) = self.width {
            if !matches_dimension(item.dimensions.width.as_ref(), width) {
                return false;
            }
        }
        if let Some(height) = self.height {
            if !matches_dimension(item.dimensions.height.as_ref(), height) {
                return false;
            }
        }
        true
    }
}

/// Read-only table of catalog items in declaration order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<ProductCatalogItem>,
}

impl Catalog {
    /// Build a catalog from items, keeping their order
    pub fn new(items: Vec<ProductCatalogItem>) -> Self {
        Self { items }
    }

    /// First item in declaration order that satisfies the query.
    ///
    /// `None` is an ordinary outcome: the caller decides what an
    /// unmatched query means.
    pub fn find_part(&self, query: &PartQuery<'_>) -> Option<&ProductCatalogItem> {
        let found = self.items.iter().find(|item| query.matches(item));
        trace!(
            category = %query.category,
            finish = %query.finish,
            pattern = query.part_id_pattern,
            width = query.width,
            height = query.height,
            matched = found.map(|item| item.part_id.as_str()),
            "catalog lookup"
        );
        found
    }

    /// Every item satisfying the query, in declaration order
    pub fn find_all<'c>(&'c self, query: &PartQuery<'_>) -> Vec<&'c ProductCatalogItem> {
        self.items.iter().filter(|item| query.matches(item)).collect()
    }

    /// Look up an item by exact part number
    pub fn get(&self, part_id: &str) -> Option<&ProductCatalogItem> {
        self.items.iter().find(|item| item.part_id == part_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductCatalogItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<ProductCatalogItem>> for Catalog {
    fn from(items: Vec<ProductCatalogItem>) -> Self {
        Self::new(items)
    }
}

//! Bill of Materials types

use serde::{Deserialize, Serialize};

/// One BOM line: a catalog part and how many of it the module needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomItem {
    pub part_id: String,

    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Ordered, part-unique list of BOM lines.
///
/// Serializes as a bare array of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bom {
    items: Vec<BomItem>,
}

impl Bom {
    pub(crate) fn from_items(items: Vec<BomItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[BomItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BomItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by part number
    pub fn get(&self, part_id: &str) -> Option<&BomItem> {
        self.items.iter().find(|item| item.part_id == part_id)
    }

    /// Sum of all line quantities
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

impl<'a> IntoIterator for &'a Bom {
    type Item = &'a BomItem;
    type IntoIter = std::slice::Iter<'a, BomItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(part_id: &str, quantity: u32, description: Option<&str>) -> BomItem {
        BomItem {
            part_id: part_id.to_string(),
            quantity,
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_json_shape() {
        let bom = Bom::from_items(vec![
            item("PNL-TOP", 1, Some("Top panel")),
            item("SCR-M4", 24, None),
        ]);

        let json = serde_json::to_value(&bom).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"partId": "PNL-TOP", "quantity": 1, "description": "Top panel"},
                {"partId": "SCR-M4", "quantity": 24}
            ])
        );
    }

    #[test]
    fn test_total_quantity_and_lookup() {
        let bom = Bom::from_items(vec![item("A", 2, None), item("B", 8, None)]);
        assert_eq!(bom.total_quantity(), 10);
        assert_eq!(bom.get("B").map(|i| i.quantity), Some(8));
        assert!(bom.get("C").is_none());
    }
}

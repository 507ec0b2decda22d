//! Inventory items module.
//!
//! # Invariants
//! - `status` is always derived from `quantity` vs `reorder_level`; it is
//!   recomputed on insert and on every update.

use crate::metrics::{count_where, distinct_count, sum};
use crate::model::id::IdStrategy;
use crate::model::module::{require_non_negative, require_text, RecordModule, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn derive(quantity: u32, reorder_level: u32) -> Self {
        if quantity == 0 {
            Self::OutOfStock
        } else if quantity <= reorder_level {
            Self::LowStock
        } else {
            Self::InStock
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub reorder_level: u32,
    pub unit_price: f64,
    pub location: String,
    pub status: StockStatus,
}

impl InventoryItem {
    pub fn stock_value(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDraft {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub reorder_level: u32,
    pub unit_price: f64,
    pub location: String,
}

pub struct Inventory;

impl RecordModule for Inventory {
    type Record = InventoryItem;
    type Draft = InventoryDraft;

    const NAME: &'static str = "inventory item";
    const STORE_KEY: &'static str = "inventory.items";
    const ID_STRATEGY: IdStrategy = IdStrategy::Sequential {
        prefix: "INV",
        width: 4,
    };

    fn record_id(record: &InventoryItem) -> &str {
        &record.id
    }

    fn seed() -> Vec<InventoryItem> {
        vec![
            seed_item(
                "INV-0001",
                "EL-1001",
                "Dell Monitor 24\"",
                "Electronics",
                45,
                10,
                11_500.0,
                "Rack A1",
            ),
            seed_item(
                "INV-0002",
                "EL-1002",
                "Logitech Keyboard",
                "Electronics",
                8,
                15,
                1_850.0,
                "Rack A2",
            ),
            seed_item(
                "INV-0003",
                "OF-2001",
                "A4 Paper Ream",
                "Office Supplies",
                0,
                50,
                320.0,
                "Rack B1",
            ),
            seed_item(
                "INV-0004",
                "FU-3001",
                "Ergonomic Chair",
                "Furniture",
                12,
                5,
                8_900.0,
                "Bay C",
            ),
            seed_item(
                "INV-0005",
                "OF-2002",
                "Whiteboard Markers",
                "Office Supplies",
                30,
                40,
                45.0,
                "Rack B2",
            ),
            seed_item(
                "INV-0006",
                "EL-1003",
                "USB Flash Drive 64GB",
                "Electronics",
                120,
                25,
                650.0,
                "Rack A3",
            ),
        ]
    }

    fn search_fields(record: &InventoryItem) -> Vec<&str> {
        vec![&record.name, &record.category, &record.sku]
    }

    fn validate_draft(draft: &InventoryDraft) -> Result<(), ValidationError> {
        require_text("sku", &draft.sku)?;
        require_text("name", &draft.name)?;
        require_text("category", &draft.category)?;
        require_non_negative("unit_price", draft.unit_price)
    }

    fn validate_record(record: &InventoryItem) -> Result<(), ValidationError> {
        require_text("name", &record.name)?;
        require_text("category", &record.category)?;
        require_non_negative("unit_price", record.unit_price)
    }

    fn build_record(id: String, draft: InventoryDraft) -> InventoryItem {
        InventoryItem {
            id,
            sku: draft.sku.trim().to_string(),
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            quantity: draft.quantity,
            reorder_level: draft.reorder_level,
            unit_price: draft.unit_price,
            location: draft.location.trim().to_string(),
            status: StockStatus::derive(draft.quantity, draft.reorder_level),
        }
    }

    fn normalize_record(mut record: InventoryItem) -> InventoryItem {
        record.status = StockStatus::derive(record.quantity, record.reorder_level);
        record
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_item(
    id: &str,
    sku: &str,
    name: &str,
    category: &str,
    quantity: u32,
    reorder_level: u32,
    unit_price: f64,
    location: &str,
) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        sku: sku.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        reorder_level,
        unit_price,
        location: location.to_string(),
        status: StockStatus::derive(quantity, reorder_level),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventorySummary {
    pub total_items: usize,
    pub total_stock_value: f64,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub categories: usize,
}

pub fn summarize(items: &[InventoryItem]) -> InventorySummary {
    InventorySummary {
        total_items: items.len(),
        total_stock_value: sum(items, InventoryItem::stock_value),
        low_stock: count_where(items, |item| item.status == StockStatus::LowStock),
        out_of_stock: count_where(items, |item| item.status == StockStatus::OutOfStock),
        categories: distinct_count(items, |item| item.category.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::{summarize, Inventory, StockStatus};
    use crate::model::module::RecordModule;

    #[test]
    fn status_derivation_thresholds() {
        assert_eq!(StockStatus::derive(0, 10), StockStatus::OutOfStock);
        assert_eq!(StockStatus::derive(10, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::derive(11, 10), StockStatus::InStock);
        assert_eq!(StockStatus::derive(1, 0), StockStatus::InStock);
    }

    #[test]
    fn normalize_rederives_status() {
        let mut item = Inventory::seed().remove(0);
        item.quantity = 3;
        let item = Inventory::normalize_record(item);
        assert_eq!(item.status, StockStatus::LowStock);
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_value(StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "Out of Stock");
    }

    #[test]
    fn seed_summary() {
        let summary = summarize(&Inventory::seed());
        assert_eq!(summary.total_items, 6);
        assert_eq!(summary.low_stock, 2);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.categories, 3);
    }
}

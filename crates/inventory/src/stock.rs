//! Stock levels and inventory classification.
//!
//! A row can satisfy several classifications at once (a 0/10 bin is both out
//! of stock and low stock). Callers filter per status; nothing here enforces
//! exclusivity.

use serde::{Deserialize, Serialize};

use candystock_core::{DomainError, DomainResult, InventoryId, ItemId};

/// Stock below this fraction of capacity counts as low stock (strict).
pub const LOW_STOCK_RATIO: f64 = 0.35;

/// Validated stock/capacity pair.
///
/// Stock above capacity is legal (overstock is reported, not rejected).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StockLevels {
    stock: i64,
    capacity: i64,
}

impl StockLevels {
    pub fn new(stock: i64, capacity: i64) -> DomainResult<Self> {
        if stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        if capacity < 0 {
            return Err(DomainError::validation("capacity cannot be negative"));
        }
        Ok(Self { stock, capacity })
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Fill ratio, or `None` when capacity is zero.
    pub fn fill_ratio(&self) -> Option<f64> {
        if self.capacity == 0 {
            None
        } else {
            Some(self.stock as f64 / self.capacity as f64)
        }
    }
}

/// Inventory classifications exposed as reports.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StockStatus {
    OutOfStock,
    Overstocked,
    LowStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [
        StockStatus::OutOfStock,
        StockStatus::Overstocked,
        StockStatus::LowStock,
    ];

    /// Whether `levels` falls into this classification.
    ///
    /// Zero capacity is never low stock: the ratio is undefined.
    pub fn matches(self, levels: StockLevels) -> bool {
        match self {
            StockStatus::OutOfStock => levels.stock == 0,
            StockStatus::Overstocked => levels.stock > levels.capacity,
            StockStatus::LowStock => levels
                .fill_ratio()
                .is_some_and(|ratio| ratio < LOW_STOCK_RATIO),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out-of-stock",
            StockStatus::Overstocked => "overstocked",
            StockStatus::LowStock => "low-stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `inventory ⋈ items` view, keyed the way clients see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryView {
    pub id: InventoryId,
    pub item_id: ItemId,
    pub item_name: String,
    pub amount_in_stock: i64,
    pub total_capacity: i64,
}

impl InventoryView {
    /// Stored levels are trusted as-is; storage rows may predate validation.
    pub fn levels(&self) -> StockLevels {
        StockLevels {
            stock: self.amount_in_stock,
            capacity: self.total_capacity,
        }
    }

    pub fn is(&self, status: StockStatus) -> bool {
        status.matches(self.levels())
    }
}

//! Inventory reports over the `inventory ⋈ items` view.
//!
//! Every call re-reads storage; classification uses `StockStatus` so the
//! thresholds live in one place.

use sqlx::SqlitePool;

use candystock_core::{InventoryId, ItemId};
use candystock_inventory::{InventoryView, StockStatus};

use crate::db::Database;
use crate::error::RepositoryResult;

const INVENTORY_VIEW_SQL: &str = r#"
SELECT i.id
     , i.item     AS item_id
     , it.name    AS item_name
     , i.stock    AS amount_in_stock
     , i.capacity AS total_capacity
  FROM inventory i
  JOIN items it ON it.id = i.item
"#;

type ViewRow = (i64, i64, String, i64, i64);

fn into_view((id, item_id, item_name, amount_in_stock, total_capacity): ViewRow) -> InventoryView {
    InventoryView {
        id: InventoryId::new(id),
        item_id: ItemId::new(item_id),
        item_name,
        amount_in_stock,
        total_capacity,
    }
}

pub(crate) async fn fetch_all(pool: &SqlitePool) -> Result<Vec<InventoryView>, sqlx::Error> {
    let sql = format!("{INVENTORY_VIEW_SQL} ORDER BY i.id");
    let rows: Vec<ViewRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(into_view).collect())
}

pub(crate) async fn fetch_by_id(pool: &SqlitePool, id: InventoryId) -> Result<Option<InventoryView>, sqlx::Error> {
    let sql = format!("{INVENTORY_VIEW_SQL} WHERE i.id = ?");
    let row: Option<ViewRow> = sqlx::query_as(&sql)
        .bind(id.get())
        .fetch_optional(pool)
        .await?;
    Ok(row.map(into_view))
}

#[derive(Debug, Clone)]
pub struct InventoryAnalytics {
    db: Database,
}

impl InventoryAnalytics {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The full joined view, ordered by inventory id.
    pub async fn all_inventory(&self) -> RepositoryResult<Vec<InventoryView>> {
        Ok(fetch_all(&self.db.pool().await).await?)
    }

    pub async fn by_status(&self, status: StockStatus) -> RepositoryResult<Vec<InventoryView>> {
        let mut rows = self.all_inventory().await?;
        rows.retain(|row| row.is(status));
        tracing::debug!(%status, matches = rows.len(), "inventory report");
        Ok(rows)
    }

    pub async fn out_of_stock(&self) -> RepositoryResult<Vec<InventoryView>> {
        self.by_status(StockStatus::OutOfStock).await
    }

    pub async fn overstocked(&self) -> RepositoryResult<Vec<InventoryView>> {
        self.by_status(StockStatus::Overstocked).await
    }

    pub async fn low_stock(&self) -> RepositoryResult<Vec<InventoryView>> {
        self.by_status(StockStatus::LowStock).await
    }

    /// Zero or one rows; a missing id is an empty result, not an error.
    pub async fn by_id(&self, id: InventoryId) -> RepositoryResult<Vec<InventoryView>> {
        let row = fetch_by_id(&self.db.pool().await, id).await?;
        Ok(row.into_iter().collect())
    }
}

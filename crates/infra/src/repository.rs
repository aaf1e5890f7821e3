//! Entity repository: create, update and delete items, inventory rows,
//! distributors and price offerings.
//!
//! Every mutation is a single statement (inventory creation adds a re-read of
//! the joined view). Dependent rows are removed by the schema's cascades.

use serde::Serialize;
use sqlx::SqlitePool;

use candystock_core::{DistributorId, InventoryId, ItemId, PriceId};
use candystock_inventory::{Cost, Distributor, EntityName, InventoryView, Item, StockLevels};

use crate::analytics;
use crate::db::Database;
use crate::error::{RepositoryError, RepositoryResult};
use crate::table::{fetch_table, Record};

/// Outcome of an update or delete addressed by key.
///
/// Touching zero rows is reported, not treated as a failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MutationStatus {
    Ok,
    NotFound,
}

impl MutationStatus {
    fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            MutationStatus::Ok
        } else {
            MutationStatus::NotFound
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: Database,
}

impl CatalogRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn pool(&self) -> SqlitePool {
        self.db.pool().await
    }

    // -------------------------
    // Items
    // -------------------------

    pub async fn list_items(&self) -> RepositoryResult<Vec<Record>> {
        let table = fetch_table(&self.pool().await, "SELECT * FROM items", &[]).await?;
        Ok(table.into_records())
    }

    pub async fn add_item(&self, name: EntityName) -> RepositoryResult<Item> {
        let result = sqlx::query("INSERT INTO items (name) VALUES (?)")
            .bind(name.as_str())
            .execute(&self.pool().await)
            .await
            .map_err(|e| RepositoryError::from_write(e, "Item already exists", "Item not found"))?;

        let id = ItemId::new(result.last_insert_rowid());
        tracing::info!(item_id = %id, name = %name, "item added");
        Ok(Item {
            id,
            name: name.into_inner(),
        })
    }

    /// Cascades to the item's inventory row and every offering for it.
    pub async fn delete_item(&self, id: ItemId) -> RepositoryResult<MutationStatus> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool().await)
            .await?;

        let status = MutationStatus::from_rows_affected(result.rows_affected());
        tracing::info!(item_id = %id, ?status, "item delete");
        Ok(status)
    }

    // -------------------------
    // Inventory
    // -------------------------

    /// Track stock for an item that has no inventory row yet.
    pub async fn add_inventory(&self, item_id: ItemId, levels: StockLevels) -> RepositoryResult<InventoryView> {
        let pool = self.pool().await;
        let result = sqlx::query("INSERT INTO inventory (item, stock, capacity) VALUES (?, ?, ?)")
            .bind(item_id.get())
            .bind(levels.stock())
            .bind(levels.capacity())
            .execute(&pool)
            .await
            .map_err(|e| {
                RepositoryError::from_write(
                    e,
                    "Inventory already exists for item",
                    &format!("Item {item_id} not found"),
                )
            })?;

        let id = InventoryId::new(result.last_insert_rowid());
        tracing::info!(inventory_id = %id, item_id = %item_id, "inventory added");

        analytics::fetch_by_id(&pool, id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Inventory {id} vanished after insert")))
    }

    /// Overwrite both stock and capacity.
    pub async fn update_inventory(&self, id: InventoryId, levels: StockLevels) -> RepositoryResult<MutationStatus> {
        let result = sqlx::query("UPDATE inventory SET stock = ?, capacity = ? WHERE id = ?")
            .bind(levels.stock())
            .bind(levels.capacity())
            .bind(id.get())
            .execute(&self.pool().await)
            .await?;

        let status = MutationStatus::from_rows_affected(result.rows_affected());
        tracing::info!(inventory_id = %id, ?status, "inventory update");
        Ok(status)
    }

    pub async fn delete_inventory(&self, id: InventoryId) -> RepositoryResult<MutationStatus> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool().await)
            .await?;

        let status = MutationStatus::from_rows_affected(result.rows_affected());
        tracing::info!(inventory_id = %id, ?status, "inventory delete");
        Ok(status)
    }

    // -------------------------
    // Distributors
    // -------------------------

    pub async fn list_distributors(&self) -> RepositoryResult<Vec<Record>> {
        let table = fetch_table(&self.pool().await, "SELECT id, name FROM distributors", &[]).await?;
        Ok(table.into_records())
    }

    pub async fn add_distributor(&self, name: EntityName) -> RepositoryResult<Distributor> {
        let result = sqlx::query("INSERT INTO distributors (name) VALUES (?)")
            .bind(name.as_str())
            .execute(&self.pool().await)
            .await
            .map_err(|e| {
                RepositoryError::from_write(e, "Distributor already exists", "Distributor not found")
            })?;

        let id = DistributorId::new(result.last_insert_rowid());
        tracing::info!(distributor_id = %id, name = %name, "distributor added");
        Ok(Distributor {
            id,
            name: name.into_inner(),
        })
    }

    /// Cascades to every offering of the distributor.
    pub async fn delete_distributor(&self, id: DistributorId) -> RepositoryResult<MutationStatus> {
        let result = sqlx::query("DELETE FROM distributors WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool().await)
            .await?;

        let status = MutationStatus::from_rows_affected(result.rows_affected());
        tracing::info!(distributor_id = %id, ?status, "distributor delete");
        Ok(status)
    }

    // -------------------------
    // Prices
    // -------------------------

    /// Always inserts a new offering, even if the pair already has one.
    pub async fn add_price(
        &self,
        distributor_id: DistributorId,
        item_id: ItemId,
        cost: Cost,
    ) -> RepositoryResult<PriceId> {
        let result = sqlx::query("INSERT INTO distributor_prices (distributor, item, cost) VALUES (?, ?, ?)")
            .bind(distributor_id.get())
            .bind(item_id.get())
            .bind(cost.get())
            .execute(&self.pool().await)
            .await
            .map_err(|e| RepositoryError::from_write(e, "Price already exists", "Distributor or item not found"))?;

        let id = PriceId::new(result.last_insert_rowid());
        tracing::info!(price_id = %id, distributor_id = %distributor_id, item_id = %item_id, "price added");
        Ok(id)
    }

    /// Reprice every offering of `item_id` by `distributor_id`.
    pub async fn update_price(
        &self,
        distributor_id: DistributorId,
        item_id: ItemId,
        cost: Cost,
    ) -> RepositoryResult<MutationStatus> {
        let result = sqlx::query("UPDATE distributor_prices SET cost = ? WHERE distributor = ? AND item = ?")
            .bind(cost.get())
            .bind(distributor_id.get())
            .bind(item_id.get())
            .execute(&self.pool().await)
            .await?;

        let rows = result.rows_affected();
        let status = MutationStatus::from_rows_affected(rows);
        tracing::info!(distributor_id = %distributor_id, item_id = %item_id, rows, ?status, "price update");
        Ok(status)
    }
}

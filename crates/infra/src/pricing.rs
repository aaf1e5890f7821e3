//! Pricing resolver: offerings by distributor or item, cheapest restock quote.

use candystock_core::{DistributorId, ItemId};
use candystock_inventory::{cheapest_offer, PriceCandidate, RestockQuote};

use crate::db::Database;
use crate::error::RepositoryResult;
use crate::table::{fetch_table, Record};

const BY_DISTRIBUTOR_SQL: &str = r#"
SELECT dp.id   AS offering_id
     , it.name AS item_name
     , dp.cost
  FROM distributor_prices dp
  JOIN items it ON it.id = dp.item
 WHERE dp.distributor = ?
 ORDER BY dp.id
"#;

const BY_ITEM_SQL: &str = r#"
SELECT dp.id  AS offering_id
     , d.name AS distributor_name
     , dp.cost
  FROM distributor_prices dp
  JOIN distributors d ON d.id = dp.distributor
 WHERE dp.item = ?
 ORDER BY dp.id
"#;

// Storage order matters: ties go to the first offering.
const CANDIDATES_SQL: &str = r#"
SELECT dp.distributor
     , d.name
     , dp.cost
  FROM distributor_prices dp
  JOIN distributors d ON d.id = dp.distributor
 WHERE dp.item = ?
 ORDER BY dp.id
"#;

#[derive(Debug, Clone)]
pub struct PricingResolver {
    db: Database,
}

impl PricingResolver {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// `[{offering_id, item_name, cost}]`; empty when the distributor sells nothing.
    pub async fn offerings_by_distributor(&self, id: DistributorId) -> RepositoryResult<Vec<Record>> {
        let table = fetch_table(&self.db.pool().await, BY_DISTRIBUTOR_SQL, &[id.get()]).await?;
        Ok(table.into_records())
    }

    /// `[{offering_id, distributor_name, cost}]`.
    pub async fn offerings_by_item(&self, id: ItemId) -> RepositoryResult<Vec<Record>> {
        let table = fetch_table(&self.db.pool().await, BY_ITEM_SQL, &[id.get()]).await?;
        Ok(table.into_records())
    }

    pub async fn cheapest_offer(&self, item_id: ItemId, quantity: u32) -> RepositoryResult<RestockQuote> {
        let rows: Vec<(i64, String, f64)> = sqlx::query_as(CANDIDATES_SQL)
            .bind(item_id.get())
            .fetch_all(&self.db.pool().await)
            .await?;

        let candidates: Vec<PriceCandidate> = rows
            .into_iter()
            .map(|(distributor_id, distributor_name, cost)| PriceCandidate {
                distributor_id: DistributorId::new(distributor_id),
                distributor_name,
                cost,
            })
            .collect();

        let quote = match cheapest_offer(&candidates, quantity) {
            Some(offer) => RestockQuote::Offer(offer),
            None => RestockQuote::no_offerings(item_id),
        };
        Ok(quote)
    }
}

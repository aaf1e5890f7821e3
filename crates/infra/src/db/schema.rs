//! Relation definitions.
//!
//! Cascades are declared here and enforced by SQLite (`foreign_keys` is on
//! for every pooled connection); repository code never deletes children itself.

use sqlx::SqlitePool;

const ITEMS: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id   integer PRIMARY KEY,
    name text NOT NULL UNIQUE
)
"#;

const INVENTORY: &str = r#"
CREATE TABLE IF NOT EXISTS inventory (
    id       integer PRIMARY KEY,
    item     integer NOT NULL UNIQUE REFERENCES items(id) ON DELETE CASCADE,
    stock    integer NOT NULL,
    capacity integer NOT NULL
)
"#;

const DISTRIBUTORS: &str = r#"
CREATE TABLE IF NOT EXISTS distributors (
    id   integer PRIMARY KEY,
    name text NOT NULL UNIQUE
)
"#;

// No uniqueness on (distributor, item): a distributor may list several prices for one item.
const DISTRIBUTOR_PRICES: &str = r#"
CREATE TABLE IF NOT EXISTS distributor_prices (
    id          integer PRIMARY KEY,
    distributor integer NOT NULL REFERENCES distributors(id) ON DELETE CASCADE,
    item        integer NOT NULL REFERENCES items(id) ON DELETE CASCADE,
    cost        float NOT NULL
)
"#;

/// Create all relations if absent.
pub async fn apply(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in [ITEMS, INVENTORY, DISTRIBUTORS, DISTRIBUTOR_PRICES] {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("schema applied");
    Ok(())
}

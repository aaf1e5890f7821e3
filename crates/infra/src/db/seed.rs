//! Reference dataset loaded into a fresh or reset database.
//!
//! Values are fixed so tests can rely on exact ids, names and prices.

use sqlx::SqlitePool;

const ITEMS: &str = r#"
INSERT INTO items (id, name) VALUES
    (1, 'Licorice'), (2, 'Good & Plenty'), (3, 'Smarties'), (4, 'Tootsie Rolls'),
    (5, 'Necco Wafers'), (6, 'Wax Cola Bottles'), (7, 'Circus Peanuts'), (8, 'Candy Corn'),
    (9, 'Twix'), (10, 'Snickers'), (11, 'M&Ms'), (12, 'Skittles'), (13, 'Starburst'),
    (14, 'Butterfinger'), (15, 'Peach Rings'), (16, 'Gummy Bears'), (17, 'Sour Patch Kids')
"#;

const INVENTORY: &str = r#"
INSERT INTO inventory (item, stock, capacity) VALUES
    (1, 22, 25), (2, 4, 20), (3, 15, 25), (4, 30, 50), (5, 14, 15), (6, 8, 10),
    (7, 10, 10), (8, 30, 40), (9, 17, 70), (10, 43, 65), (11, 32, 55), (12, 25, 45),
    (13, 8, 45), (14, 10, 60), (15, 20, 30), (16, 15, 35), (17, 14, 60)
"#;

const DISTRIBUTORS: &str = r#"
INSERT INTO distributors (id, name) VALUES
    (1, 'Candy Corp'), (2, 'The Sweet Suite'), (3, 'Dentists Hate Us')
"#;

const DISTRIBUTOR_PRICES: &str = r#"
INSERT INTO distributor_prices (distributor, item, cost) VALUES
    (1, 1, 0.81), (1, 2, 0.46), (1, 3, 0.89), (1, 4, 0.45),
    (2, 2, 0.18), (2, 3, 0.54), (2, 4, 0.67), (2, 5, 0.25), (2, 6, 0.35), (2, 7, 0.23),
    (2, 8, 0.41), (2, 9, 0.54), (2, 10, 0.25), (2, 11, 0.52), (2, 12, 0.07), (2, 13, 0.77),
    (2, 14, 0.93), (2, 15, 0.11), (2, 16, 0.42),
    (3, 10, 0.47), (3, 11, 0.84), (3, 12, 0.15), (3, 13, 0.07), (3, 14, 0.97),
    (3, 15, 0.39), (3, 16, 0.91), (3, 17, 0.85)
"#;

/// Insert the reference dataset in one transaction.
pub async fn apply(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in [ITEMS, INVENTORY, DISTRIBUTORS, DISTRIBUTOR_PRICES] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!("reference dataset seeded");
    Ok(())
}

//! CSV export of whole tables.

use candystock_inventory::ExportTable;

use crate::db::Database;
use crate::error::RepositoryResult;
use crate::table::{fetch_table, ResultTable};

/// Line returned for an unknown table name.
pub const INVALID_TABLE_CSV: &str = "error,invalid_table\n";

fn export_sql(table: ExportTable) -> &'static str {
    match table {
        ExportTable::Items => "SELECT * FROM items",
        ExportTable::Distributors => "SELECT * FROM distributors",
        ExportTable::Inventory => {
            r#"
SELECT i.id     AS inventory_id
     , it.name  AS item_name
     , i.stock  AS amount_in_stock
     , i.capacity AS total_capacity
  FROM inventory i
  JOIN items it ON it.id = i.item
 ORDER BY i.id
"#
        }
        ExportTable::DistributorPrices => {
            r#"
SELECT dp.id   AS price_id
     , d.name  AS distributor_name
     , it.name AS item_name
     , dp.cost AS unit_cost
  FROM distributor_prices dp
  JOIN distributors d ON d.id = dp.distributor
  JOIN items it ON it.id = dp.item
 ORDER BY dp.id
"#
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvExporter {
    db: Database,
}

impl CsvExporter {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Header line plus one line per row, `\n` terminated.
    pub async fn export(&self, table: ExportTable) -> RepositoryResult<String> {
        let result = fetch_table(&self.db.pool().await, export_sql(table), &[]).await?;
        let csv = render_csv(&result)?;
        tracing::debug!(%table, rows = result.rows().len(), "table exported");
        Ok(csv)
    }

    /// Export by name. Failures become a single `error,...` line instead of an error.
    pub async fn export_named(&self, name: &str) -> String {
        let Ok(table) = name.parse::<ExportTable>() else {
            tracing::warn!(table = name, "export of unknown table requested");
            return INVALID_TABLE_CSV.to_string();
        };

        match self.export(table).await {
            Ok(csv) => csv,
            Err(err) => {
                tracing::error!(%table, error = %err, "table export failed");
                error_line(&err.to_string())
            }
        }
    }
}

/// Render a result table; fields are quoted only when they contain a comma,
/// quote or line break.
pub fn render_csv(table: &ResultTable) -> RepositoryResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_field()))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn error_line(message: &str) -> String {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    if writer.write_record(["error", message]).is_err() {
        return "error,export_failed\n".to_string();
    }
    match writer.into_inner() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => "error,export_failed\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use crate::test_support::seeded_db;

    #[tokio::test]
    async fn inventory_export_uses_item_names() {
        let (_dir, db) = seeded_db().await;
        let csv = CsvExporter::new(db).export(ExportTable::Inventory).await.unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("inventory_id,item_name,amount_in_stock,total_capacity"));
        assert!(csv.contains("8,Candy Corn,30,40\n"));
        // The raw item foreign key is not exported.
        assert!(!csv.contains(",8,30,40"));
        assert_eq!(csv.lines().count(), 18);
        assert!(csv.ends_with('\n'));
    }

    #[tokio::test]
    async fn price_export_keeps_real_formatting() {
        let (_dir, db) = seeded_db().await;
        let csv = CsvExporter::new(db)
            .export(ExportTable::DistributorPrices)
            .await
            .unwrap();

        assert!(csv.starts_with("price_id,distributor_name,item_name,unit_cost\n"));
        assert!(csv.contains("1,Candy Corp,Licorice,0.81\n"));
        assert!(csv.contains("The Sweet Suite,Good & Plenty,0.18\n"));
    }

    #[tokio::test]
    async fn plain_tables_export_every_column() {
        let (_dir, db) = seeded_db().await;
        let exporter = CsvExporter::new(db);

        let items = exporter.export(ExportTable::Items).await.unwrap();
        assert!(items.starts_with("id,name\n1,Licorice\n"));

        let distributors = exporter.export(ExportTable::Distributors).await.unwrap();
        assert_eq!(
            distributors,
            "id,name\n1,Candy Corp\n2,The Sweet Suite\n3,Dentists Hate Us\n"
        );
    }

    #[tokio::test]
    async fn unknown_table_name_yields_error_line() {
        let (_dir, db) = seeded_db().await;
        let exporter = CsvExporter::new(db);

        assert_eq!(exporter.export_named("users").await, INVALID_TABLE_CSV);
        assert_eq!(exporter.export_named("").await, INVALID_TABLE_CSV);
        assert!(exporter.export_named("items").await.starts_with("id,name\n"));
    }

    #[test]
    fn fields_are_quoted_only_when_needed() {
        let table = ResultTable::new(
            vec!["id".into(), "name".into()],
            vec![
                vec![Cell::Integer(1), Cell::Text("Salt, Sea".into())],
                vec![Cell::Integer(2), Cell::Text("The \"Best\" Bar".into())],
                vec![Cell::Integer(3), Cell::Null],
                vec![Cell::Integer(4), Cell::Real(2.0)],
            ],
        );

        assert_eq!(
            render_csv(&table).unwrap(),
            "id,name\n1,\"Salt, Sea\"\n2,\"The \"\"Best\"\" Bar\"\n3,\n4,2.0\n"
        );
    }

    #[test]
    fn empty_table_still_has_a_header() {
        let table = ResultTable::new(vec!["id".into(), "name".into()], Vec::new());
        assert_eq!(render_csv(&table).unwrap(), "id,name\n");
    }

    #[test]
    fn error_lines_are_escaped() {
        assert_eq!(error_line("disk, full"), "error,\"disk, full\"\n");
    }
}

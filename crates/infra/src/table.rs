//! Tabular query results and their conversion to ordered records.
//!
//! Column names are taken from the prepared statement, so query aliases
//! (`AS item_name`) become the record keys and CSV headers.

use serde_json::{Map, Number, Value as JsonValue};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Column, Executor, Row, Statement, TypeInfo, ValueRef};

/// One ordered key/value record per row (`serde_json` keeps insertion order).
pub type Record = Map<String, JsonValue>;

/// A single decoded SQLite value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Cell::Null => JsonValue::Null,
            Cell::Integer(v) => JsonValue::from(*v),
            Cell::Real(v) => Number::from_f64(*v).map_or(JsonValue::Null, JsonValue::Number),
            Cell::Text(v) => JsonValue::String(v.clone()),
        }
    }

    /// Unquoted textual form; NULL renders empty. Whole reals keep a `.0`.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Integer(v) => v.to_string(),
            Cell::Real(v) if v.is_finite() && v.fract() == 0.0 => format!("{v:.1}"),
            Cell::Real(v) => v.to_string(),
            Cell::Text(v) => v.clone(),
        }
    }
}

/// Ordered columns plus ordered rows, as returned by a query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert each row into a record keyed by column name, in column order.
    pub fn into_records(self) -> Vec<Record> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row.iter())
                    .map(|(name, cell)| (name.clone(), cell.to_json()))
                    .collect()
            })
            .collect()
    }
}

/// Run `sql` with positional integer parameters and collect the full result.
///
/// The statement is prepared first so the header is known even when no rows match.
pub async fn fetch_table(pool: &SqlitePool, sql: &str, params: &[i64]) -> Result<ResultTable, sqlx::Error> {
    let statement = pool.prepare(sql).await?;
    let columns = statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let mut query = statement.query();
    for param in params {
        query = query.bind(*param);
    }
    let rows = query.fetch_all(pool).await?;

    let rows = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
    Ok(ResultTable::new(columns, rows))
}

fn decode_row(row: &SqliteRow) -> Result<Vec<Cell>, sqlx::Error> {
    (0..row.len()).map(|index| decode_cell(row, index)).collect()
}

// SQLite is dynamically typed: decode by the stored value's type, not the column's.
fn decode_cell(row: &SqliteRow, index: usize) -> Result<Cell, sqlx::Error> {
    let storage_type = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Cell::Null);
        }
        raw.type_info().name().to_string()
    };

    match storage_type.as_str() {
        "INTEGER" => row.try_get::<i64, _>(index).map(Cell::Integer),
        "REAL" => row.try_get::<f64, _>(index).map(Cell::Real),
        "TEXT" => row.try_get::<String, _>(index).map(Cell::Text),
        _ => row
            .try_get::<Vec<u8>, _>(index)
            .map(|bytes| Cell::Text(String::from_utf8_lossy(&bytes).into_owned())),
    }
}

use crate::db::client::Database;
use crate::error::Result;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo};

/// Canonical value of one result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Timestamp(DateTime<Utc>),
    Null,
}

/// Ordered rows produced by one statement execution.
#[derive(Debug, Default)]
pub struct ResultSet {
    pub rows: Vec<IndexMap<String, SqlValue>>,
    pub count: usize,
}

impl Database {
    /// Execute a compiled statement and materialize the rows.
    ///
    /// Driver faults (syntax error, connectivity loss, timeout) surface to
    /// the caller; nothing is retried.
    pub async fn fetch(&self, statement: &str, limit: u64) -> Result<ResultSet> {
        let raw_rows = sqlx::query(statement).fetch_all(self.pool()).await?;

        let mut rows = Vec::with_capacity(raw_rows.len().min(limit as usize));
        for raw in &raw_rows {
            let mut row = IndexMap::with_capacity(raw.columns().len());
            for column in raw.columns() {
                let value = decode_column(raw, column.ordinal(), column.type_info().name())?;
                row.insert(column.name().to_string(), value);
            }
            rows.push(row);
        }

        let count = rows.len();
        Ok(ResultSet { rows, count })
    }
}

/// Convert one driver-native cell into its canonical value.
///
/// Keyed by the driver's reported column type so the mapping is a fixed
/// table rather than a probe of the runtime value. Every type the column
/// registry admits has an arm here; anything else materializes as null.
fn decode_column(row: &MySqlRow, index: usize, type_name: &str) -> Result<SqlValue> {
    let value = match type_name {
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::Bool),

        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => row
            .try_get::<Option<i64>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::Int),

        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => match row.try_get::<Option<u64>, _>(index)? {
            // Values past i64::MAX keep their digits rather than wrapping
            Some(v) if v > i64::MAX as u64 => SqlValue::String(v.to_string()),
            Some(v) => SqlValue::Int(v as i64),
            None => SqlValue::Null,
        },

        "FLOAT" => row
            .try_get::<Option<f32>, _>(index)?
            .map_or(SqlValue::Null, |v| SqlValue::Float(f64::from(v))),

        "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::Float),

        "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET" => {
            row.try_get::<Option<String>, _>(index)?
                .map_or(SqlValue::Null, SqlValue::String)
        }

        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)?
            .map_or(SqlValue::Null, |bytes| {
                SqlValue::String(String::from_utf8_lossy(&bytes).into_owned())
            }),

        "TIMESTAMP" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::Timestamp),

        "DATETIME" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map_or(SqlValue::Null, |dt| SqlValue::Timestamp(dt.and_utc())),

        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)?
            .map_or(SqlValue::Null, |d| {
                SqlValue::String(d.format("%Y-%m-%d").to_string())
            }),

        other => {
            tracing::warn!(
                "Unsupported column type '{}' for column index {}, returning null",
                other,
                index
            );
            SqlValue::Null
        }
    };

    Ok(value)
}

use crate::db::client::Database;
use crate::db::types::{column_kind, type_token, TableSchema};
use crate::error::{Result, TablegateError};
use crate::sql::quote_identifier;

use sqlx::Row;

impl Database {
    /// Derive the table's schema from its column metadata.
    ///
    /// Issues `DESCRIBE` and reads, per reported column, only the first two
    /// fields (name, type string). The leading token of the type string is
    /// mapped through the column type registry; a token the registry does not
    /// know is surfaced as a configuration error rather than defaulting.
    pub async fn table_schema(&self, table: &str) -> Result<TableSchema> {
        let statement = format!("DESCRIBE {}", quote_identifier(table)?);
        tracing::debug!("Introspecting: {}", statement);

        let rows = sqlx::query(&statement).fetch_all(self.pool()).await?;

        let mut schema = TableSchema::new();
        for row in rows {
            let name = text_field(&row, 0)?;
            let raw_type = text_field(&row, 1)?;

            let token = type_token(&raw_type);
            let kind = column_kind(token).ok_or_else(|| TablegateError::UnmappedColumnType {
                column: name.clone(),
                native_type: raw_type.clone(),
            })?;

            schema.insert(name, kind);
        }

        Ok(schema)
    }
}

/// DESCRIBE metadata columns arrive as text or raw bytes depending on the
/// server version; accept both.
fn text_field(row: &sqlx::mysql::MySqlRow, index: usize) -> Result<String> {
    if let Ok(value) = row.try_get::<String, _>(index) {
        return Ok(value);
    }
    let bytes = row.try_get::<Vec<u8>, _>(index)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

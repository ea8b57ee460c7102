use crate::config::EntityConfig;
use crate::db::{Database, SqlValue};
use crate::query::QueryIntent;
use crate::sql::SelectBuilder;

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, ResolverContext, TypeRef};
use async_graphql::{Name, Value};
use indexmap::IndexMap;
use std::sync::Arc;

/// Create the root resolver for an entity.
///
/// This is the single entry point every generated schema resolves through:
/// it reads the request's extracted intent, compiles it into one SELECT
/// statement, executes it, and hands back the materialized rows.
pub fn create_query_resolver(entity: &EntityConfig) -> Field {
    let table = entity.table.clone();

    Field::new(
        entity.name.clone(),
        TypeRef::named_nn_list_nn(entity.name.clone()),
        move |ctx: ResolverContext| {
            let table = table.clone();

            FieldFuture::new(async move {
                let intent = ctx.data::<QueryIntent>()?;
                let db = ctx.data::<Arc<Database>>()?;

                let statement = SelectBuilder::new(table.as_str())
                    .with_filters(intent.filters.clone())
                    .with_projections(intent.projection.clone())
                    .with_sort_criteria(intent.sort.clone())
                    .with_pagination(intent.offset, intent.limit)
                    .build()
                    .map_err(|e| async_graphql::Error::new(e.to_string()))?;

                tracing::debug!("Executing statement: {}", statement);

                let result = db
                    .fetch(&statement, intent.limit)
                    .await
                    .map_err(|e| async_graphql::Error::new(e.to_string()))?;

                let rows: Vec<FieldValue> = result
                    .rows
                    .into_iter()
                    .map(|row| FieldValue::owned_any(row_to_graphql_value(row)))
                    .collect();

                Ok(Some(FieldValue::list(rows)))
            })
        },
    )
}

/// Convert one materialized row into a GraphQL object value.
pub fn row_to_graphql_value(row: IndexMap<String, SqlValue>) -> Value {
    let mut object = IndexMap::new();
    for (column, value) in row {
        object.insert(Name::new(column), graphql_value(value));
    }
    Value::Object(object)
}

fn graphql_value(value: SqlValue) -> Value {
    match value {
        SqlValue::Int(v) => Value::Number(v.into()),
        SqlValue::Float(v) => serde_json::Number::from_f64(v)
            .map_or(Value::Null, Value::Number),
        SqlValue::Bool(v) => Value::Boolean(v),
        SqlValue::String(v) => Value::String(v),
        SqlValue::Timestamp(v) => Value::String(v.to_rfc3339()),
        SqlValue::Null => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_row_conversion_basic_values() {
        let mut row = IndexMap::new();
        row.insert("id".to_string(), SqlValue::Int(1));
        row.insert("name".to_string(), SqlValue::String("Alice".to_string()));
        row.insert("active".to_string(), SqlValue::Bool(true));
        row.insert("nickname".to_string(), SqlValue::Null);

        let value = row_to_graphql_value(row);

        let Value::Object(object) = value else {
            panic!("expected object");
        };
        assert_eq!(object.get("id").unwrap(), &Value::Number(1.into()));
        assert_eq!(
            object.get("name").unwrap(),
            &Value::String("Alice".to_string())
        );
        assert_eq!(object.get("active").unwrap(), &Value::Boolean(true));
        assert_eq!(object.get("nickname").unwrap(), &Value::Null);
    }

    #[test]
    fn test_row_conversion_preserves_column_order() {
        let mut row = IndexMap::new();
        row.insert("b".to_string(), SqlValue::Int(2));
        row.insert("a".to_string(), SqlValue::Int(1));

        let Value::Object(object) = row_to_graphql_value(row) else {
            panic!("expected object");
        };
        let keys: Vec<_> = object.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_timestamp_renders_rfc3339() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let mut row = IndexMap::new();
        row.insert("created_at".to_string(), SqlValue::Timestamp(at));

        let Value::Object(object) = row_to_graphql_value(row) else {
            panic!("expected object");
        };
        assert_eq!(
            object.get("created_at").unwrap(),
            &Value::String("2024-01-15T10:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_nan_float_becomes_null() {
        let mut row = IndexMap::new();
        row.insert("ratio".to_string(), SqlValue::Float(f64::NAN));

        let Value::Object(object) = row_to_graphql_value(row) else {
            panic!("expected object");
        };
        assert_eq!(object.get("ratio").unwrap(), &Value::Null);
    }
}

//! GraphQL schema generation from introspected tables.
//!
//! A schema is generated per request, for the one entity the request names:
//! the table's columns become the output object, and the default argument
//! set (pagination, sort, filter object) is attached to the root field.

use crate::config::EntityConfig;
use crate::db::{Database, ScalarKind, TableSchema};
use crate::error::{Result, TablegateError};
use crate::query::{entity_name, extract_intent, DEFAULT_LIMIT, DEFAULT_OFFSET};
use crate::schema::resolver::create_query_resolver;
use crate::schema::type_mapping::{comparison_input_object, comparison_type_name, scalar_type_ref};
use crate::sql::SelectBuilder;

use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputObject, InputValue, Object, Schema, TypeRef,
};
use async_graphql::{parser::parse_query, Request, Value};
use std::sync::Arc;

/// Request pipeline over one configured entity catalog and one database.
///
/// Owns no per-request state: every query gets a freshly introspected table
/// schema and a freshly generated GraphQL schema.
pub struct Gateway {
    db: Arc<Database>,
    entities: Vec<EntityConfig>,
}

impl Gateway {
    pub fn new(db: Database, entities: Vec<EntityConfig>) -> Self {
        Self {
            db: Arc::new(db),
            entities,
        }
    }

    /// Resolve one request: parse, introspect, generate, execute.
    ///
    /// Per-request failures come back as errors; none of them are fatal to
    /// the process.
    pub async fn execute(&self, query: &str) -> Result<async_graphql::Response> {
        let document = parse_query(query)?;

        let entity_name = entity_name(&document).ok_or(TablegateError::NoEntity)?;
        let entity = self.entity(entity_name)?;

        let table_schema = self.db.table_schema(&entity.table).await?;
        let schema = generate_schema(entity, &table_schema)?;

        let intent = extract_intent(&document)?;
        let request = Request::new(query).data(intent).data(self.db.clone());

        Ok(schema.execute(request).await)
    }

    /// Compile one request down to its SELECT statement without executing
    /// it. Used by the `sql` subcommand.
    pub async fn compile(&self, query: &str) -> Result<String> {
        let document = parse_query(query)?;

        let entity_name = entity_name(&document).ok_or(TablegateError::NoEntity)?;
        let entity = self.entity(entity_name)?;

        // Introspection validates that the table exists and all its column
        // types are mapped, exactly as the execute path would
        let _table_schema = self.db.table_schema(&entity.table).await?;

        let intent = extract_intent(&document)?;
        let statement = SelectBuilder::new(entity.table.as_str())
            .with_filters(intent.filters)
            .with_projections(intent.projection)
            .with_sort_criteria(intent.sort)
            .with_pagination(intent.offset, intent.limit)
            .build()?;

        Ok(statement)
    }

    fn entity(&self, name: &str) -> Result<&EntityConfig> {
        self.entities
            .iter()
            .find(|entity| entity.name == name)
            .ok_or_else(|| TablegateError::UnknownEntity(name.to_string()))
    }
}

/// Generate the GraphQL schema for one entity from its introspected table
/// schema.
pub fn generate_schema(entity: &EntityConfig, table_schema: &TableSchema) -> Result<Schema> {
    tracing::debug!(
        "Generating schema for entity '{}' ({} columns)",
        entity.name,
        table_schema.len()
    );

    // Output object: one field per column
    let mut object = Object::new(entity.name.clone());
    for (column, kind) in table_schema {
        if !is_graphql_name(column) {
            return Err(TablegateError::SchemaGeneration(format!(
                "column '{}' is not a valid field name",
                column
            )));
        }
        object = object.field(value_field(column.clone(), scalar_type_ref(*kind)));
    }

    // Root field with the default argument set
    let mut root_field = create_query_resolver(entity)
        .argument(
            InputValue::new("offset", TypeRef::named(TypeRef::INT))
                .default_value(Value::from(DEFAULT_OFFSET))
                .description("Skip rows by offset"),
        )
        .argument(
            InputValue::new("limit", TypeRef::named(TypeRef::INT))
                .default_value(Value::from(DEFAULT_LIMIT))
                .description("Limit no of rows returned by some value"),
        );

    // Filter argument: one comparison object per filterable column. No
    // explicit allow-list means all columns are filterable.
    let mut where_object = InputObject::new("where").description("where condition");
    let mut where_kinds: Vec<ScalarKind> = Vec::new();
    let mut has_filter_fields = false;
    for (column, kind) in filterable_columns(entity, table_schema) {
        where_object = where_object.field(InputValue::new(
            column.clone(),
            TypeRef::named(comparison_type_name(kind)),
        ));
        if !where_kinds.contains(&kind) {
            where_kinds.push(kind);
        }
        has_filter_fields = true;
    }
    if has_filter_fields {
        root_field = root_field.argument(InputValue::new("where", TypeRef::named("where")));
    }

    // Sort argument: a list of single-field objects carrying direction
    // tokens
    let mut order_object = InputObject::new("order_by");
    for column in table_schema.keys() {
        order_object = order_object.field(InputValue::new(
            column.clone(),
            TypeRef::named(TypeRef::STRING),
        ));
    }
    if !table_schema.is_empty() {
        root_field = root_field.argument(InputValue::new(
            "order_by",
            TypeRef::named_list("order_by"),
        ));
    }

    let query = Object::new("Query").field(root_field);

    let mut schema_builder = Schema::build(query.type_name(), None, None);
    for kind in where_kinds {
        schema_builder = schema_builder.register(comparison_input_object(kind));
    }
    if has_filter_fields {
        schema_builder = schema_builder.register(where_object);
    }
    if !table_schema.is_empty() {
        schema_builder = schema_builder.register(order_object);
    }

    schema_builder
        .register(object)
        .register(query)
        .finish()
        .map_err(|e| TablegateError::SchemaGeneration(e.to_string()))
}

/// Output field that reads its value out of the parent row object.
fn value_field(column: String, type_ref: TypeRef) -> Field {
    let column_for_closure = column.clone();

    Field::new(column, type_ref, move |ctx| {
        let column = column_for_closure.clone();
        FieldFuture::new(async move {
            let parent = ctx.parent_value.try_downcast_ref::<Value>()?;

            if let Value::Object(row) = parent {
                if let Some(value) = row.get(column.as_str()) {
                    return Ok(Some(FieldValue::value(value.clone())));
                }
            }

            Ok(Some(FieldValue::NULL))
        })
    })
}

/// Columns the filter object exposes, in table order. Allow-listed names
/// that do not exist in the table are skipped.
fn filterable_columns<'a>(
    entity: &'a EntityConfig,
    table_schema: &'a TableSchema,
) -> impl Iterator<Item = (&'a String, ScalarKind)> + 'a {
    table_schema
        .iter()
        .filter(move |(column, _)| {
            entity.allowed_filters.is_empty() || entity.allowed_filters.contains(column)
        })
        .map(|(column, kind)| (column, *kind))
}

fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ScalarKind;

    fn payments_schema() -> TableSchema {
        let mut schema = TableSchema::new();
        schema.insert("id".to_string(), ScalarKind::Integer);
        schema.insert("amount".to_string(), ScalarKind::Float);
        schema.insert("status".to_string(), ScalarKind::String);
        schema.insert("refunded".to_string(), ScalarKind::Boolean);
        schema
    }

    fn payments_entity(filters: &[&str]) -> EntityConfig {
        EntityConfig {
            name: "payments".to_string(),
            table: "payments".to_string(),
            allowed_filters: filters.iter().map(|f| f.to_string()).collect(),
            relations: vec![],
        }
    }

    #[test]
    fn test_generated_schema_exposes_all_columns() {
        let schema = generate_schema(&payments_entity(&[]), &payments_schema()).unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("type payments"));
        assert!(sdl.contains("id: Int"));
        assert!(sdl.contains("amount: Float"));
        assert!(sdl.contains("status: String"));
        assert!(sdl.contains("refunded: Boolean"));
    }

    #[test]
    fn test_default_arguments_present() {
        let schema = generate_schema(&payments_entity(&[]), &payments_schema()).unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("offset: Int = 0"));
        assert!(sdl.contains("limit: Int = 100"));
    }

    #[test]
    fn test_empty_allow_list_makes_all_columns_filterable() {
        let schema = generate_schema(&payments_entity(&[]), &payments_schema()).unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("input where"));
        assert!(sdl.contains("id: integer_comparison"));
        assert!(sdl.contains("amount: float_comparison"));
        assert!(sdl.contains("status: string_comparison"));
        assert!(sdl.contains("refunded: boolean_comparison"));
    }

    #[test]
    fn test_allow_list_restricts_filterable_columns() {
        let schema = generate_schema(&payments_entity(&["amount"]), &payments_schema()).unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("amount: float_comparison"));
        assert!(!sdl.contains("status: string_comparison"));
        assert!(!sdl.contains("id: integer_comparison"));
    }

    #[test]
    fn test_allow_listed_unknown_column_skipped() {
        let schema =
            generate_schema(&payments_entity(&["amount", "no_such_column"]), &payments_schema())
                .unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("amount: float_comparison"));
        assert!(!sdl.contains("no_such_column"));
    }

    #[test]
    fn test_comparison_object_operators() {
        let schema = generate_schema(&payments_entity(&["amount"]), &payments_schema()).unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("input float_comparison"));
        for op in crate::sql::COMPARISON_OPS {
            assert!(sdl.contains(op), "missing operator {}", op);
        }
        assert!(sdl.contains("_in: [Float]"));
    }

    #[test]
    fn test_order_by_takes_direction_tokens() {
        let schema = generate_schema(&payments_entity(&[]), &payments_schema()).unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("order_by: [order_by]"));
        assert!(sdl.contains("input order_by"));
    }

    #[test]
    fn test_root_field_named_after_entity() {
        let schema = generate_schema(&payments_entity(&[]), &payments_schema()).unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("payments("));
        assert!(sdl.contains("[payments!]!"));
    }

    #[test]
    fn test_invalid_column_name_is_schema_error() {
        let mut schema = TableSchema::new();
        schema.insert("valid".to_string(), ScalarKind::Integer);
        schema.insert("not valid".to_string(), ScalarKind::Integer);

        let result = generate_schema(&payments_entity(&[]), &schema);
        assert!(matches!(result, Err(TablegateError::SchemaGeneration(_))));
    }
}

use async_graphql::parser::types::{
    DocumentOperations, ExecutableDocument, Field, OperationDefinition, Selection,
};
use async_graphql::Value;
use indexmap::IndexMap;

use crate::error::{Result, TablegateError};

pub const DEFAULT_LIMIT: u64 = 100;
pub const DEFAULT_OFFSET: u64 = 0;

/// Decoded argument literal.
///
/// One recursive decoder produces these from the parsed syntax tree so
/// downstream consumers match exhaustively instead of probing runtime types.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    List(Vec<Literal>),
    Object(IndexMap<String, Literal>),
    Null,
}

/// Decoded `where` argument: column name -> scalar (equality) or
/// operator -> operand mapping.
pub type FilterTree = IndexMap<String, Literal>;

/// One `column direction` pair of the requested sort order.
#[derive(Debug, Clone, PartialEq)]
pub struct SortTerm {
    pub column: String,
    pub direction: String,
}

/// Fully decoded, request-scoped record of what the query asks for.
///
/// Extracted once per request and consumed once by the statement compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryIntent {
    pub filters: FilterTree,
    pub projection: Vec<String>,
    pub sort: Vec<SortTerm>,
    pub offset: u64,
    pub limit: u64,
}

/// Name of the single top-level selection, which identifies the entity.
pub fn entity_name(document: &ExecutableDocument) -> Option<&str> {
    first_field(document).map(|field| field.name.node.as_str())
}

/// Walk the parsed query and extract filter, projection, sort and pagination
/// intent from the single top-level selection.
pub fn extract_intent(document: &ExecutableDocument) -> Result<QueryIntent> {
    let field = first_field(document).ok_or(TablegateError::NoEntity)?;

    let projection = field
        .selection_set
        .node
        .items
        .iter()
        .filter_map(|selection| match &selection.node {
            Selection::Field(sub_field) => Some(sub_field.node.name.node.to_string()),
            _ => None,
        })
        .collect();

    let mut arguments: IndexMap<String, Literal> = IndexMap::new();
    for (name, value) in &field.arguments {
        // Variables are unsupported; a value referencing one decodes to null
        let literal = match value.node.clone().into_const() {
            Some(const_value) => decode_literal(&const_value),
            None => Literal::Null,
        };
        arguments.insert(name.node.to_string(), literal);
    }

    let filters = match arguments.get("where") {
        Some(Literal::Object(fields)) => fields.clone(),
        _ => FilterTree::new(),
    };

    let limit = pagination_value(arguments.get("limit")).unwrap_or(DEFAULT_LIMIT);
    let offset = pagination_value(arguments.get("offset")).unwrap_or(DEFAULT_OFFSET);

    let sort = match arguments.get("order_by") {
        Some(Literal::List(entries)) => sort_terms(entries),
        _ => Vec::new(),
    };

    Ok(QueryIntent {
        filters,
        projection,
        sort,
        offset,
        limit,
    })
}

/// First field of the first operation definition.
fn first_field(document: &ExecutableDocument) -> Option<&Field> {
    let operation = first_operation(document)?;
    operation
        .selection_set
        .node
        .items
        .first()
        .and_then(|selection| match &selection.node {
            Selection::Field(field) => Some(&field.node),
            _ => None,
        })
}

fn first_operation(document: &ExecutableDocument) -> Option<&OperationDefinition> {
    match &document.operations {
        DocumentOperations::Single(operation) => Some(&operation.node),
        DocumentOperations::Multiple(operations) => {
            operations.values().next().map(|operation| &operation.node)
        }
    }
}

/// Recursively decode a resolved argument value into a `Literal`.
fn decode_literal(value: &Value) -> Literal {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Literal::Int(int)
            } else if let Some(float) = number.as_f64() {
                Literal::Float(float)
            } else {
                Literal::Null
            }
        }
        Value::String(text) => Literal::String(text.clone()),
        Value::Boolean(flag) => Literal::Boolean(*flag),
        // Bare enum lexemes (e.g. `desc`) carry through as their name
        Value::Enum(name) => Literal::String(name.to_string()),
        Value::List(items) => Literal::List(items.iter().map(decode_literal).collect()),
        Value::Object(fields) => Literal::Object(
            fields
                .iter()
                .map(|(name, field_value)| (name.to_string(), decode_literal(field_value)))
                .collect(),
        ),
        Value::Null | Value::Binary(_) => Literal::Null,
    }
}

/// Non-negative integer literal, or `None` for anything else.
fn pagination_value(literal: Option<&Literal>) -> Option<u64> {
    match literal {
        Some(Literal::Int(value)) if *value >= 0 => Some(*value as u64),
        _ => None,
    }
}

/// Flatten the `order_by` list into `column direction` terms in source
/// order. Entries that are not objects, and directions that are not strings,
/// are dropped.
fn sort_terms(entries: &[Literal]) -> Vec<SortTerm> {
    let mut terms = Vec::new();
    for entry in entries {
        let Literal::Object(fields) = entry else {
            continue;
        };
        for (column, direction) in fields {
            if let Literal::String(direction) = direction {
                terms.push(SortTerm {
                    column: column.clone(),
                    direction: direction.clone(),
                });
            }
        }
    }
    terms
}

//! GraphQL schema generation and resolution over introspected tables.

mod builder;
mod resolver;
mod type_mapping;

pub use builder::{generate_schema, Gateway};
pub use resolver::{create_query_resolver, row_to_graphql_value};
pub use type_mapping::{comparison_input_object, comparison_type_name, scalar_type_ref};
